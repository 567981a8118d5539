// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Document API handlers.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
	extract::{Path, State},
	http::{request::Parts, StatusCode},
	response::IntoResponse,
	Extension, Json,
};
use serde::Deserialize;
use tracing::info;
use warden_core::{Attribute, BoxError, DecisionReport, Resource, Subject};
use warden_http::{AuthzRejection, Authorizer, ResourceExtractor};

use crate::error::ApiError;
use crate::store::{Document, DocumentStore, DocumentUpdate, NewDocument};
use crate::AppState;

/// Loads the document named in a `/documents/{id}` path.
///
/// An unknown id yields no resource; ownership-based voters then abstain.
#[derive(Clone)]
pub struct DocumentResource {
	store: Arc<DocumentStore>,
}

impl DocumentResource {
	pub fn new(store: Arc<DocumentStore>) -> Self {
		Self { store }
	}
}

#[async_trait]
impl ResourceExtractor for DocumentResource {
	async fn extract(&self, parts: &Parts) -> Result<Option<Resource>, BoxError> {
		let Some(id) = document_id(parts.uri.path()) else {
			return Ok(None);
		};
		Ok(self.store.get(id).await.map(|doc| doc.as_resource()))
	}
}

fn document_id(path: &str) -> Option<&str> {
	path
		.strip_prefix("/documents/")
		.and_then(|rest| rest.split('/').next())
		.filter(|id| !id.is_empty())
}

pub async fn health() -> &'static str {
	"ok"
}

pub async fn list_documents(State(state): State<AppState>) -> Json<Vec<Document>> {
	Json(state.store.list().await)
}

pub async fn create_document(
	State(state): State<AppState>,
	Extension(subject): Extension<Subject>,
	Json(new): Json<NewDocument>,
) -> impl IntoResponse {
	let document = state.store.insert(&subject.id, new).await;
	info!(document_id = %document.id, owner_id = %subject.id, "document created");
	(StatusCode::CREATED, Json(document))
}

pub async fn get_document(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
	state
		.store
		.get(&id)
		.await
		.map(Json)
		.ok_or(ApiError::NotFound(id))
}

pub async fn update_document(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(update): Json<DocumentUpdate>,
) -> Result<Json<Document>, ApiError> {
	state
		.store
		.update(&id, update)
		.await
		.map(Json)
		.ok_or(ApiError::NotFound(id))
}

/// Deletion is authorized in the handler once the document is loaded, so a
/// missing document answers 404 instead of 403.
pub async fn delete_document(
	authz: Authorizer,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
	let document = state
		.store
		.get(&id)
		.await
		.ok_or_else(|| ApiError::NotFound(id.clone()))?;

	authz
		.deny_unless_granted(&[Attribute::from("DELETE")], Some(&document.as_resource()))
		.await?;

	state.store.remove(&id).await;
	info!(document_id = %id, subject_id = %authz.subject().id, "document deleted");
	Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct AccessQuery {
	pub attributes: Vec<Attribute>,
}

/// Explains how the current subject's access to a document is decided.
///
/// Requires `VIEW`, checked the same way as `GET /documents/{id}`: an unknown
/// id is only reported as missing to subjects granted `VIEW` without a
/// resource.
pub async fn explain_access(
	authz: Authorizer,
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(query): Json<AccessQuery>,
) -> Result<Json<DecisionReport>, ApiError> {
	let resource = state.store.get(&id).await.map(|doc| doc.as_resource());

	authz
		.deny_unless_granted(&[Attribute::from("VIEW")], resource.as_ref())
		.await?;

	let Some(resource) = resource else {
		return Err(ApiError::NotFound(id));
	};

	let report = authz
		.manager()
		.decide_with_report(authz.subject(), &query.attributes, Some(&resource))
		.await
		.map_err(AuthzRejection::from)?;

	Ok(Json(report))
}
