// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Warden demo server.
//!
//! A small document API whose routes are protected by Warden access
//! decisions. Authentication is header based and meant for local use only.

pub mod auth;
pub mod error;
pub mod routes;
pub mod store;
pub mod voters;

use std::sync::Arc;

use axum::{
	middleware,
	routing::{delete, get, post, put},
	Extension, Router,
};
use warden_core::AccessDecisionManager;
use warden_http::is_granted;

pub use error::ApiError;
pub use store::{Document, DocumentStore};
pub use voters::document_voters;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
	pub store: Arc<DocumentStore>,
}

/// Builds the HTTP router.
///
/// `adm` is the single manager built by the provider at startup; every
/// protected route shares it.
pub fn create_router(adm: Arc<AccessDecisionManager>, store: Arc<DocumentStore>) -> Router {
	let document_resource = routes::DocumentResource::new(store.clone());

	let documents = Router::new()
		.route(
			"/documents",
			get(routes::list_documents)
				.route_layer(is_granted(adm.clone(), ["VIEWER", "EDITOR", "ADMIN"]))
				.merge(
					post(routes::create_document)
						.route_layer(is_granted(adm.clone(), ["EDITOR", "ADMIN"])),
				),
		)
		.route(
			"/documents/{id}",
			get(routes::get_document)
				.route_layer(
					is_granted(adm.clone(), ["VIEW"]).with_resource(document_resource.clone()),
				)
				.merge(
					put(routes::update_document)
						.route_layer(is_granted(adm.clone(), ["EDIT"]).with_resource(document_resource)),
				)
				// Checked in the handler through `Authorizer`.
				.merge(delete(routes::delete_document)),
		)
		.route("/documents/{id}/access", post(routes::explain_access));

	Router::new()
		.route("/health", get(routes::health))
		.merge(documents)
		.with_state(AppState { store })
		.layer(Extension(adm))
		.layer(middleware::from_fn(auth::authenticate))
}
