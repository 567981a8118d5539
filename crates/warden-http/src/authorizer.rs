// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Handler-level access checks.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use http::request::Parts;
use tracing::{debug, error, instrument};
use warden_core::{AccessDecisionManager, AccessDeniedError, Attribute, Resource, Subject};

use crate::response::{AuthzRejection, UnauthenticatedError};

/// Extractor giving handlers the shared manager and the current subject.
///
/// Requires `Extension(Arc<AccessDecisionManager>)` on the router and a
/// [`Subject`] in request extensions. A missing subject rejects with 401; a
/// missing manager is a wiring mistake and rejects with 500.
///
/// # Example
///
/// ```ignore
/// async fn update_document(
///     authz: Authorizer,
///     Path(id): Path<String>,
/// ) -> Result<impl IntoResponse, AuthzRejection> {
///     let doc = load(&id).await;
///     authz.deny_unless_granted(&["EDIT".into()], Some(&doc.as_resource())).await?;
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
#[derive(Clone)]
pub struct Authorizer {
	manager: Arc<AccessDecisionManager>,
	subject: Subject,
}

impl Authorizer {
	pub fn new(manager: Arc<AccessDecisionManager>, subject: Subject) -> Self {
		Self { manager, subject }
	}

	pub fn subject(&self) -> &Subject {
		&self.subject
	}

	pub fn manager(&self) -> &Arc<AccessDecisionManager> {
		&self.manager
	}

	/// Returns whether any of the attributes is granted.
	///
	/// Voter failures and timeouts are returned as [`AuthzRejection::Internal`].
	pub async fn is_granted(
		&self,
		attributes: &[Attribute],
		resource: Option<&Resource>,
	) -> Result<bool, AuthzRejection> {
		self
			.manager
			.decide(&self.subject, attributes, resource)
			.await
			.map_err(|e| {
				error!(subject_id = %self.subject.id, error = %e, "handler access check failed");
				AuthzRejection::from(e)
			})
	}

	/// Rejects with [`AuthzRejection::Forbidden`] unless granted.
	pub async fn deny_unless_granted(
		&self,
		attributes: &[Attribute],
		resource: Option<&Resource>,
	) -> Result<(), AuthzRejection> {
		if self.is_granted(attributes, resource).await? {
			Ok(())
		} else {
			debug!(
				subject_id = %self.subject.id,
				attributes = ?attributes,
				"handler access check denied"
			);
			Err(AccessDeniedError::new(attributes).into())
		}
	}
}

impl<S> FromRequestParts<S> for Authorizer
where
	S: Send + Sync,
{
	type Rejection = AuthzRejection;

	#[instrument(name = "Authorizer::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let Some(manager) = parts.extensions.get::<Arc<AccessDecisionManager>>().cloned() else {
			error!("access decision manager missing from request extensions");
			return Err(AuthzRejection::Internal(
				"access decision manager not configured".to_string(),
			));
		};

		let Some(subject) = parts.extensions.get::<Subject>().cloned() else {
			debug!("authorizer: no authenticated subject");
			return Err(UnauthenticatedError.into());
		};

		Ok(Self { manager, subject })
	}
}
