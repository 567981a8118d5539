// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Route-level authorization layer.
//!
//! [`is_granted`] produces an [`IsGranted`] layer bound to one shared
//! [`AccessDecisionManager`] and a fixed list of attributes. Per request:
//!
//! ```text
//! Request → subject? ──no──▶ 401
//!              │ yes
//!              ▼
//!          resource extractor (optional) ──error──▶ 500
//!              │
//!              ▼
//!          decide ──error/timeout──▶ 500
//!              │
//!        grant ├──────────────▶ inner service
//!         deny └──────────────▶ 403
//! ```

use std::{
	sync::Arc,
	task::{Context, Poll},
	time::Duration,
};

use axum::{
	body::Body,
	http::Request,
	response::{IntoResponse, Response},
};
use futures::future::BoxFuture;
use http::request::Parts;
use tower::{Layer, Service};
use tracing::{debug, error};
use warden_core::{AccessDecisionManager, AccessDeniedError, Attribute, Resource};

use crate::extract::{ExtensionSubject, ResourceExtractor, SubjectExtractor};
use crate::response::{AuthzRejection, UnauthenticatedError};

/// Builds a route layer that requires any of `attributes` to be granted.
///
/// The manager is injected, never reconstructed; pass the instance returned
/// by the provider.
///
/// ```ignore
/// Router::new()
///     .route("/documents/{id}", put(update_document))
///     .route_layer(
///         is_granted(adm.clone(), ["EDIT"])
///             .with_resource(resource_fn(load_document)),
///     )
/// ```
pub fn is_granted<I, A>(manager: Arc<AccessDecisionManager>, attributes: I) -> IsGranted
where
	I: IntoIterator<Item = A>,
	A: Into<Attribute>,
{
	IsGranted {
		manager,
		attributes: attributes.into_iter().map(Into::into).collect(),
		subject: Arc::new(ExtensionSubject),
		resource: None,
		timeout: None,
	}
}

/// Route layer that runs an access decision before the inner service.
#[derive(Clone)]
pub struct IsGranted {
	manager: Arc<AccessDecisionManager>,
	attributes: Arc<[Attribute]>,
	subject: Arc<dyn SubjectExtractor>,
	resource: Option<Arc<dyn ResourceExtractor>>,
	timeout: Option<Duration>,
}

impl IsGranted {
	/// Replaces the default [`ExtensionSubject`] extractor.
	pub fn with_subject(mut self, extractor: impl SubjectExtractor) -> Self {
		self.subject = Arc::new(extractor);
		self
	}

	/// Loads a resource for every request before deciding.
	pub fn with_resource(mut self, extractor: impl ResourceExtractor) -> Self {
		self.resource = Some(Arc::new(extractor));
		self
	}

	/// Bounds each decision; expiry is answered with 500.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	pub fn attributes(&self) -> &[Attribute] {
		&self.attributes
	}

	async fn check(&self, parts: &Parts) -> Result<(), AuthzRejection> {
		let Some(subject) = self.subject.extract(parts) else {
			debug!(
				attributes = ?self.attributes,
				path = %parts.uri.path(),
				"access check rejected: not authenticated"
			);
			return Err(UnauthenticatedError.into());
		};

		let resource: Option<Resource> = match &self.resource {
			Some(extractor) => extractor.extract(parts).await.map_err(|e| {
				error!(
					subject_id = %subject.id,
					path = %parts.uri.path(),
					error = %e,
					"access check failed: resource extraction error"
				);
				AuthzRejection::Internal(e.to_string())
			})?,
			None => None,
		};

		let decision = match self.timeout {
			Some(limit) => {
				self
					.manager
					.decide_with_timeout(&subject, &self.attributes, resource.as_ref(), limit)
					.await
			}
			None => {
				self
					.manager
					.decide(&subject, &self.attributes, resource.as_ref())
					.await
			}
		};

		match decision {
			Ok(true) => {
				debug!(
					subject_id = %subject.id,
					attributes = ?self.attributes,
					"access check passed"
				);
				Ok(())
			}
			Ok(false) => {
				debug!(
					subject_id = %subject.id,
					attributes = ?self.attributes,
					path = %parts.uri.path(),
					"access check rejected: insufficient permissions"
				);
				Err(AccessDeniedError::new(&self.attributes).into())
			}
			Err(e) => {
				error!(
					subject_id = %subject.id,
					attributes = ?self.attributes,
					error = %e,
					"access check failed: decision error"
				);
				Err(e.into())
			}
		}
	}
}

impl<S> Layer<S> for IsGranted {
	type Service = IsGrantedService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		IsGrantedService {
			inner,
			gate: self.clone(),
		}
	}
}

/// Service wrapper for [`IsGranted`] layer.
#[derive(Clone)]
pub struct IsGrantedService<S> {
	inner: S,
	gate: IsGranted,
}

impl<S> Service<Request<Body>> for IsGrantedService<S>
where
	S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
	S::Future: Send,
{
	type Response = Response;
	type Error = S::Error;
	type Future = BoxFuture<'static, Result<Response, S::Error>>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, req: Request<Body>) -> Self::Future {
		// The clone is not ready; keep it and move the ready instance into the future.
		let clone = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, clone);
		let gate = self.gate.clone();

		Box::pin(async move {
			let (parts, body) = req.into_parts();
			match gate.check(&parts).await {
				Ok(()) => inner.call(Request::from_parts(parts, body)).await,
				Err(rejection) => Ok(rejection.into_response()),
			}
		})
	}
}
