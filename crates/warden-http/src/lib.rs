// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP integration for Warden access decisions.
//!
//! Authorization uses a two-tier approach:
//!
//! 1. **Route-level**: [`is_granted`] builds a tower layer that runs the
//!    shared [`AccessDecisionManager`] before the inner service
//! 2. **Handler-level**: the [`Authorizer`] extractor exposes the same manager
//!    inside handlers for checks that depend on loaded data
//!
//! # Status mapping
//!
//! - No subject in the request → 401 Unauthorized
//! - Decision is deny → 403 Forbidden
//! - Voter failure, timeout or extractor failure → 500, never masked as 403
//!
//! # Example
//!
//! ```ignore
//! use axum::{routing::get, Extension, Router};
//! use warden_http::is_granted;
//!
//! let adm = AccessDecisionManagerProvider::new(settings)
//!     .with_voter(Arc::new(RoleVoter::new(["ADMIN"])))
//!     .provide()?;
//!
//! Router::new()
//!     .route("/admin", get(admin_dashboard))
//!     .route_layer(is_granted(adm.clone(), ["ADMIN"]))
//!     .layer(Extension(adm));
//! ```
//!
//! [`AccessDecisionManager`]: warden_core::AccessDecisionManager

mod authorizer;
mod extract;
mod layer;
mod response;

pub use authorizer::Authorizer;
pub use extract::{
	resource_fn, subject_fn, ExtensionSubject, ResourceExtractor, ResourceFn, SubjectExtractor,
	SubjectFn,
};
pub use layer::{is_granted, IsGranted, IsGrantedService};
pub use response::{AuthzRejection, ErrorResponse, UnauthenticatedError};
