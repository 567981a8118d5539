// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Header-based authentication for the demo server.
//!
//! `x-user-id` names the subject and `x-user-roles` carries a comma separated
//! role list. Requests without `x-user-id` stay anonymous and are rejected by
//! the authorization layer with 401.

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use tracing::debug;
use warden_core::Subject;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLES_HEADER: &str = "x-user-roles";

/// Builds a subject from request headers.
pub fn subject_from_headers(headers: &HeaderMap) -> Option<Subject> {
	let id = headers
		.get(USER_ID_HEADER)
		.and_then(|v| v.to_str().ok())
		.map(str::trim)
		.filter(|id| !id.is_empty())?;

	let roles = headers
		.get(USER_ROLES_HEADER)
		.and_then(|v| v.to_str().ok())
		.unwrap_or_default()
		.split(',')
		.map(str::trim)
		.filter(|role| !role.is_empty());

	Some(Subject::new(id).with_roles(roles))
}

/// Middleware inserting the [`Subject`] into request extensions.
pub async fn authenticate(mut request: Request, next: Next) -> Response {
	match subject_from_headers(request.headers()) {
		Some(subject) => {
			debug!(subject_id = %subject.id, roles = ?subject.roles, "request authenticated");
			request.extensions_mut().insert(subject);
		}
		None => debug!("anonymous request"),
	}
	next.run(request).await
}
