// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rejections and their HTTP responses.
//!
//! Response bodies never leak permission details or voter error text beyond
//! a generic message.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::Serialize;
use thiserror::Error;
use warden_core::{AccessDeniedError, AccessError, DecisionError};

/// JSON error body returned on rejection.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

/// No subject is available for the request.
#[derive(Debug, Clone, Copy, Error)]
#[error("authentication required")]
pub struct UnauthenticatedError;

/// Why a request was stopped before reaching the protected handler.
#[derive(Debug, Error)]
pub enum AuthzRejection {
	/// 401: nobody is logged in.
	#[error(transparent)]
	Unauthenticated(#[from] UnauthenticatedError),

	/// 403: the decision was deny.
	#[error(transparent)]
	Forbidden(#[from] AccessDeniedError),

	/// 500: the decision could not be made.
	#[error("authorization could not be determined: {0}")]
	Internal(String),
}

impl AuthzRejection {
	pub fn status(&self) -> StatusCode {
		match self {
			AuthzRejection::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
			AuthzRejection::Forbidden(_) => StatusCode::FORBIDDEN,
			AuthzRejection::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<DecisionError> for AuthzRejection {
	fn from(err: DecisionError) -> Self {
		AuthzRejection::Internal(err.to_string())
	}
}

impl From<AccessError> for AuthzRejection {
	fn from(err: AccessError) -> Self {
		match err {
			AccessError::Denied(denied) => denied.into(),
			AccessError::Decision(failed) => failed.into(),
		}
	}
}

impl IntoResponse for AuthzRejection {
	fn into_response(self) -> Response {
		let (error, message) = match &self {
			AuthzRejection::Unauthenticated(_) => ("unauthorized", "Authentication required"),
			AuthzRejection::Forbidden(_) => ("forbidden", "Insufficient permissions"),
			AuthzRejection::Internal(_) => {
				("internal_error", "Authorization could not be determined")
			}
		};

		(
			self.status(),
			Json(ErrorResponse {
				error: error.to_string(),
				message: message.to_string(),
			}),
		)
			.into_response()
	}
}
