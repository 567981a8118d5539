// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use thiserror::Error;
use warden_http::{AuthzRejection, ErrorResponse};

/// Handler errors for the document API.
#[derive(Debug, Error)]
pub enum ApiError {
	#[error("document not found: {0}")]
	NotFound(String),

	#[error(transparent)]
	Authz(#[from] AuthzRejection),
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		match self {
			ApiError::NotFound(_) => (
				StatusCode::NOT_FOUND,
				Json(ErrorResponse {
					error: "not_found".to_string(),
					message: "Document not found".to_string(),
				}),
			)
				.into_response(),
			ApiError::Authz(rejection) => rejection.into_response(),
		}
	}
}
