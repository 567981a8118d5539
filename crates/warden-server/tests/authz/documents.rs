// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::support::{body_json, run_authz_cases, AuthzCase, TestApp, ALICE, BOB, NOBODY, ROOT};

#[tokio::test]
async fn test_document_list_authorization() {
	let app = TestApp::new().await;

	let cases = vec![
		AuthzCase {
			name: "health_is_public",
			method: Method::GET,
			path: "/health".to_string(),
			user: None,
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "anonymous_cannot_list",
			method: Method::GET,
			path: "/documents".to_string(),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "roleless_user_cannot_list",
			method: Method::GET,
			path: "/documents".to_string(),
			user: Some(NOBODY),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "viewer_can_list",
			method: Method::GET,
			path: "/documents".to_string(),
			user: Some(BOB),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "admin_can_list",
			method: Method::GET,
			path: "/documents".to_string(),
			user: Some(ROOT),
			body: None,
			expected_status: StatusCode::OK,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn test_document_create_authorization() {
	let app = TestApp::new().await;
	let body = json!({ "title": "new document" });

	let cases = vec![
		AuthzCase {
			name: "anonymous_cannot_create",
			method: Method::POST,
			path: "/documents".to_string(),
			user: None,
			body: Some(body.clone()),
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "viewer_cannot_create",
			method: Method::POST,
			path: "/documents".to_string(),
			user: Some(BOB),
			body: Some(body.clone()),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "editor_can_create",
			method: Method::POST,
			path: "/documents".to_string(),
			user: Some(ALICE),
			body: Some(body.clone()),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "admin_can_create",
			method: Method::POST,
			path: "/documents".to_string(),
			user: Some(ROOT),
			body: Some(body),
			expected_status: StatusCode::CREATED,
		},
	];

	run_authz_cases(&app, &cases).await;
	assert_eq!(app.store.list().await.len(), 4);
}

#[tokio::test]
async fn test_document_read_authorization() {
	let app = TestApp::new().await;
	let draft = format!("/documents/{}", app.fixtures.draft.id);
	let published = format!("/documents/{}", app.fixtures.published.id);

	let cases = vec![
		AuthzCase {
			name: "anonymous_cannot_read",
			method: Method::GET,
			path: published.clone(),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "owner_can_read_draft",
			method: Method::GET,
			path: draft.clone(),
			user: Some(ALICE),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "other_user_cannot_read_draft",
			method: Method::GET,
			path: draft.clone(),
			user: Some(BOB),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "admin_can_read_draft",
			method: Method::GET,
			path: draft,
			user: Some(ROOT),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "anyone_authenticated_can_read_published",
			method: Method::GET,
			path: published,
			user: Some(NOBODY),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "unknown_document_is_forbidden_for_non_admin",
			method: Method::GET,
			path: "/documents/doc-404".to_string(),
			user: Some(BOB),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "unknown_document_is_not_found_for_admin",
			method: Method::GET,
			path: "/documents/doc-404".to_string(),
			user: Some(ROOT),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn test_document_update_authorization() {
	let app = TestApp::new().await;
	let draft = format!("/documents/{}", app.fixtures.draft.id);
	let published = format!("/documents/{}", app.fixtures.published.id);
	let body = json!({ "title": "renamed" });

	let cases = vec![
		AuthzCase {
			name: "owner_can_update",
			method: Method::PUT,
			path: draft.clone(),
			user: Some(ALICE),
			body: Some(body.clone()),
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "other_user_cannot_update",
			method: Method::PUT,
			path: draft.clone(),
			user: Some(BOB),
			body: Some(body.clone()),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "published_does_not_grant_edit",
			method: Method::PUT,
			path: published,
			user: Some(BOB),
			body: Some(body.clone()),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "admin_can_update",
			method: Method::PUT,
			path: draft,
			user: Some(ROOT),
			body: Some(body),
			expected_status: StatusCode::OK,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn test_document_delete_authorization() {
	let app = TestApp::new().await;
	let draft = format!("/documents/{}", app.fixtures.draft.id);
	let published = format!("/documents/{}", app.fixtures.published.id);

	let cases = vec![
		AuthzCase {
			name: "anonymous_cannot_delete",
			method: Method::DELETE,
			path: draft.clone(),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "other_user_cannot_delete",
			method: Method::DELETE,
			path: draft.clone(),
			user: Some(BOB),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "missing_document_is_not_found",
			method: Method::DELETE,
			path: "/documents/doc-404".to_string(),
			user: Some(BOB),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
		AuthzCase {
			name: "owner_can_delete",
			method: Method::DELETE,
			path: draft,
			user: Some(ALICE),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "admin_can_delete",
			method: Method::DELETE,
			path: published,
			user: Some(ROOT),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
	];

	run_authz_cases(&app, &cases).await;
	assert!(app.store.list().await.is_empty());
}

#[tokio::test]
async fn test_forbidden_body_does_not_leak_attributes() {
	let app = TestApp::new().await;
	let path = format!("/documents/{}", app.fixtures.draft.id);

	let response = app.request(Method::GET, &path, Some(&BOB), None).await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	let json = body_json(response).await;
	assert_eq!(json["error"], "forbidden");
	assert!(!json.to_string().contains("VIEW"));
}

#[tokio::test]
async fn test_access_report_lists_votes() {
	let app = TestApp::new().await;
	let path = format!("/documents/{}/access", app.fixtures.published.id);

	let response = app
		.request(
			Method::POST,
			&path,
			Some(&BOB),
			Some(json!({ "attributes": ["EDIT"] })),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let report = body_json(response).await;
	assert_eq!(report["strategy"], "affirmative");
	assert_eq!(report["granted"], false);

	let votes = report["attributes"][0]["votes"].as_array().unwrap();
	let owner = votes.iter().find(|v| v["voter"] == "owner").unwrap();
	assert_eq!(owner["vote"], "deny");
}

#[tokio::test]
async fn test_access_report_requires_authentication() {
	let app = TestApp::new().await;
	let path = format!("/documents/{}/access", app.fixtures.draft.id);

	let response = app
		.request(Method::POST, &path, None, Some(json!({ "attributes": ["VIEW"] })))
		.await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_access_report_requires_view() {
	let app = TestApp::new().await;
	let body = json!({ "attributes": ["EDIT"] });

	let cases = vec![
		AuthzCase {
			name: "other_user_cannot_inspect_draft",
			method: Method::POST,
			path: format!("/documents/{}/access", app.fixtures.draft.id),
			user: Some(BOB),
			body: Some(body.clone()),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "owner_can_inspect_draft",
			method: Method::POST,
			path: format!("/documents/{}/access", app.fixtures.draft.id),
			user: Some(ALICE),
			body: Some(body.clone()),
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "unknown_document_hidden_from_non_admin",
			method: Method::POST,
			path: "/documents/doc-404/access".to_string(),
			user: Some(BOB),
			body: Some(body.clone()),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "unknown_document_not_found_for_admin",
			method: Method::POST,
			path: "/documents/doc-404/access".to_string(),
			user: Some(ROOT),
			body: Some(body),
			expected_status: StatusCode::NOT_FOUND,
		},
	];

	run_authz_cases(&app, &cases).await;
}
