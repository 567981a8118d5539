// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use axum::{
	body::Body,
	http::{Method, Request, StatusCode},
	response::Response,
	Router,
};
use tower::ServiceExt;
use warden_core::{AccessDecisionManagerProvider, DecisionSettings, Strategy, VoterSpec};
use warden_server::{
	auth::{USER_ID_HEADER, USER_ROLES_HEADER},
	create_router, document_voters, Document, DocumentStore,
};

#[derive(Debug, Clone)]
pub struct TestUser {
	pub id: &'static str,
	pub roles: &'static str,
}

impl TestUser {
	pub const fn new(id: &'static str, roles: &'static str) -> Self {
		Self { id, roles }
	}
}

pub const ALICE: TestUser = TestUser::new("alice", "EDITOR");
pub const BOB: TestUser = TestUser::new("bob", "VIEWER");
pub const ROOT: TestUser = TestUser::new("root", "ADMIN");
pub const NOBODY: TestUser = TestUser::new("nobody", "");

pub struct Fixtures {
	/// Unpublished, owned by alice.
	pub draft: Document,
	/// Published, owned by alice.
	pub published: Document,
}

pub struct TestApp {
	pub router: Router,
	pub store: Arc<DocumentStore>,
	pub fixtures: Fixtures,
}

impl TestApp {
	pub async fn new() -> Self {
		Self::with_settings(DecisionSettings::default(), Vec::new()).await
	}

	pub async fn with_strategy(strategy: Strategy) -> Self {
		Self::with_settings(
			DecisionSettings {
				strategy,
				..DecisionSettings::default()
			},
			Vec::new(),
		)
		.await
	}

	pub async fn with_settings(settings: DecisionSettings, specs: Vec<VoterSpec>) -> Self {
		let adm = document_voters()
			.into_iter()
			.fold(
				AccessDecisionManagerProvider::new(settings).with_voter_specs(specs),
				|provider, voter| provider.with_voter(voter),
			)
			.provide()
			.unwrap();

		let store = Arc::new(DocumentStore::new());
		let draft = store
			.insert("alice", serde_json::from_str(r#"{"title": "draft"}"#).unwrap())
			.await;
		let published = store
			.insert(
				"alice",
				serde_json::from_str(r#"{"title": "notes", "published": true}"#).unwrap(),
			)
			.await;

		Self {
			router: create_router(adm, store.clone()),
			store,
			fixtures: Fixtures { draft, published },
		}
	}

	pub async fn request(
		&self,
		method: Method,
		path: &str,
		user: Option<&TestUser>,
		body: Option<serde_json::Value>,
	) -> Response<Body> {
		let mut builder = Request::builder().method(method).uri(path);
		if let Some(user) = user {
			builder = builder
				.header(USER_ID_HEADER, user.id)
				.header(USER_ROLES_HEADER, user.roles);
		}
		let body = match body {
			Some(json) => {
				builder = builder.header("content-type", "application/json");
				Body::from(json.to_string())
			}
			None => Body::empty(),
		};
		self
			.router
			.clone()
			.oneshot(builder.body(body).unwrap())
			.await
			.unwrap()
	}
}

pub struct AuthzCase {
	pub name: &'static str,
	pub method: Method,
	pub path: String,
	pub user: Option<TestUser>,
	pub body: Option<serde_json::Value>,
	pub expected_status: StatusCode,
}

pub async fn run_authz_cases(app: &TestApp, cases: &[AuthzCase]) {
	for case in cases {
		let response = app
			.request(
				case.method.clone(),
				&case.path,
				case.user.as_ref(),
				case.body.clone(),
			)
			.await;

		if response.status() != case.expected_status {
			// Read the response body for debugging
			let (parts, body) = response.into_parts();
			let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
			let body_str = String::from_utf8_lossy(&body_bytes);
			panic!(
				"Case '{}': {} {} - expected {}, got {}\nResponse body: {}",
				case.name, case.method, case.path, case.expected_status, parts.status, body_str
			);
		}
	}
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&bytes).unwrap()
}
