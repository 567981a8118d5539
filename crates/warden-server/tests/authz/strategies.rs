// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::{Method, StatusCode};
use warden_core::{DecisionSettings, Strategy, VoterSpec};

use super::support::{run_authz_cases, AuthzCase, TestApp, ALICE, NOBODY, ROOT};

#[tokio::test]
async fn test_unanimous_owner_denial_blocks_admin() {
	let app = TestApp::with_strategy(Strategy::Unanimous).await;
	let draft = format!("/documents/{}", app.fixtures.draft.id);

	let cases = vec![
		AuthzCase {
			name: "admin_vetoed_by_owner_voter",
			method: Method::DELETE,
			path: draft.clone(),
			user: Some(ROOT),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "owner_still_allowed",
			method: Method::GET,
			path: draft,
			user: Some(ALICE),
			body: None,
			expected_status: StatusCode::OK,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn test_consensus_tie_follows_setting() {
	// Admin reading someone else's draft: administrator grants, owner denies.
	for (allow_if_equal, expected_status) in [(true, StatusCode::OK), (false, StatusCode::FORBIDDEN)] {
		let settings = DecisionSettings {
			strategy: Strategy::Consensus,
			allow_if_equal_granted_denied_decisions: allow_if_equal,
			..DecisionSettings::default()
		};
		let app = TestApp::with_settings(settings, Vec::new()).await;

		let cases = vec![AuthzCase {
			name: "admin_reads_foreign_draft",
			method: Method::GET,
			path: format!("/documents/{}", app.fixtures.draft.id),
			user: Some(ROOT),
			body: None,
			expected_status,
		}];

		run_authz_cases(&app, &cases).await;
	}
}

#[tokio::test]
async fn test_configured_voters_take_part() {
	let specs = vec![VoterSpec::Role {
		roles: vec!["VIEWER".to_string()],
		deny_missing: true,
		name: Some("viewers".to_string()),
	}];
	let settings = DecisionSettings {
		strategy: Strategy::Unanimous,
		..DecisionSettings::default()
	};
	let app = TestApp::with_settings(settings, specs).await;

	let cases = vec![
		// VIEWER is vetoed, EDITOR is granted; one granted attribute is enough.
		AuthzCase {
			name: "editor_lists_through_second_attribute",
			method: Method::GET,
			path: "/documents".to_string(),
			user: Some(ALICE),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "roleless_user_denied",
			method: Method::GET,
			path: "/documents".to_string(),
			user: Some(NOBODY),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
	];

	run_authz_cases(&app, &cases).await;
}
