// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Voters for the document API.
//!
//! | Attribute                   | Granted when                               |
//! |-----------------------------|--------------------------------------------|
//! | `ADMIN`, `EDITOR`, `VIEWER` | subject holds the role                     |
//! | `VIEW`                      | owner, published document, or `ADMIN` role |
//! | `EDIT`, `DELETE`            | owner or `ADMIN` role                      |

use std::sync::Arc;

use warden_core::{ExpressionVoter, OwnerVoter, RoleVoter, Vote, Voter};

pub const ROLES: [&str; 3] = ["ADMIN", "EDITOR", "VIEWER"];

/// Voters registered in code, after any configured ones.
pub fn document_voters() -> Vec<Arc<dyn Voter>> {
	vec![
		Arc::new(RoleVoter::new(ROLES).named("roles")),
		Arc::new(OwnerVoter::new(["VIEW", "EDIT", "DELETE"])),
		Arc::new(ExpressionVoter::new(
			"published",
			["VIEW"],
			|_subject, _attribute, resource| {
				let published = resource
					.and_then(|r| r.attributes.get("published"))
					.and_then(|v| v.as_bool())
					.unwrap_or(false);
				if published {
					Vote::Grant
				} else {
					Vote::Abstain
				}
			},
		)),
		Arc::new(ExpressionVoter::new(
			"administrator",
			["VIEW", "EDIT", "DELETE"],
			|subject, _attribute, _resource| {
				if subject.has_role("ADMIN") {
					Vote::Grant
				} else {
					Vote::Abstain
				}
			},
		)),
	]
}
