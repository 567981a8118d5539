// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{OwnerVoter, RoleVoter};
use crate::voter::Voter;

/// Declarative description of a built-in voter.
///
/// ```toml
/// [[decision.voters]]
/// type = "role"
/// roles = ["ADMIN", "EDITOR"]
/// deny_missing = false
///
/// [[decision.voters]]
/// type = "owner"
/// attributes = ["EDIT", "DELETE"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VoterSpec {
	Role {
		roles: Vec<String>,
		#[serde(default)]
		deny_missing: bool,
		#[serde(default)]
		name: Option<String>,
	},
	Owner {
		attributes: Vec<String>,
	},
}

impl VoterSpec {
	pub fn build(&self) -> Arc<dyn Voter> {
		match self {
			VoterSpec::Role {
				roles,
				deny_missing,
				name,
			} => {
				let mut voter = RoleVoter::new(roles.iter().cloned());
				if *deny_missing {
					voter = voter.deny_missing();
				}
				if let Some(name) = name {
					voter = voter.named(name.clone());
				}
				Arc::new(voter)
			}
			VoterSpec::Owner { attributes } => Arc::new(OwnerVoter::new(attributes.iter().cloned())),
		}
	}
}
