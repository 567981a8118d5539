// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::BoxError;
use crate::types::{Attribute, Resource, Subject, Vote};
use crate::voter::Voter;

/// Votes on attributes that name a role.
///
/// The voter knows a fixed set of role names and only supports those
/// attributes. A subject holding the role is granted. A subject without it
/// gets an abstention, or a denial when the voter was built with
/// [`deny_missing`](RoleVoter::deny_missing).
#[derive(Debug, Clone)]
pub struct RoleVoter {
	name: String,
	roles: BTreeSet<String>,
	deny_missing: bool,
}

impl RoleVoter {
	pub fn new<I, R>(roles: I) -> Self
	where
		I: IntoIterator<Item = R>,
		R: Into<String>,
	{
		let roles: BTreeSet<String> = roles.into_iter().map(Into::into).collect();
		let name = format!(
			"role[{}]",
			roles.iter().cloned().collect::<Vec<_>>().join(",")
		);
		Self {
			name,
			roles,
			deny_missing: false,
		}
	}

	/// Deny instead of abstaining when the subject lacks a known role.
	pub fn deny_missing(mut self) -> Self {
		self.deny_missing = true;
		self
	}

	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}
}

#[async_trait]
impl Voter for RoleVoter {
	fn name(&self) -> &str {
		&self.name
	}

	fn supports(&self, attribute: &Attribute, _resource: Option<&Resource>) -> bool {
		self.roles.contains(attribute.as_str())
	}

	async fn vote_on_attribute(
		&self,
		subject: &Subject,
		attribute: &Attribute,
		_resource: Option<&Resource>,
	) -> Result<Vote, BoxError> {
		if subject.has_role(attribute.as_str()) {
			Ok(Vote::Grant)
		} else if self.deny_missing {
			Ok(Vote::Deny)
		} else {
			Ok(Vote::Abstain)
		}
	}
}
