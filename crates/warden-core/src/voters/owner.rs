// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::BoxError;
use crate::types::{Attribute, Resource, Subject, Vote};
use crate::voter::Voter;

/// Grants configured attributes on resources owned by the subject.
///
/// Only supports requests that carry a resource with a known owner; checks
/// without a resource are left to other voters.
#[derive(Debug, Clone)]
pub struct OwnerVoter {
	attributes: BTreeSet<String>,
}

impl OwnerVoter {
	pub fn new<I, A>(attributes: I) -> Self
	where
		I: IntoIterator<Item = A>,
		A: Into<String>,
	{
		Self {
			attributes: attributes.into_iter().map(Into::into).collect(),
		}
	}
}

#[async_trait]
impl Voter for OwnerVoter {
	fn name(&self) -> &str {
		"owner"
	}

	fn supports(&self, attribute: &Attribute, resource: Option<&Resource>) -> bool {
		let has_owner = resource.map(|r| r.owner_id.is_some()).unwrap_or(false);
		has_owner && self.attributes.contains(attribute.as_str())
	}

	async fn vote_on_attribute(
		&self,
		subject: &Subject,
		_attribute: &Attribute,
		resource: Option<&Resource>,
	) -> Result<Vote, BoxError> {
		let is_owner = resource.map(|r| r.is_owned_by(subject)).unwrap_or(false);
		Ok(if is_owner { Vote::Grant } else { Vote::Deny })
	}
}
