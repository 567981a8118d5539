// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The voter contract.

use async_trait::async_trait;

use crate::error::BoxError;
use crate::types::{Attribute, Resource, Subject, Vote};

/// A pluggable unit that judges one attribute for one subject/resource pair.
///
/// Implementations declare the attributes they understand through
/// [`supports`](Voter::supports). For anything else [`vote`](Voter::vote)
/// abstains, so an unsupported attribute never turns into a denial.
///
/// Voters must not mutate shared state. They may perform async lookups
/// against external authorization data; any caching they do is their own
/// concern and must be safe for concurrent use.
#[async_trait]
pub trait Voter: Send + Sync {
	/// Name used in logs and decision reports.
	fn name(&self) -> &str;

	/// Returns true if this voter has an opinion on the attribute.
	fn supports(&self, attribute: &Attribute, resource: Option<&Resource>) -> bool;

	/// Evaluates a supported attribute.
	async fn vote_on_attribute(
		&self,
		subject: &Subject,
		attribute: &Attribute,
		resource: Option<&Resource>,
	) -> Result<Vote, BoxError>;

	/// Votes on one attribute, abstaining when it is unsupported.
	async fn vote(
		&self,
		subject: &Subject,
		attribute: &Attribute,
		resource: Option<&Resource>,
	) -> Result<Vote, BoxError> {
		if !self.supports(attribute, resource) {
			return Ok(Vote::Abstain);
		}
		self.vote_on_attribute(subject, attribute, resource).await
	}
}
