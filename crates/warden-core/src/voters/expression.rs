// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::BTreeSet;
use std::fmt;

use async_trait::async_trait;

use crate::error::BoxError;
use crate::types::{Attribute, Resource, Subject, Vote};
use crate::voter::Voter;

type Expression = dyn Fn(&Subject, &Attribute, Option<&Resource>) -> Vote + Send + Sync;

/// A voter whose rule is an application-supplied closure.
///
/// ```ignore
/// let voter = ExpressionVoter::new("published", ["VIEW"], |_, _, resource| {
///     match resource.and_then(|r| r.attributes.get("published")) {
///         Some(serde_json::Value::Bool(true)) => Vote::Grant,
///         _ => Vote::Abstain,
///     }
/// });
/// ```
pub struct ExpressionVoter {
	name: String,
	attributes: BTreeSet<String>,
	expression: Box<Expression>,
}

impl ExpressionVoter {
	pub fn new<I, A, F>(name: impl Into<String>, attributes: I, expression: F) -> Self
	where
		I: IntoIterator<Item = A>,
		A: Into<String>,
		F: Fn(&Subject, &Attribute, Option<&Resource>) -> Vote + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			attributes: attributes.into_iter().map(Into::into).collect(),
			expression: Box::new(expression),
		}
	}
}

impl fmt::Debug for ExpressionVoter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ExpressionVoter")
			.field("name", &self.name)
			.field("attributes", &self.attributes)
			.finish_non_exhaustive()
	}
}

#[async_trait]
impl Voter for ExpressionVoter {
	fn name(&self) -> &str {
		&self.name
	}

	fn supports(&self, attribute: &Attribute, _resource: Option<&Resource>) -> bool {
		self.attributes.contains(attribute.as_str())
	}

	async fn vote_on_attribute(
		&self,
		subject: &Subject,
		attribute: &Attribute,
		resource: Option<&Resource>,
	) -> Result<Vote, BoxError> {
		Ok((self.expression)(subject, attribute, resource))
	}
}
