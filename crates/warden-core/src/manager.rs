// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access decision manager.
//!
//! The manager holds an ordered list of voters and one [`Strategy`]. For every
//! requested attribute it collects votes and aggregates them:
//!
//! ```text
//! attributes ─┬─ attr 1 ── voters in order ── strategy ── granted? ──▶ grant
//!             ├─ attr 2 ── ...                                  │
//!             └─ ...                                           no
//!                                                                ▼
//!                                                         next attribute
//! ```
//!
//! Attributes are a disjunction: the first attribute that is granted grants
//! the whole call and later attributes are not evaluated.
//!
//! Voter failures and timeouts are returned as [`DecisionError`]. They are
//! never turned into a deny, so callers can tell "denied" from "could not
//! decide".

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use serde::Serialize;
use tracing::{debug, info, instrument, trace, warn};

use crate::error::{AccessDeniedError, AccessError, ConfigurationError, DecisionError};
use crate::types::{Attribute, Resource, Strategy, Subject, Vote};
use crate::voter::Voter;

/// Aggregation settings fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionSettings {
	pub strategy: Strategy,
	/// Unanimous only: grant when every voter abstains.
	pub allow_if_all_abstain_decisions: bool,
	/// Consensus only: grant when grants and denials are equal.
	pub allow_if_equal_granted_denied_decisions: bool,
	/// Upper bound applied to [`AccessDecisionManager::decide`].
	pub timeout: Option<Duration>,
}

impl Default for DecisionSettings {
	fn default() -> Self {
		Self {
			strategy: Strategy::Affirmative,
			allow_if_all_abstain_decisions: false,
			allow_if_equal_granted_denied_decisions: true,
			timeout: None,
		}
	}
}

/// One vote as recorded in a [`DecisionReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastVote {
	pub voter: String,
	pub vote: Vote,
}

/// Votes and outcome for one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeDecision {
	pub attribute: Attribute,
	pub votes: Vec<CastVote>,
	pub granted: bool,
}

/// Everything that happened during one decision, for audit logging.
///
/// Only voters that were actually consulted appear; short-circuited voters
/// and attributes are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionReport {
	pub strategy: Strategy,
	pub granted: bool,
	pub attributes: Vec<AttributeDecision>,
}

impl DecisionReport {
	/// Total number of votes collected across all attributes.
	pub fn vote_count(&self) -> usize {
		self.attributes.iter().map(|a| a.votes.len()).sum()
	}
}

/// Aggregates voter decisions into a single grant/deny.
///
/// Immutable after construction. Share it as `Arc<AccessDecisionManager>`;
/// `decide` takes `&self` and keeps all per-call state local.
pub struct AccessDecisionManager {
	voters: Vec<Arc<dyn Voter>>,
	settings: DecisionSettings,
}

impl AccessDecisionManager {
	/// Creates a manager, rejecting an empty voter list.
	pub fn new(
		voters: Vec<Arc<dyn Voter>>,
		settings: DecisionSettings,
	) -> Result<Self, ConfigurationError> {
		if voters.is_empty() {
			return Err(ConfigurationError::NoVoters);
		}
		Ok(Self { voters, settings })
	}

	pub fn builder() -> AccessDecisionManagerBuilder {
		AccessDecisionManagerBuilder::default()
	}

	pub fn strategy(&self) -> Strategy {
		self.settings.strategy
	}

	pub fn settings(&self) -> &DecisionSettings {
		&self.settings
	}

	/// Voter names in evaluation order.
	pub fn voters(&self) -> Vec<&str> {
		self.voters.iter().map(|v| v.name()).collect()
	}

	/// Decides whether the subject is granted any of the attributes.
	///
	/// Applies the configured timeout, if any.
	pub async fn decide(
		&self,
		subject: &Subject,
		attributes: &[Attribute],
		resource: Option<&Resource>,
	) -> Result<bool, DecisionError> {
		let report = self
			.run(subject, attributes, resource, self.settings.timeout)
			.await?;
		Ok(report.granted)
	}

	/// Like [`decide`](Self::decide) with an explicit time limit.
	///
	/// Expiry is reported as [`DecisionError::Timeout`], not as a deny.
	pub async fn decide_with_timeout(
		&self,
		subject: &Subject,
		attributes: &[Attribute],
		resource: Option<&Resource>,
		timeout: Duration,
	) -> Result<bool, DecisionError> {
		let report = self.run(subject, attributes, resource, Some(timeout)).await?;
		Ok(report.granted)
	}

	/// Like [`decide`](Self::decide), returning every vote that was cast.
	pub async fn decide_with_report(
		&self,
		subject: &Subject,
		attributes: &[Attribute],
		resource: Option<&Resource>,
	) -> Result<DecisionReport, DecisionError> {
		self
			.run(subject, attributes, resource, self.settings.timeout)
			.await
	}

	/// Returns `Err(AccessError::Denied)` unless the decision grants.
	pub async fn deny_unless_granted(
		&self,
		subject: &Subject,
		attributes: &[Attribute],
		resource: Option<&Resource>,
	) -> Result<(), AccessError> {
		if self.decide(subject, attributes, resource).await? {
			Ok(())
		} else {
			Err(AccessDeniedError::new(attributes).into())
		}
	}

	#[instrument(
		level = "debug",
		name = "access_decision",
		skip(self, subject, attributes, resource),
		fields(
			subject_id = %subject.id,
			strategy = %self.settings.strategy,
			resource_kind = resource.map(|r| r.kind.as_str()).unwrap_or("none"),
		)
	)]
	async fn run(
		&self,
		subject: &Subject,
		attributes: &[Attribute],
		resource: Option<&Resource>,
		timeout: Option<Duration>,
	) -> Result<DecisionReport, DecisionError> {
		let evaluation = self.evaluate(subject, attributes, resource);
		let result = match timeout {
			Some(limit) => match tokio::time::timeout(limit, evaluation).await {
				Ok(result) => result,
				Err(_) => Err(DecisionError::Timeout(limit)),
			},
			None => evaluation.await,
		};

		match &result {
			Ok(report) if report.granted => debug!(
				attributes = ?attributes,
				votes = report.vote_count(),
				"access granted"
			),
			Ok(report) => info!(
				attributes = ?attributes,
				votes = report.vote_count(),
				"access denied"
			),
			Err(e) => warn!(attributes = ?attributes, error = %e, "access decision failed"),
		}

		result
	}

	async fn evaluate(
		&self,
		subject: &Subject,
		attributes: &[Attribute],
		resource: Option<&Resource>,
	) -> Result<DecisionReport, DecisionError> {
		let mut decisions = Vec::with_capacity(attributes.len());
		let mut granted = false;

		for attribute in attributes {
			let decision = match self.settings.strategy {
				Strategy::Affirmative => self.affirmative(subject, attribute, resource).await?,
				Strategy::Consensus => self.consensus(subject, attribute, resource).await?,
				Strategy::Unanimous => self.unanimous(subject, attribute, resource).await?,
			};
			granted = decision.granted;
			decisions.push(decision);
			if granted {
				break;
			}
		}

		Ok(DecisionReport {
			strategy: self.settings.strategy,
			granted,
			attributes: decisions,
		})
	}

	/// First grant wins; voters after it are not consulted.
	async fn affirmative(
		&self,
		subject: &Subject,
		attribute: &Attribute,
		resource: Option<&Resource>,
	) -> Result<AttributeDecision, DecisionError> {
		let mut votes = Vec::with_capacity(self.voters.len());
		for voter in &self.voters {
			let cast = cast(voter.as_ref(), subject, attribute, resource).await?;
			let is_grant = cast.vote == Vote::Grant;
			votes.push(cast);
			if is_grant {
				return Ok(AttributeDecision {
					attribute: attribute.clone(),
					votes,
					granted: true,
				});
			}
		}

		Ok(AttributeDecision {
			attribute: attribute.clone(),
			votes,
			granted: false,
		})
	}

	/// Strict majority of non-abstaining votes. Every voter is consulted, so
	/// they run concurrently.
	async fn consensus(
		&self,
		subject: &Subject,
		attribute: &Attribute,
		resource: Option<&Resource>,
	) -> Result<AttributeDecision, DecisionError> {
		let votes = try_join_all(
			self
				.voters
				.iter()
				.map(|voter| cast(voter.as_ref(), subject, attribute, resource)),
		)
		.await?;

		let grants = votes.iter().filter(|c| c.vote == Vote::Grant).count();
		let denials = votes.iter().filter(|c| c.vote == Vote::Deny).count();

		let granted = if grants == denials {
			self.settings.allow_if_equal_granted_denied_decisions
		} else {
			grants > denials
		};

		Ok(AttributeDecision {
			attribute: attribute.clone(),
			votes,
			granted,
		})
	}

	/// First denial loses; voters after it are not consulted.
	async fn unanimous(
		&self,
		subject: &Subject,
		attribute: &Attribute,
		resource: Option<&Resource>,
	) -> Result<AttributeDecision, DecisionError> {
		let mut votes = Vec::with_capacity(self.voters.len());
		let mut any_grant = false;

		for voter in &self.voters {
			let cast = cast(voter.as_ref(), subject, attribute, resource).await?;
			let vote = cast.vote;
			votes.push(cast);
			match vote {
				Vote::Deny => {
					return Ok(AttributeDecision {
						attribute: attribute.clone(),
						votes,
						granted: false,
					});
				}
				Vote::Grant => any_grant = true,
				Vote::Abstain => {}
			}
		}

		let granted = any_grant || self.settings.allow_if_all_abstain_decisions;
		Ok(AttributeDecision {
			attribute: attribute.clone(),
			votes,
			granted,
		})
	}
}

impl fmt::Debug for AccessDecisionManager {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AccessDecisionManager")
			.field("voters", &self.voters())
			.field("settings", &self.settings)
			.finish()
	}
}

async fn cast(
	voter: &dyn Voter,
	subject: &Subject,
	attribute: &Attribute,
	resource: Option<&Resource>,
) -> Result<CastVote, DecisionError> {
	let vote = voter
		.vote(subject, attribute, resource)
		.await
		.map_err(|source| DecisionError::Voter {
			voter: voter.name().to_string(),
			attribute: attribute.clone(),
			source,
		})?;

	trace!(voter = voter.name(), attribute = %attribute, vote = %vote, "vote cast");

	Ok(CastVote {
		voter: voter.name().to_string(),
		vote,
	})
}

/// Builder for [`AccessDecisionManager`].
#[derive(Default)]
pub struct AccessDecisionManagerBuilder {
	voters: Vec<Arc<dyn Voter>>,
	settings: DecisionSettings,
}

impl AccessDecisionManagerBuilder {
	pub fn voter(mut self, voter: impl Voter + 'static) -> Self {
		self.voters.push(Arc::new(voter));
		self
	}

	pub fn shared_voter(mut self, voter: Arc<dyn Voter>) -> Self {
		self.voters.push(voter);
		self
	}

	pub fn settings(mut self, settings: DecisionSettings) -> Self {
		self.settings = settings;
		self
	}

	pub fn strategy(mut self, strategy: Strategy) -> Self {
		self.settings.strategy = strategy;
		self
	}

	pub fn allow_if_all_abstain_decisions(mut self, allow: bool) -> Self {
		self.settings.allow_if_all_abstain_decisions = allow;
		self
	}

	pub fn allow_if_equal_granted_denied_decisions(mut self, allow: bool) -> Self {
		self.settings.allow_if_equal_granted_denied_decisions = allow;
		self
	}

	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.settings.timeout = Some(timeout);
		self
	}

	pub fn build(self) -> Result<AccessDecisionManager, ConfigurationError> {
		AccessDecisionManager::new(self.voters, self.settings)
	}
}
