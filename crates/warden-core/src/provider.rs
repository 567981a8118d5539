// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Composition root for the access decision manager.
//!
//! The provider is invoked once at startup. The manager it returns is shared
//! read-only by every middleware registration in the process.

use std::sync::Arc;

use tracing::info;

use crate::error::ConfigurationError;
use crate::manager::{AccessDecisionManager, DecisionSettings};
use crate::voter::Voter;
use crate::voters::VoterSpec;

/// Builds a single shared [`AccessDecisionManager`].
///
/// Voters keep registration order: declarative specs in the order they were
/// listed, then code-registered voters in call order.
#[derive(Default)]
pub struct AccessDecisionManagerProvider {
	settings: DecisionSettings,
	specs: Vec<VoterSpec>,
	voters: Vec<Arc<dyn Voter>>,
}

impl AccessDecisionManagerProvider {
	pub fn new(settings: DecisionSettings) -> Self {
		Self {
			settings,
			specs: Vec::new(),
			voters: Vec::new(),
		}
	}

	/// Adds built-in voters described by configuration.
	pub fn with_voter_specs(mut self, specs: impl IntoIterator<Item = VoterSpec>) -> Self {
		self.specs.extend(specs);
		self
	}

	/// Adds an application voter.
	pub fn with_voter(mut self, voter: Arc<dyn Voter>) -> Self {
		self.voters.push(voter);
		self
	}

	/// Constructs the manager.
	pub fn provide(self) -> Result<Arc<AccessDecisionManager>, ConfigurationError> {
		let voters: Vec<Arc<dyn Voter>> = self
			.specs
			.iter()
			.map(VoterSpec::build)
			.chain(self.voters)
			.collect();

		let manager = AccessDecisionManager::new(voters, self.settings)?;

		info!(
			strategy = %manager.strategy(),
			voters = ?manager.voters(),
			allow_if_all_abstain = manager.settings().allow_if_all_abstain_decisions,
			allow_if_equal = manager.settings().allow_if_equal_granted_denied_decisions,
			"access decision manager ready"
		);

		Ok(Arc::new(manager))
	}
}
