// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access decision configuration.
//!
//! ```toml
//! [decision]
//! strategy = "unanimous"
//! allow_if_all_abstain_decisions = false
//! allow_if_equal_granted_denied_decisions = true
//! timeout = "250ms"
//!
//! [[decision.voters]]
//! type = "role"
//! roles = ["ADMIN", "EDITOR"]
//! ```

use std::time::Duration;

use serde::Deserialize;
use warden_core::{DecisionSettings, Strategy, VoterSpec};

use crate::error::ConfigError;

/// Decision configuration (runtime, fully resolved).
#[derive(Debug, Clone, Default)]
pub struct DecisionConfig {
	pub settings: DecisionSettings,
	pub voters: Vec<VoterSpec>,
}

/// Decision configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecisionConfigLayer {
	#[serde(default)]
	pub strategy: Option<String>,
	#[serde(default)]
	pub allow_if_all_abstain_decisions: Option<bool>,
	#[serde(default)]
	pub allow_if_equal_granted_denied_decisions: Option<bool>,
	/// Humantime duration, e.g. `"250ms"` or `"2s"`.
	#[serde(default)]
	pub timeout: Option<String>,
	#[serde(default)]
	pub voters: Option<Vec<VoterSpec>>,
}

impl DecisionConfigLayer {
	pub fn merge(&mut self, other: DecisionConfigLayer) {
		if other.strategy.is_some() {
			self.strategy = other.strategy;
		}
		if other.allow_if_all_abstain_decisions.is_some() {
			self.allow_if_all_abstain_decisions = other.allow_if_all_abstain_decisions;
		}
		if other.allow_if_equal_granted_denied_decisions.is_some() {
			self.allow_if_equal_granted_denied_decisions =
				other.allow_if_equal_granted_denied_decisions;
		}
		if other.timeout.is_some() {
			self.timeout = other.timeout;
		}
		if other.voters.is_some() {
			self.voters = other.voters;
		}
	}

	pub fn finalize(self) -> Result<DecisionConfig, ConfigError> {
		let defaults = DecisionSettings::default();

		let strategy = match self.strategy {
			Some(name) => name.parse::<Strategy>()?,
			None => defaults.strategy,
		};

		let timeout = self.timeout.as_deref().map(parse_timeout).transpose()?;

		Ok(DecisionConfig {
			settings: DecisionSettings {
				strategy,
				allow_if_all_abstain_decisions: self
					.allow_if_all_abstain_decisions
					.unwrap_or(defaults.allow_if_all_abstain_decisions),
				allow_if_equal_granted_denied_decisions: self
					.allow_if_equal_granted_denied_decisions
					.unwrap_or(defaults.allow_if_equal_granted_denied_decisions),
				timeout,
			},
			voters: self.voters.unwrap_or_default(),
		})
	}
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
	let timeout = humantime::parse_duration(value).map_err(|e| ConfigError::InvalidValue {
		key: "decision.timeout".to_string(),
		message: format!("invalid duration '{value}': {e}"),
	})?;
	if timeout.is_zero() {
		return Err(ConfigError::InvalidValue {
			key: "decision.timeout".to_string(),
			message: "timeout must be greater than zero".to_string(),
		});
	}
	Ok(timeout)
}
