// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for access decisions.
//!
//! A denied decision and a failed decision are different things: voters that
//! fail surface as [`DecisionError`] and are never folded into a deny.

use std::time::Duration;

use thiserror::Error;

use crate::types::Attribute;

/// Boxed error returned by voter implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Invalid manager setup. Fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
	/// The manager was built without any voters.
	#[error("access decision manager requires at least one voter")]
	NoVoters,

	/// The configured strategy name is not recognised.
	#[error("unknown decision strategy '{0}': expected affirmative, consensus or unanimous")]
	UnknownStrategy(String),
}

/// A decision could not be reached.
#[derive(Debug, Error)]
pub enum DecisionError {
	/// A voter failed while evaluating an attribute.
	#[error("voter '{voter}' failed on attribute '{attribute}': {source}")]
	Voter {
		voter: String,
		attribute: Attribute,
		#[source]
		source: BoxError,
	},

	/// The decision did not complete within the allotted time.
	#[error("access decision timed out after {0:?}")]
	Timeout(Duration),
}

/// The aggregated decision was deny.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("access denied for attributes [{}]", join_attributes(.attributes))]
pub struct AccessDeniedError {
	pub attributes: Vec<Attribute>,
}

impl AccessDeniedError {
	pub fn new(attributes: &[Attribute]) -> Self {
		Self {
			attributes: attributes.to_vec(),
		}
	}
}

/// Outcome of [`AccessDecisionManager::deny_unless_granted`](crate::AccessDecisionManager::deny_unless_granted).
#[derive(Debug, Error)]
pub enum AccessError {
	#[error(transparent)]
	Denied(#[from] AccessDeniedError),

	#[error(transparent)]
	Decision(#[from] DecisionError),
}

impl AccessError {
	pub fn is_denied(&self) -> bool {
		matches!(self, AccessError::Denied(_))
	}
}

fn join_attributes(attributes: &[Attribute]) -> String {
	attributes
		.iter()
		.map(Attribute::as_str)
		.collect::<Vec<_>>()
		.join(", ")
}
