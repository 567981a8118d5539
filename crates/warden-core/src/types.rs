// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Type definitions for access decisions.
//!
//! - [`Subject`]: the identity requesting access (roles and claims)
//! - [`Attribute`]: the permission being checked ("VIEW", "EDIT", "ROLE_ADMIN")
//! - [`Resource`]: the object being accessed, if any
//! - [`Vote`]: the output of one voter for one attribute
//! - [`Strategy`]: how votes combine into one decision
//!
//! Subjects and resources are computed before a decision and passed to voters
//! by reference. Voters never mutate them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigurationError;

/// The identity requesting access.
///
/// Upstream authentication builds a subject and places it in the request
/// extensions; the decision engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
	pub id: String,
	#[serde(default)]
	pub roles: Vec<String>,
	#[serde(default)]
	pub claims: Map<String, Value>,
}

impl Subject {
	/// Creates a subject with no roles or claims.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			roles: Vec::new(),
			claims: Map::new(),
		}
	}

	pub fn with_role(mut self, role: impl Into<String>) -> Self {
		self.roles.push(role.into());
		self
	}

	pub fn with_roles<I, R>(mut self, roles: I) -> Self
	where
		I: IntoIterator<Item = R>,
		R: Into<String>,
	{
		self.roles.extend(roles.into_iter().map(Into::into));
		self
	}

	pub fn with_claim(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.claims.insert(key.into(), value.into());
		self
	}

	/// Returns true if the subject holds the given role.
	pub fn has_role(&self, role: &str) -> bool {
		self.roles.iter().any(|r| r == role)
	}

	pub fn claim(&self, key: &str) -> Option<&Value> {
		self.claims.get(key)
	}
}

/// A permission name checked against a subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attribute(String);

impl Attribute {
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Attribute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Attribute {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl From<String> for Attribute {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl AsRef<str> for Attribute {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// The object access is being checked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
	pub kind: String,
	#[serde(default)]
	pub id: Option<String>,
	#[serde(default)]
	pub owner_id: Option<String>,
	#[serde(default)]
	pub attributes: Map<String, Value>,
}

impl Resource {
	pub fn new(kind: impl Into<String>) -> Self {
		Self {
			kind: kind.into(),
			id: None,
			owner_id: None,
			attributes: Map::new(),
		}
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
		self.owner_id = Some(owner_id.into());
		self
	}

	pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.attributes.insert(key.into(), value.into());
		self
	}

	/// Returns true if the resource is owned by the given subject.
	pub fn is_owned_by(&self, subject: &Subject) -> bool {
		self
			.owner_id
			.as_deref()
			.map(|owner| owner == subject.id)
			.unwrap_or(false)
	}
}

/// The output of one voter evaluation.
///
/// `Abstain` means "no opinion", not "no". Only `Grant` and `Deny` are counted
/// by the consensus strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
	Grant,
	Deny,
	Abstain,
}

impl fmt::Display for Vote {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Vote::Grant => f.write_str("grant"),
			Vote::Deny => f.write_str("deny"),
			Vote::Abstain => f.write_str("abstain"),
		}
	}
}

/// How votes for one attribute combine into a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
	/// Grant as soon as one voter grants.
	#[default]
	Affirmative,
	/// Grant when grants outnumber denials.
	Consensus,
	/// Deny as soon as one voter denies.
	Unanimous,
}

impl Strategy {
	pub fn as_str(&self) -> &'static str {
		match self {
			Strategy::Affirmative => "affirmative",
			Strategy::Consensus => "consensus",
			Strategy::Unanimous => "unanimous",
		}
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Strategy {
	type Err = ConfigurationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"affirmative" => Ok(Strategy::Affirmative),
			"consensus" => Ok(Strategy::Consensus),
			"unanimous" => Ok(Strategy::Unanimous),
			_ => Err(ConfigurationError::UnknownStrategy(s.to_string())),
		}
	}
}
