// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, TOML files and environment variables.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::WardenConfigLayer;
use crate::sections::{DecisionConfigLayer, HttpConfigLayer, LoggingConfigLayer};

/// Default location of the system config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/warden/warden.toml";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<WardenConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<WardenConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(WardenConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is not an error.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new(SYSTEM_CONFIG_PATH)
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<WardenConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(WardenConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: WardenConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: `WARDEN_<SECTION>_<FIELD>`. Voter definitions are only read
/// from config files.
pub struct EnvSource;

impl EnvSource {
	/// Builds a layer from an arbitrary variable lookup.
	pub fn load_with<F>(lookup: F) -> Result<WardenConfigLayer, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

		let port = match var("WARDEN_HTTP_PORT") {
			Some(v) => Some(v.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
				key: "WARDEN_HTTP_PORT".to_string(),
				message: format!("invalid u16 value '{v}'"),
			})?),
			None => None,
		};

		Ok(WardenConfigLayer {
			http: Some(HttpConfigLayer {
				host: var("WARDEN_HTTP_HOST"),
				port,
			}),
			logging: Some(LoggingConfigLayer {
				level: var("WARDEN_LOGGING_LEVEL"),
			}),
			decision: Some(DecisionConfigLayer {
				strategy: var("WARDEN_DECISION_STRATEGY"),
				allow_if_all_abstain_decisions: parse_bool(
					"WARDEN_DECISION_ALLOW_IF_ALL_ABSTAIN_DECISIONS",
					var("WARDEN_DECISION_ALLOW_IF_ALL_ABSTAIN_DECISIONS"),
				)?,
				allow_if_equal_granted_denied_decisions: parse_bool(
					"WARDEN_DECISION_ALLOW_IF_EQUAL_GRANTED_DENIED_DECISIONS",
					var("WARDEN_DECISION_ALLOW_IF_EQUAL_GRANTED_DENIED_DECISIONS"),
				)?,
				timeout: var("WARDEN_DECISION_TIMEOUT"),
				voters: None,
			}),
		})
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<WardenConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Self::load_with(|name| std::env::var(name).ok())
	}
}

fn parse_bool(key: &str, value: Option<String>) -> Result<Option<bool>, ConfigError> {
	match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
		None => Ok(None),
		Some("1" | "true" | "yes") => Ok(Some(true)),
		Some("0" | "false" | "no") => Ok(Some(false)),
		Some(other) => Err(ConfigError::InvalidValue {
			key: key.to_string(),
			message: format!("invalid boolean value '{other}'"),
		}),
	}
}
