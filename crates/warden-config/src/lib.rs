// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for Warden.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`WARDEN_*`)
//!
//! # Usage
//!
//! ```ignore
//! use warden_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::WardenConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::PathBuf;

use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct WardenConfig {
	pub http: HttpConfig,
	pub logging: LoggingConfig,
	pub decision: DecisionConfig,
}

impl WardenConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`WARDEN_*`)
/// 2. Config file (`/etc/warden/warden.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<WardenConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<WardenConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge the given sources by precedence and resolve the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<WardenConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = WardenConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: WardenConfigLayer) -> Result<WardenConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let decision = layer.decision.unwrap_or_default().finalize()?;

	validate_config(&http)?;

	info!(
		host = %http.host,
		port = http.port,
		strategy = %decision.settings.strategy,
		voters = decision.voters.len(),
		timeout = ?decision.settings.timeout,
		"Warden configuration loaded"
	);

	Ok(WardenConfig {
		http,
		logging,
		decision,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(http: &HttpConfig) -> Result<(), ConfigError> {
	if http.port == 0 {
		return Err(ConfigError::Validation(
			"http.port must be non-zero".to_string(),
		));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use warden_core::Strategy;

	struct FixedSource {
		precedence: Precedence,
		layer: WardenConfigLayer,
	}

	impl ConfigSource for FixedSource {
		fn name(&self) -> &'static str {
			"fixed"
		}

		fn precedence(&self) -> Precedence {
			self.precedence
		}

		fn load(&self) -> Result<WardenConfigLayer, ConfigError> {
			Ok(self.layer.clone())
		}
	}

	fn strategy_layer(strategy: &str) -> WardenConfigLayer {
		WardenConfigLayer {
			decision: Some(DecisionConfigLayer {
				strategy: Some(strategy.to_string()),
				..Default::default()
			}),
			..Default::default()
		}
	}

	#[test]
	fn test_defaults() {
		let config = load_from_sources(vec![Box::new(DefaultsSource)]).unwrap();
		assert_eq!(config.socket_addr(), "0.0.0.0:8080");
		assert_eq!(config.logging.level, "info");
		assert_eq!(config.decision.settings.strategy, Strategy::Affirmative);
	}

	#[test]
	fn test_higher_precedence_wins_regardless_of_order() {
		let config = load_from_sources(vec![
			Box::new(FixedSource {
				precedence: Precedence::Environment,
				layer: strategy_layer("unanimous"),
			}),
			Box::new(FixedSource {
				precedence: Precedence::ConfigFile,
				layer: strategy_layer("consensus"),
			}),
		])
		.unwrap();

		assert_eq!(config.decision.settings.strategy, Strategy::Unanimous);
	}

	#[test]
	fn test_zero_port_rejected() {
		let layer = WardenConfigLayer {
			http: Some(HttpConfigLayer {
				host: None,
				port: Some(0),
			}),
			..Default::default()
		};
		let result = load_from_sources(vec![Box::new(FixedSource {
			precedence: Precedence::ConfigFile,
			layer,
		})]);
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	proptest! {
		#[test]
		fn env_port_always_overrides_file_port(file_port in 1u16.., env_port in 1u16..) {
			let file = WardenConfigLayer {
				http: Some(HttpConfigLayer { host: None, port: Some(file_port) }),
				..Default::default()
			};
			let env = WardenConfigLayer {
				http: Some(HttpConfigLayer { host: None, port: Some(env_port) }),
				..Default::default()
			};
			let config = load_from_sources(vec![
				Box::new(FixedSource { precedence: Precedence::Environment, layer: env }),
				Box::new(FixedSource { precedence: Precedence::ConfigFile, layer: file }),
			]).unwrap();
			prop_assert_eq!(config.http.port, env_port);
		}
	}
}
