//! Configuration module for the dyeworks system.
//!
//! This module provides structures and utilities for managing service
//! configuration. It supports loading configuration from TOML files with
//! environment-variable resolution and provides validation to ensure all
//! required configuration values are properly set.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the dyeworks service.
///
/// This structure contains all configuration sections required for the
/// service to operate: workshop identity, the storage backend, and the HTTP
/// API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to this workshop instance.
	pub workshop: WorkshopConfig,
	/// Configuration for the storage backend.
	pub storage: StorageConfig,
	/// Configuration for the HTTP API server.
	pub api: Option<ApiConfig>,
}

/// Configuration specific to a workshop instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkshopConfig {
	/// Unique identifier for this instance, used in log output.
	pub id: String,
	/// Display name of the dyeing company.
	#[serde(default = "default_workshop_name")]
	pub name: String,
}

/// Returns the default workshop display name.
fn default_workshop_name() -> String {
	"Dyeworks".to_string()
}

/// Configuration for the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of storage implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
	/// Whether the API server is enabled.
	#[serde(default)]
	pub enabled: bool,
	/// Host address to bind the server to.
	#[serde(default = "default_api_host")]
	pub host: String,
	/// Port to bind the server to.
	#[serde(default = "default_api_port")]
	pub port: u16,
}

/// Returns the default API host.
///
/// This provides a default host address of 127.0.0.1 (localhost) for the API
/// server when no explicit host is configured.
fn default_api_host() -> String {
	"127.0.0.1".to_string()
}

/// Returns the default API port.
///
/// This provides a default port of 5000 for the API server when no explicit
/// port is configured, matching the port the original deployment served on.
fn default_api_port() -> u16 {
	5000
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	// Limit input size to prevent ReDoS attacks
	const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = input.to_string();

	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).ok_or_else(|| {
			ConfigError::Parse("Invalid capture group in environment resolution".to_string())
		})?;
		let var_name = cap.get(1).map(|m| m.as_str()).unwrap_or_default();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' is not set and has no default",
						var_name
					)))
				}
			},
		};

		result = result.replace(full_match.as_str(), &value);
	}

	Ok(result)
}

impl Config {
	/// Loads configuration from a TOML file.
	///
	/// Environment variables referenced as ${VAR} or ${VAR:-default} are
	/// resolved before parsing, and the result is validated.
	pub fn from_file(path: &str) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		let resolved = resolve_env_vars(&content)?;
		let config: Config = resolved.parse()?;
		config.validate()?;
		Ok(config)
	}

	/// Validates the loaded configuration.
	///
	/// Checks that the selected primary storage implementation actually has
	/// a configuration entry, and that the instance id is non-empty.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.workshop.id.trim().is_empty() {
			return Err(ConfigError::Validation(
				"workshop.id must not be empty".to_string(),
			));
		}

		if !self
			.storage
			.implementations
			.contains_key(&self.storage.primary)
		{
			return Err(ConfigError::Validation(format!(
				"storage.primary '{}' has no matching entry under storage.implementations",
				self.storage.primary
			)));
		}

		Ok(())
	}
}

impl std::str::FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let config: Config = toml::from_str(s)?;
		Ok(config)
	}
}
