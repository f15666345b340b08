//! Main entry point for the dyeworks service.
//!
//! This binary serves the REST API of the dyeing-workshop operations tool:
//! order lifecycle management, inventory stock, and staff records. Storage
//! backends are pluggable and selected through configuration.

use clap::Parser;
use dyeworks_config::Config;
use dyeworks_order::OrderService;
use dyeworks_storage::{StorageFactory, StorageService};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

mod apis;
mod server;

/// Command-line arguments for the dyeworks service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the dyeworks service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the storage gateway and order service
/// 5. Serves the REST API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	// Create env filter with default from args
	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	// Load configuration
	let config_path = args
		.config
		.to_str()
		.ok_or("Configuration path is not valid UTF-8")?;
	let config = Config::from_file(config_path)?;
	tracing::info!("Loaded configuration [{}]", config.workshop.id);

	// Build the storage gateway and the services on top of it
	let storage = Arc::new(build_storage(&config)?);
	let orders = Arc::new(OrderService::new(Arc::clone(&storage)));

	let state = server::AppState {
		orders,
		storage,
		config: config.clone(),
	};

	match config.api {
		Some(api_config) if api_config.enabled => {
			server::start_server(api_config, state).await?;
		}
		_ => {
			tracing::warn!("API server is disabled in configuration; nothing to serve");
		}
	}

	tracing::info!("Stopped dyeworks service");
	Ok(())
}

/// Builds the storage service from configuration.
///
/// Selects the configured primary backend from the registered
/// implementations and constructs it with its own configuration table. The
/// resulting backend is owned by the returned StorageService; its lifecycle
/// ends when the service is dropped.
fn build_storage(config: &Config) -> Result<StorageService, Box<dyn std::error::Error>> {
	let factories: HashMap<&'static str, StorageFactory> =
		dyeworks_storage::get_all_implementations().into_iter().collect();

	let factory = factories
		.get(config.storage.primary.as_str())
		.ok_or_else(|| format!("Unknown storage implementation: {}", config.storage.primary))?;

	let implementation_config = config
		.storage
		.implementations
		.get(&config.storage.primary)
		.cloned()
		.unwrap_or(toml::Value::Table(toml::map::Map::new()));

	let backend = factory(&implementation_config)?;
	Ok(StorageService::new(backend))
}

#[cfg(test)]
mod tests {
	use super::*;
	use dyeworks_config::{StorageConfig, WorkshopConfig};
	use toml::Value;

	/// Creates a minimal test configuration for unit testing
	fn create_test_config(primary: &str) -> Config {
		Config {
			workshop: WorkshopConfig {
				id: "test-workshop".to_string(),
				name: "Dyeworks".to_string(),
			},
			storage: StorageConfig {
				primary: primary.to_string(),
				implementations: {
					let mut map = HashMap::new();
					map.insert(primary.to_string(), Value::Table(toml::map::Map::new()));
					map
				},
			},
			api: None,
		}
	}

	#[test]
	fn test_args_default_values() {
		let args = Args {
			config: PathBuf::from("config.toml"),
			log_level: "info".to_string(),
		};

		assert_eq!(args.config, PathBuf::from("config.toml"));
		assert_eq!(args.log_level, "info");
	}

	#[test]
	fn test_all_storage_implementations_registered() {
		let factories: HashMap<&'static str, StorageFactory> =
			dyeworks_storage::get_all_implementations().into_iter().collect();

		assert_eq!(factories.len(), 2);
		assert!(factories.contains_key("memory"));
		assert!(factories.contains_key("file"));
	}

	#[test]
	fn test_build_storage_with_memory_backend() {
		let config = create_test_config("memory");
		let result = build_storage(&config);
		assert!(result.is_ok(), "Failed to build storage: {:?}", result.err());
	}

	#[test]
	fn test_build_storage_rejects_unknown_backend() {
		let config = create_test_config("redis");
		let result = build_storage(&config);
		assert!(result.is_err());
	}

	#[tokio::test]
	async fn test_build_storage_with_file_backend() {
		let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

		let mut config = create_test_config("file");
		let mut table = toml::map::Map::new();
		table.insert(
			"storage_path".to_string(),
			Value::String(temp_dir.path().to_str().unwrap().to_string()),
		);
		config
			.storage
			.implementations
			.insert("file".to_string(), Value::Table(table));

		let storage = build_storage(&config).expect("Failed to build file storage");
		storage
			.store("orders", "probe", &serde_json::json!({"id": "probe"}))
			.await
			.unwrap();
		assert!(storage.exists("orders", "probe").await.unwrap());
	}
}
