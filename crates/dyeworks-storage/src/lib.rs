//! Storage module for the dyeworks system.
//!
//! This module provides abstractions for persistent storage of workshop
//! records, supporting different backend implementations such as in-memory
//! or file-based storage. It is the single gateway every other component
//! goes through to read or write records: backends are explicitly
//! constructed from configuration and owned by the [`StorageService`], never
//! reached through process-wide globals.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// Error that occurs when a requested record is not found.
	#[error("Not found")]
	NotFound,
	/// Error that occurs during serialization/deserialization.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the low-level interface for storage backends.
///
/// This trait must be implemented by any storage backend that wants to
/// integrate with the dyeworks service. It provides basic key-value
/// operations plus enumeration of the records in a namespace, which the
/// listing endpoints are built on.
#[async_trait]
pub trait StorageInterface: Send + Sync {
	/// Retrieves raw bytes for the given key.
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError>;

	/// Stores raw bytes under the given key, creating or overwriting.
	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

	/// Deletes the value associated with the given key.
	async fn delete(&self, key: &str) -> Result<(), StorageError>;

	/// Checks if a key exists in storage.
	async fn exists(&self, key: &str) -> Result<bool, StorageError>;

	/// Lists the record ids stored under the given namespace.
	async fn list_keys(&self, namespace: &str) -> Result<Vec<String>, StorageError>;
}

/// Type alias for storage factory functions.
///
/// This is the function signature that all storage implementations must
/// provide to create instances of their storage interface.
pub type StorageFactory = fn(&toml::Value) -> Result<Box<dyn StorageInterface>, StorageError>;

/// Get all registered storage implementations.
///
/// Returns a vector of (name, factory) tuples for all available storage
/// implementations. The service binary uses this to build its factory map.
pub fn get_all_implementations() -> Vec<(&'static str, StorageFactory)> {
	use implementations::{file, memory};

	vec![
		("file", file::create_storage as StorageFactory),
		("memory", memory::create_storage as StorageFactory),
	]
}

/// High-level storage service that provides typed operations.
///
/// The StorageService wraps a low-level storage backend and provides
/// convenient methods for storing and retrieving typed records with
/// automatic serialization/deserialization. Records are addressed by a
/// namespace (collection name) and an id.
pub struct StorageService {
	/// The underlying storage backend implementation.
	backend: Box<dyn StorageInterface>,
}

impl StorageService {
	/// Creates a new StorageService owning the specified backend.
	pub fn new(backend: Box<dyn StorageInterface>) -> Self {
		Self { backend }
	}

	/// Stores a serializable record, creating or overwriting.
	///
	/// The namespace and id are combined to form a unique key. The record is
	/// serialized to JSON before storage.
	pub async fn store<T: Serialize>(
		&self,
		namespace: &str,
		id: &str,
		data: &T,
	) -> Result<(), StorageError> {
		let key = format!("{}:{}", namespace, id);
		let bytes =
			serde_json::to_vec(data).map_err(|e| StorageError::Serialization(e.to_string()))?;
		self.backend.set_bytes(&key, bytes).await
	}

	/// Retrieves and deserializes a record from storage.
	///
	/// The namespace and id are combined to form the lookup key. The
	/// retrieved bytes are deserialized from JSON.
	pub async fn retrieve<T: DeserializeOwned>(
		&self,
		namespace: &str,
		id: &str,
	) -> Result<T, StorageError> {
		let key = format!("{}:{}", namespace, id);
		let bytes = self.backend.get_bytes(&key).await?;
		serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
	}

	/// Retrieves every record stored under a namespace.
	///
	/// Records that vanish between the listing and the read (a concurrent
	/// delete) are skipped rather than failing the whole listing.
	pub async fn retrieve_all<T: DeserializeOwned>(
		&self,
		namespace: &str,
	) -> Result<Vec<T>, StorageError> {
		let ids = self.backend.list_keys(namespace).await?;
		let mut records = Vec::with_capacity(ids.len());

		for id in ids {
			match self.retrieve(namespace, &id).await {
				Ok(record) => records.push(record),
				Err(StorageError::NotFound) => {
					tracing::debug!("Record {}:{} disappeared during listing", namespace, id);
				}
				Err(e) => return Err(e),
			}
		}

		Ok(records)
	}

	/// Updates an existing record in storage.
	///
	/// This method first checks if the key exists, then updates the value.
	/// Returns an error if the key doesn't exist, making it semantically
	/// different from store() which will create or overwrite.
	pub async fn update<T: Serialize>(
		&self,
		namespace: &str,
		id: &str,
		data: &T,
	) -> Result<(), StorageError> {
		let key = format!("{}:{}", namespace, id);

		// Check if the key exists first
		if !self.backend.exists(&key).await? {
			return Err(StorageError::NotFound);
		}

		let bytes =
			serde_json::to_vec(data).map_err(|e| StorageError::Serialization(e.to_string()))?;
		self.backend.set_bytes(&key, bytes).await
	}

	/// Removes a record from storage.
	///
	/// Returns NotFound if no record existed under the key, so callers can
	/// report deletions of unknown ids.
	pub async fn remove(&self, namespace: &str, id: &str) -> Result<(), StorageError> {
		let key = format!("{}:{}", namespace, id);

		if !self.backend.exists(&key).await? {
			return Err(StorageError::NotFound);
		}

		self.backend.delete(&key).await
	}

	/// Checks if a record exists in storage.
	pub async fn exists(&self, namespace: &str, id: &str) -> Result<bool, StorageError> {
		let key = format!("{}:{}", namespace, id);
		self.backend.exists(&key).await
	}

	/// Counts the records stored under a namespace.
	pub async fn count(&self, namespace: &str) -> Result<usize, StorageError> {
		Ok(self.backend.list_keys(namespace).await?.len())
	}
}

#[cfg(test)]
mod tests {
	use super::implementations::memory::MemoryStorage;
	use super::*;
	use serde::Deserialize;

	#[derive(Debug, PartialEq, Serialize, Deserialize)]
	struct Record {
		name: String,
		quantity: f64,
	}

	fn service() -> StorageService {
		StorageService::new(Box::new(MemoryStorage::new()))
	}

	#[tokio::test]
	async fn store_and_retrieve_round_trip() {
		let storage = service();
		let record = Record {
			name: "Indigo dye".into(),
			quantity: 12.5,
		};

		storage.store("inventory", "a1", &record).await.unwrap();
		let back: Record = storage.retrieve("inventory", "a1").await.unwrap();
		assert_eq!(back, record);
	}

	#[tokio::test]
	async fn update_requires_existing_record() {
		let storage = service();
		let record = Record {
			name: "Raw cotton".into(),
			quantity: 100.0,
		};

		let result = storage.update("inventory", "missing", &record).await;
		assert!(matches!(result, Err(StorageError::NotFound)));

		storage.store("inventory", "b2", &record).await.unwrap();
		storage.update("inventory", "b2", &record).await.unwrap();
	}

	#[tokio::test]
	async fn remove_unknown_record_reports_not_found() {
		let storage = service();
		let result = storage.remove("orders", "nope").await;
		assert!(matches!(result, Err(StorageError::NotFound)));
	}

	#[tokio::test]
	async fn retrieve_all_returns_namespace_contents_only() {
		let storage = service();
		for (id, name) in [("1", "a"), ("2", "b"), ("3", "c")] {
			storage
				.store(
					"staff",
					id,
					&Record {
						name: name.into(),
						quantity: 0.0,
					},
				)
				.await
				.unwrap();
		}
		storage
			.store(
				"orders",
				"other",
				&Record {
					name: "x".into(),
					quantity: 0.0,
				},
			)
			.await
			.unwrap();

		let records: Vec<Record> = storage.retrieve_all("staff").await.unwrap();
		assert_eq!(records.len(), 3);
		assert_eq!(storage.count("orders").await.unwrap(), 1);
	}
}
