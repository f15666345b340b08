//! File-based storage backend implementation for the dyeworks service.
//!
//! This module provides a filesystem implementation of the StorageInterface
//! trait. Each record is stored as one JSON document under
//! `<base>/<namespace>/<id>.json`, giving simple durable persistence without
//! an external database.

use crate::{StorageError, StorageInterface};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage implementation.
///
/// Records live in one directory per namespace. Writes are atomic: data is
/// written to a temporary file and renamed into place, so a crash mid-write
/// never leaves a truncated record behind.
pub struct FileStorage {
	/// Base directory path for storing record files.
	base_path: PathBuf,
}

impl FileStorage {
	/// Creates a new FileStorage instance rooted at the specified base path.
	pub fn new(base_path: PathBuf) -> Self {
		Self { base_path }
	}

	/// Converts a `namespace:id` storage key to a filesystem path.
	///
	/// Sanitizes both components so ids cannot escape the base directory.
	fn get_file_path(&self, key: &str) -> PathBuf {
		let (namespace, id) = match key.split_once(':') {
			Some((namespace, id)) => (namespace, id),
			None => ("", key),
		};
		let safe_namespace = sanitize(namespace);
		let safe_id = sanitize(id);
		self.base_path
			.join(safe_namespace)
			.join(format!("{}.json", safe_id))
	}

	fn namespace_dir(&self, namespace: &str) -> PathBuf {
		self.base_path.join(sanitize(namespace))
	}
}

/// Replaces path-hostile characters so keys map onto flat file names.
fn sanitize(component: &str) -> String {
	component.replace(['/', '\\', ':', '.'], "_")
}

#[async_trait]
impl StorageInterface for FileStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		let path = self.get_file_path(key);

		match fs::read(&path).await {
			Ok(data) => Ok(data),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound),
			Err(e) => Err(StorageError::Backend(e.to_string())),
		}
	}

	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
		let path = self.get_file_path(key);

		// Create parent directory if it doesn't exist
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)
				.await
				.map_err(|e| StorageError::Backend(e.to_string()))?;
		}

		// Write atomically by writing to temp file then renaming
		let temp_path = path.with_extension("tmp");
		fs::write(&temp_path, value)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?;

		fs::rename(&temp_path, &path)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?;

		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<(), StorageError> {
		let path = self.get_file_path(key);

		match fs::remove_file(&path).await {
			Ok(_) => Ok(()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(StorageError::Backend(e.to_string())),
		}
	}

	async fn exists(&self, key: &str) -> Result<bool, StorageError> {
		let path = self.get_file_path(key);
		Ok(path.exists())
	}

	async fn list_keys(&self, namespace: &str) -> Result<Vec<String>, StorageError> {
		let dir = self.namespace_dir(namespace);

		// A namespace nothing has been written to yet is simply empty
		if !dir.exists() {
			return Ok(Vec::new());
		}

		let mut ids = Vec::new();
		let mut entries = fs::read_dir(&dir)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?;

		while let Some(entry) = entries
			.next_entry()
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?
		{
			let path = entry.path();
			if path.extension() == Some(std::ffi::OsStr::new("json")) {
				if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
					ids.push(stem.to_string());
				}
			} else {
				tracing::debug!("Skipping non-record file {:?}", path);
			}
		}

		Ok(ids)
	}
}

/// Factory function to create a file storage backend from configuration.
///
/// Configuration parameters:
/// - `storage_path`: Base directory for record files (default: "./data/storage")
pub fn create_storage(config: &toml::Value) -> Result<Box<dyn StorageInterface>, StorageError> {
	let storage_path = config
		.get("storage_path")
		.and_then(|v| v.as_str())
		.unwrap_or("./data/storage")
		.to_string();

	let path = Path::new(&storage_path);
	if path.exists() && !path.is_dir() {
		return Err(StorageError::Configuration(format!(
			"storage_path '{}' exists and is not a directory",
			storage_path
		)));
	}

	Ok(Box::new(FileStorage::new(PathBuf::from(storage_path))))
}
