//! Inventory endpoints for the dyeworks API.
//!
//! Pass-through CRUD over the inventory collection; the only behavior the
//! service adds is id assignment and `last_updated` stamping on every write.

use crate::apis::map_storage_error;
use crate::server::AppState;
use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	response::Json,
};
use chrono::Utc;
use dyeworks_types::{
	ApiError, InventoryItem, InventoryListQuery, StorageKey, UpsertInventoryRequest,
};
use uuid::Uuid;

const KIND: &str = "Inventory item";

/// Handles GET /api/inventory requests.
pub async fn list_inventory(
	State(state): State<AppState>,
	Query(query): Query<InventoryListQuery>,
) -> Result<Json<Vec<InventoryItem>>, ApiError> {
	let mut items: Vec<InventoryItem> = state
		.storage
		.retrieve_all(StorageKey::Inventory.as_str())
		.await
		.map_err(|e| map_storage_error(e, KIND, "*"))?;

	if let Some(ref search) = query.search {
		let needle = search.to_lowercase();
		items.retain(|item| item.name.to_lowercase().contains(&needle));
	}

	if let Some(ref category) = query.category {
		items.retain(|item| &item.category == category);
	}

	if query.low_stock.unwrap_or(false) {
		items.retain(|item| item.is_low_stock());
	}

	Ok(Json(items))
}

/// Handles GET /api/inventory/{id} requests.
pub async fn get_inventory_item(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<InventoryItem>, ApiError> {
	state
		.storage
		.retrieve(StorageKey::Inventory.as_str(), &id)
		.await
		.map(Json)
		.map_err(|e| map_storage_error(e, KIND, &id))
}

/// Handles POST /api/inventory requests.
pub async fn create_inventory_item(
	State(state): State<AppState>,
	Json(request): Json<UpsertInventoryRequest>,
) -> Result<(StatusCode, Json<InventoryItem>), ApiError> {
	let item = InventoryItem {
		id: Uuid::new_v4().to_string(),
		name: request.name,
		category: request.category,
		quantity: request.quantity,
		unit: request.unit,
		threshold: request.threshold,
		last_updated: Utc::now(),
	};

	state
		.storage
		.store(StorageKey::Inventory.as_str(), &item.id, &item)
		.await
		.map_err(|e| map_storage_error(e, KIND, &item.id))?;

	Ok((StatusCode::CREATED, Json(item)))
}

/// Handles PUT /api/inventory/{id} requests.
pub async fn update_inventory_item(
	Path(id): Path<String>,
	State(state): State<AppState>,
	Json(request): Json<UpsertInventoryRequest>,
) -> Result<Json<InventoryItem>, ApiError> {
	let item = InventoryItem {
		id: id.clone(),
		name: request.name,
		category: request.category,
		quantity: request.quantity,
		unit: request.unit,
		threshold: request.threshold,
		last_updated: Utc::now(),
	};

	state
		.storage
		.update(StorageKey::Inventory.as_str(), &id, &item)
		.await
		.map_err(|e| map_storage_error(e, KIND, &id))?;

	Ok(Json(item))
}

/// Handles DELETE /api/inventory/{id} requests.
pub async fn delete_inventory_item(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
	state
		.storage
		.remove(StorageKey::Inventory.as_str(), &id)
		.await
		.map_err(|e| map_storage_error(e, KIND, &id))?;

	Ok(Json(serde_json::json!({
		"message": "Inventory item deleted successfully"
	})))
}
