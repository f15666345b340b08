//! Staff endpoints for the dyeworks API.
//!
//! Pass-through CRUD over the staff collection. New records default to
//! "active" status and a join date of now when the caller omits them.

use crate::apis::map_storage_error;
use crate::server::AppState;
use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::Json,
};
use chrono::Utc;
use dyeworks_types::{ApiError, StaffMember, StorageKey, UpsertStaffRequest, STAFF_STATUS_ACTIVE};
use uuid::Uuid;

const KIND: &str = "Staff member";

/// Handles GET /api/staff requests.
pub async fn list_staff(State(state): State<AppState>) -> Result<Json<Vec<StaffMember>>, ApiError> {
	state
		.storage
		.retrieve_all(StorageKey::Staff.as_str())
		.await
		.map(Json)
		.map_err(|e| map_storage_error(e, KIND, "*"))
}

/// Handles GET /api/staff/{id} requests.
pub async fn get_staff_member(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<StaffMember>, ApiError> {
	state
		.storage
		.retrieve(StorageKey::Staff.as_str(), &id)
		.await
		.map(Json)
		.map_err(|e| map_storage_error(e, KIND, &id))
}

/// Handles POST /api/staff requests.
pub async fn create_staff_member(
	State(state): State<AppState>,
	Json(request): Json<UpsertStaffRequest>,
) -> Result<(StatusCode, Json<StaffMember>), ApiError> {
	let member = StaffMember {
		id: Uuid::new_v4().to_string(),
		name: request.name,
		position: request.position,
		department: request.department,
		email: request.email,
		phone: request.phone,
		join_date: request.join_date.unwrap_or_else(Utc::now),
		status: request
			.status
			.unwrap_or_else(|| STAFF_STATUS_ACTIVE.to_string()),
	};

	state
		.storage
		.store(StorageKey::Staff.as_str(), &member.id, &member)
		.await
		.map_err(|e| map_storage_error(e, KIND, &member.id))?;

	Ok((StatusCode::CREATED, Json(member)))
}

/// Handles PUT /api/staff/{id} requests.
pub async fn update_staff_member(
	Path(id): Path<String>,
	State(state): State<AppState>,
	Json(request): Json<UpsertStaffRequest>,
) -> Result<Json<StaffMember>, ApiError> {
	// Keep the stored join date and status when the edit omits them
	let existing: StaffMember = state
		.storage
		.retrieve(StorageKey::Staff.as_str(), &id)
		.await
		.map_err(|e| map_storage_error(e, KIND, &id))?;

	let member = StaffMember {
		id: id.clone(),
		name: request.name,
		position: request.position,
		department: request.department,
		email: request.email,
		phone: request.phone,
		join_date: request.join_date.unwrap_or(existing.join_date),
		status: request.status.unwrap_or(existing.status),
	};

	state
		.storage
		.update(StorageKey::Staff.as_str(), &id, &member)
		.await
		.map_err(|e| map_storage_error(e, KIND, &id))?;

	Ok(Json(member))
}

/// Handles DELETE /api/staff/{id} requests.
pub async fn delete_staff_member(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
	state
		.storage
		.remove(StorageKey::Staff.as_str(), &id)
		.await
		.map_err(|e| map_storage_error(e, KIND, &id))?;

	Ok(Json(serde_json::json!({
		"message": "Staff member deleted successfully"
	})))
}
