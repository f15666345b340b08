//! REST endpoint implementations for the dyeworks API.

pub mod inventory;
pub mod order;
pub mod staff;

use dyeworks_order::OrderError;
use dyeworks_storage::StorageError;
use dyeworks_types::ApiError;

/// Maps an order-engine error onto the API error contract.
pub fn map_order_error(err: OrderError) -> ApiError {
	match err {
		OrderError::InvalidOrder(message) => ApiError::BadRequest {
			error_type: "INVALID_ORDER".to_string(),
			message,
		},
		OrderError::NotFound(id) => ApiError::NotFound {
			error_type: "ORDER_NOT_FOUND".to_string(),
			message: format!("Order not found: {}", id),
		},
		OrderError::Storage(e) => ApiError::InternalServerError {
			error_type: "STORAGE_ERROR".to_string(),
			message: e.to_string(),
		},
	}
}

/// Maps a storage-gateway error onto the API error contract.
///
/// `kind` names the record type ("Inventory item", "Staff member") for the
/// not-found message.
pub fn map_storage_error(err: StorageError, kind: &str, id: &str) -> ApiError {
	match err {
		StorageError::NotFound => ApiError::NotFound {
			error_type: "NOT_FOUND".to_string(),
			message: format!("{} not found: {}", kind, id),
		},
		other => ApiError::InternalServerError {
			error_type: "STORAGE_ERROR".to_string(),
			message: other.to_string(),
		},
	}
}
