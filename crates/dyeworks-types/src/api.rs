//! API types for the dyeworks HTTP API.
//!
//! This module defines the request and response types for the REST endpoints
//! exposed to the presentation layer, along with a structured error type that
//! maps onto HTTP status codes.

use crate::order::{DateField, OrderItem, OrderStatus, SortDirection, SortField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request body for creating a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
	/// Display name of the placing customer.
	pub customer_name: String,
	/// Line items; must contain at least one entry.
	pub items: Vec<OrderItem>,
	/// Optional customer annotation.
	#[serde(default)]
	pub notes: String,
}

/// Request body for a status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
	/// The status to move the order into.
	pub status: OrderStatus,
	/// Optional human note; a default note is recorded when absent.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,
}

/// Query parameters accepted by the order listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
	/// Case-insensitive substring matched against tracking number and
	/// customer name.
	pub search: Option<String>,
	/// Exact customer name filter (the customer-facing screens scope all
	/// listings to the signed-in customer).
	pub customer: Option<String>,
	/// Inclusive lower bound of the date range filter.
	pub from: Option<DateTime<Utc>>,
	/// Inclusive upper bound of the date range filter.
	pub to: Option<DateTime<Utc>>,
	/// Which date the range applies to; defaults to the creation date.
	pub date_field: Option<DateField>,
	/// Field to sort by; defaults to the creation date.
	pub sort: Option<SortField>,
	/// Sort direction; defaults to descending (newest first).
	pub direction: Option<SortDirection>,
}

/// Query parameters accepted by the inventory listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryListQuery {
	/// Case-insensitive substring matched against the item name.
	pub search: Option<String>,
	/// Exact category filter.
	pub category: Option<String>,
	/// When true, only items below their stock threshold are returned.
	pub low_stock: Option<bool>,
}

/// Request body for creating an inventory record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertInventoryRequest {
	pub name: String,
	pub category: String,
	pub quantity: f64,
	pub unit: String,
	pub threshold: f64,
}

/// Request body for creating or updating a staff record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertStaffRequest {
	pub name: String,
	pub position: String,
	pub department: String,
	pub email: String,
	pub phone: String,
	/// Defaults to now when absent.
	pub join_date: Option<DateTime<Utc>>,
	/// Defaults to "active" when absent.
	pub status: Option<String>,
}

/// Health report for the service, including per-collection record counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
	/// Always "ok" when the storage backend is reachable.
	pub status: String,
	/// Record counts keyed by collection name.
	pub collections: std::collections::HashMap<String, usize>,
}

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Error type/code, e.g. "ORDER_NOT_FOUND".
	pub error: String,
	/// Human-readable description.
	pub message: String,
	/// Additional error context.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<serde_json::Value>,
}

/// Structured API error type with appropriate HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
	/// Bad request with validation errors (400)
	BadRequest { error_type: String, message: String },
	/// Referenced record does not exist (404)
	NotFound { error_type: String, message: String },
	/// Internal server error (500)
	InternalServerError { error_type: String, message: String },
}

impl ApiError {
	/// Get the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			ApiError::BadRequest { .. } => 400,
			ApiError::NotFound { .. } => 404,
			ApiError::InternalServerError { .. } => 500,
		}
	}

	/// Convert to ErrorResponse for JSON serialization.
	pub fn to_error_response(&self) -> ErrorResponse {
		match self {
			ApiError::BadRequest {
				error_type,
				message,
			}
			| ApiError::NotFound {
				error_type,
				message,
			}
			| ApiError::InternalServerError {
				error_type,
				message,
			} => ErrorResponse {
				error: error_type.clone(),
				message: message.clone(),
				details: None,
			},
		}
	}
}

impl fmt::Display for ApiError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ApiError::BadRequest { message, .. } => write!(f, "Bad Request: {}", message),
			ApiError::NotFound { message, .. } => write!(f, "Not Found: {}", message),
			ApiError::InternalServerError { message, .. } => {
				write!(f, "Internal Server Error: {}", message)
			}
		}
	}
}

impl std::error::Error for ApiError {}

impl axum::response::IntoResponse for ApiError {
	fn into_response(self) -> axum::response::Response {
		use axum::{http::StatusCode, response::Json};

		let status = match self.status_code() {
			400 => StatusCode::BAD_REQUEST,
			404 => StatusCode::NOT_FOUND,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		};

		let error_response = self.to_error_response();
		(status, Json(error_response)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn api_error_status_codes() {
		let bad = ApiError::BadRequest {
			error_type: "INVALID_ORDER".into(),
			message: "empty items".into(),
		};
		let missing = ApiError::NotFound {
			error_type: "ORDER_NOT_FOUND".into(),
			message: "no such order".into(),
		};
		assert_eq!(bad.status_code(), 400);
		assert_eq!(missing.status_code(), 404);
		assert_eq!(missing.to_error_response().error, "ORDER_NOT_FOUND");
	}

	#[test]
	fn list_query_parses_from_camel_case() {
		let query: OrderListQuery = serde_json::from_str(
			r#"{"search":"DYE","dateField":"deliveredAt","sort":"totalAmount","direction":"desc"}"#,
		)
		.unwrap();
		assert_eq!(query.search.as_deref(), Some("DYE"));
		assert_eq!(query.date_field, Some(DateField::DeliveredAt));
		assert_eq!(query.sort, Some(SortField::TotalAmount));
		assert_eq!(query.direction, Some(SortDirection::Desc));
	}
}
