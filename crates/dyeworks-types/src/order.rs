//! Order types for the dyeworks system.
//!
//! This module defines the order aggregate and its supporting types: line
//! items, the status state machine, and the append-only status history used
//! throughout the order lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One line item of a dyeing job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
	/// Material name, e.g. "Cotton". Free text; pricing falls back to a
	/// default rate for names outside the known table.
	pub fabric: String,
	/// Requested dye color, free text.
	pub color: String,
	/// Amount of material in `unit`s. Must be positive.
	pub quantity: f64,
	/// Unit label such as "meters". Descriptive only, never converted.
	pub unit: String,
}

/// Status of an order as it moves through the dyeing workshop.
///
/// The normal progression is `pending → processing → ready → completed`,
/// with `cancelled` reachable from any non-terminal state. Backward
/// transitions are accepted as manual corrections and only recorded, never
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	/// Order received, not yet picked up by the workshop.
	Pending,
	/// Fabric is in the dye baths.
	Processing,
	/// Dyeing finished, awaiting pickup or dispatch.
	Ready,
	/// Delivered to the customer.
	Completed,
	/// Abandoned before completion.
	Cancelled,
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::Pending => write!(f, "pending"),
			OrderStatus::Processing => write!(f, "processing"),
			OrderStatus::Ready => write!(f, "ready"),
			OrderStatus::Completed => write!(f, "completed"),
			OrderStatus::Cancelled => write!(f, "cancelled"),
		}
	}
}

/// One immutable record of a status change.
///
/// Entries are append-only: once written they are never edited or removed.
/// They are ordered by insertion; presentation layers sort explicitly by
/// timestamp since clock skew can reorder recorded instants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
	/// The status the order moved into.
	pub status: OrderStatus,
	/// When the change was recorded.
	pub timestamp: DateTime<Utc>,
	/// Free-text annotation describing the change.
	pub note: String,
}

/// A customer's dyeing job: the aggregate root of the order model.
///
/// Orders are created through the lifecycle engine and mutated exclusively
/// through status transitions (which append to `status_history`) or
/// administrative full-field edits (which do not).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Opaque unique identifier assigned by the persistence layer at
	/// insertion.
	pub id: String,
	/// Human-facing identifier, "DYE" followed by five zero-padded digits.
	/// Generated once at creation; not guaranteed globally unique.
	pub tracking_number: String,
	/// Denormalized display name of the placing customer. No foreign-key
	/// enforcement.
	pub customer_name: String,
	/// Line items; a valid order contains at least one.
	pub items: Vec<OrderItem>,
	/// Derived monetary value in abstract price units.
	pub total_amount: f64,
	/// Current lifecycle status.
	pub status: OrderStatus,
	/// Creation timestamp, immutable.
	pub created_at: DateTime<Utc>,
	/// Projected delivery timestamp, set at creation, may be recomputed by
	/// administrative edits.
	pub estimated_delivery: DateTime<Utc>,
	/// Set only on the first transition into `completed`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub delivered_at: Option<DateTime<Utc>>,
	/// Customer-supplied annotation, possibly empty.
	#[serde(default)]
	pub notes: String,
	/// Append-only ledger of status changes.
	#[serde(default)]
	pub status_history: Vec<StatusHistoryEntry>,
}

/// Field an order listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
	TrackingNumber,
	CustomerName,
	TotalAmount,
	Status,
	CreatedAt,
	EstimatedDelivery,
	DeliveredAt,
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	Asc,
	Desc,
}

/// Which date an inclusive range filter applies to.
///
/// Order listings filter on `created_at`; delivery-history listings filter
/// on `delivered_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateField {
	CreatedAt,
	DeliveredAt,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_serializes_lowercase() {
		let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
		assert_eq!(json, "\"processing\"");

		let back: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
		assert_eq!(back, OrderStatus::Cancelled);
	}

	#[test]
	fn status_display_matches_wire_format() {
		for status in [
			OrderStatus::Pending,
			OrderStatus::Processing,
			OrderStatus::Ready,
			OrderStatus::Completed,
			OrderStatus::Cancelled,
		] {
			let json = serde_json::to_string(&status).unwrap();
			assert_eq!(json, format!("\"{}\"", status));
		}
	}

	#[test]
	fn order_uses_camel_case_field_names() {
		let order = Order {
			id: "abc".into(),
			tracking_number: "DYE00042".into(),
			customer_name: "Meridian Textiles".into(),
			items: vec![OrderItem {
				fabric: "Cotton".into(),
				color: "Blue".into(),
				quantity: 50.0,
				unit: "meters".into(),
			}],
			total_amount: 250.0,
			status: OrderStatus::Pending,
			created_at: Utc::now(),
			estimated_delivery: Utc::now(),
			delivered_at: None,
			notes: String::new(),
			status_history: vec![],
		};

		let value = serde_json::to_value(&order).unwrap();
		assert!(value.get("trackingNumber").is_some());
		assert!(value.get("customerName").is_some());
		assert!(value.get("totalAmount").is_some());
		assert!(value.get("statusHistory").is_some());
		// Unset delivery date is omitted entirely
		assert!(value.get("deliveredAt").is_none());
	}

	#[test]
	fn order_deserializes_without_optional_fields() {
		let json = r#"{
			"id": "1",
			"trackingNumber": "DYE00001",
			"customerName": "Acme",
			"items": [],
			"totalAmount": 0.0,
			"status": "pending",
			"createdAt": "2025-01-15T10:00:00Z",
			"estimatedDelivery": "2025-01-29T10:00:00Z"
		}"#;

		let order: Order = serde_json::from_str(json).unwrap();
		assert!(order.delivered_at.is_none());
		assert!(order.notes.is_empty());
		assert!(order.status_history.is_empty());
	}
}
