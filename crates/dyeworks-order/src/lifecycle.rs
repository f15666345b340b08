//! Order creation and status transitions.
//!
//! These are the pure mutations at the center of the order model: building a
//! fresh order and moving an existing one through its status state machine.
//! Persistence is the caller's responsibility; nothing here touches storage.

use crate::pricing::calculate_total;
use crate::OrderError;
use chrono::{Duration, Utc};
use dyeworks_types::{Order, OrderItem, OrderStatus, StatusHistoryEntry};
use rand::Rng;

/// Number of days between order creation and the projected delivery date.
pub const ESTIMATED_DELIVERY_DAYS: i64 = 14;

/// Produces a human-facing tracking number: "DYE" plus five zero-padded
/// digits.
///
/// The number is random and NOT checked against existing orders, so
/// collisions are possible and accepted. Call exactly once per order, at
/// creation.
pub fn generate_tracking_number() -> String {
	let n: u32 = rand::thread_rng().gen_range(0..10_000);
	format!("DYE{:05}", n)
}

/// Builds a new order for the given customer and line items.
///
/// The order starts in `pending` with an empty status history, a derived
/// total, a fresh tracking number, and a projected delivery date 14 days
/// out. The `id` field is left empty; the persistence layer assigns it at
/// insertion.
///
/// Fails with [`OrderError::InvalidOrder`] when `items` is empty or
/// `customer_name` is blank — the only validation the engine enforces.
pub fn create_order(
	customer_name: &str,
	items: Vec<OrderItem>,
	notes: String,
) -> Result<Order, OrderError> {
	if items.is_empty() {
		return Err(OrderError::InvalidOrder(
			"an order must contain at least one item".to_string(),
		));
	}

	if customer_name.trim().is_empty() {
		return Err(OrderError::InvalidOrder(
			"customer name is required".to_string(),
		));
	}

	let now = Utc::now();
	let total_amount = calculate_total(&items);

	Ok(Order {
		id: String::new(),
		tracking_number: generate_tracking_number(),
		customer_name: customer_name.to_string(),
		items,
		total_amount,
		status: OrderStatus::Pending,
		created_at: now,
		estimated_delivery: now + Duration::days(ESTIMATED_DELIVERY_DAYS),
		delivered_at: None,
		notes,
		status_history: vec![],
	})
}

/// Applies a status transition to an order.
///
/// Sets the new status, appends an entry to the status-history ledger, and
/// stamps `delivered_at` on the first transition into `completed`. The
/// engine trusts its caller: any transition is accepted and recorded,
/// including backward moves (manual correction) and re-affirmations of the
/// current status, which append a new entry rather than deduplicating.
pub fn update_status(order: &mut Order, new_status: OrderStatus, note: Option<String>) {
	let now = Utc::now();
	let note = note.unwrap_or_else(|| format!("Status updated to {}", new_status));

	order.status = new_status;
	order.status_history.push(StatusHistoryEntry {
		status: new_status,
		timestamp: now,
		note,
	});

	if new_status == OrderStatus::Completed && order.delivered_at.is_none() {
		order.delivered_at = Some(now);
	}
}
