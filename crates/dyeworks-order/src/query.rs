//! Filtering and sorting helpers for order listings.
//!
//! The presentation layer hands these a full order list and gets back the
//! rows its table should show. Filtering matches a free-text query against
//! tracking number and customer name and can restrict to an inclusive date
//! range; sorting covers every listed column in either direction.

use chrono::{DateTime, Utc};
use dyeworks_types::{DateField, Order, SortDirection, SortField};
use std::cmp::Ordering;

/// Inclusive date range applied to one of an order's date fields.
#[derive(Debug, Clone)]
pub struct DateRange {
	/// Inclusive lower bound; unbounded when absent.
	pub from: Option<DateTime<Utc>>,
	/// Inclusive upper bound; unbounded when absent.
	pub to: Option<DateTime<Utc>>,
	/// Which date the bounds apply to.
	pub field: DateField,
}

impl DateRange {
	fn matches(&self, order: &Order) -> bool {
		let instant = match self.field {
			DateField::CreatedAt => order.created_at,
			DateField::DeliveredAt => match order.delivered_at {
				Some(delivered) => delivered,
				// Undelivered orders have no delivery date to fall in range
				None => return false,
			},
		};

		if let Some(from) = self.from {
			if instant < from {
				return false;
			}
		}
		if let Some(to) = self.to {
			if instant > to {
				return false;
			}
		}
		true
	}
}

/// Filters orders by free-text query and optional date range.
///
/// The query is matched case-insensitively as a substring of the tracking
/// number and the customer name; an empty or absent query matches
/// everything.
pub fn filter_orders(
	orders: Vec<Order>,
	query: Option<&str>,
	range: Option<&DateRange>,
) -> Vec<Order> {
	let query = query.map(|q| q.to_lowercase());

	orders
		.into_iter()
		.filter(|order| {
			if let Some(ref q) = query {
				if !q.is_empty()
					&& !order.tracking_number.to_lowercase().contains(q)
					&& !order.customer_name.to_lowercase().contains(q)
				{
					return false;
				}
			}
			if let Some(range) = range {
				if !range.matches(order) {
					return false;
				}
			}
			true
		})
		.collect()
}

/// Sorts orders in place by a single field.
///
/// Dates compare by instant, strings lexicographically, amounts by
/// magnitude. The sort is stable; ties keep their incoming order. Orders
/// without a delivery date sort before delivered ones when ascending by
/// delivery date.
pub fn sort_orders(orders: &mut [Order], field: SortField, direction: SortDirection) {
	orders.sort_by(|a, b| {
		let ordering = compare_by(a, b, field);
		match direction {
			SortDirection::Asc => ordering,
			SortDirection::Desc => ordering.reverse(),
		}
	});
}

fn compare_by(a: &Order, b: &Order, field: SortField) -> Ordering {
	match field {
		SortField::TrackingNumber => a.tracking_number.cmp(&b.tracking_number),
		SortField::CustomerName => a.customer_name.cmp(&b.customer_name),
		SortField::TotalAmount => a.total_amount.total_cmp(&b.total_amount),
		SortField::Status => a.status.to_string().cmp(&b.status.to_string()),
		SortField::CreatedAt => a.created_at.cmp(&b.created_at),
		SortField::EstimatedDelivery => a.estimated_delivery.cmp(&b.estimated_delivery),
		SortField::DeliveredAt => a.delivered_at.cmp(&b.delivered_at),
	}
}
