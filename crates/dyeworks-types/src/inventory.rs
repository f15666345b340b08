//! Inventory record types for fabric and dye stock tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stocked material in the workshop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
	/// Opaque unique identifier assigned by the persistence layer.
	pub id: String,
	/// Material name, e.g. "Indigo dye" or "Raw cotton".
	pub name: String,
	/// Grouping used by the stock overview, e.g. "Dyes", "Fabrics".
	pub category: String,
	/// Amount currently on hand, in `unit`s.
	pub quantity: f64,
	/// Unit label, descriptive only.
	pub unit: String,
	/// Quantity below which the item counts as low stock.
	pub threshold: f64,
	/// When this record was last written.
	pub last_updated: DateTime<Utc>,
}

impl InventoryItem {
	/// Whether the on-hand quantity has fallen below the alert threshold.
	pub fn is_low_stock(&self) -> bool {
		self.quantity < self.threshold
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn low_stock_is_strictly_below_threshold() {
		let mut item = InventoryItem {
			id: "1".into(),
			name: "Indigo dye".into(),
			category: "Dyes".into(),
			quantity: 10.0,
			unit: "kg".into(),
			threshold: 10.0,
			last_updated: Utc::now(),
		};
		assert!(!item.is_low_stock());

		item.quantity = 9.5;
		assert!(item.is_low_stock());
	}
}
