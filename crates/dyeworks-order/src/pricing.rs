//! Pricing table and total calculation for dyeing jobs.
//!
//! The fabric price table lives here and nowhere else; every caller that
//! needs a price goes through [`unit_price`] or [`calculate_total`] rather
//! than keeping its own copy of the rates.

use dyeworks_types::OrderItem;

/// Price per unit applied to fabrics outside the known table.
pub const DEFAULT_UNIT_PRICE: f64 = 6.0;

/// Fixed price per unit for each known fabric type, in abstract price units.
///
/// Lookups are exact-match on the fabric name as entered.
pub static FABRIC_PRICES: &[(&str, f64)] = &[
	("Cotton", 5.0),
	("Silk", 12.0),
	("Linen", 8.0),
	("Wool", 10.0),
	("Polyester", 4.0),
	("Denim", 7.0),
	("Velvet", 15.0),
];

/// Returns the per-unit price for a fabric name.
///
/// Unknown fabrics fall back to [`DEFAULT_UNIT_PRICE`].
pub fn unit_price(fabric: &str) -> f64 {
	FABRIC_PRICES
		.iter()
		.find(|(name, _)| *name == fabric)
		.map(|(_, price)| *price)
		.unwrap_or(DEFAULT_UNIT_PRICE)
}

/// Calculates the total price of an order's line items.
///
/// Pure function: the total is the sum of `unit_price(fabric) * quantity`
/// over all items, with no rounding. An empty slice totals 0; rejecting
/// empty orders is the creation path's concern, not the calculator's.
pub fn calculate_total(items: &[OrderItem]) -> f64 {
	items
		.iter()
		.map(|item| unit_price(&item.fabric) * item.quantity)
		.sum()
}
