//! Order lifecycle engine for the dyeworks system.
//!
//! This crate owns the order entity's behavior: the status state machine
//! with its append-only history ledger, pricing calculation, tracking-number
//! generation, and the filtering/sorting helpers behind the order listings.
//! The [`OrderService`] coordinates those pure operations with the storage
//! gateway; everything else in the crate is side-effect free.

pub mod lifecycle;
pub mod pricing;
pub mod query;

pub use lifecycle::{create_order, generate_tracking_number, update_status};
pub use pricing::{calculate_total, unit_price, DEFAULT_UNIT_PRICE, FABRIC_PRICES};
pub use query::{filter_orders, sort_orders, DateRange};

use dyeworks_storage::{StorageError, StorageService};
use dyeworks_types::{Order, OrderItem, OrderStatus, StorageKey};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during order processing operations.
#[derive(Debug, Error)]
pub enum OrderError {
	/// Error that occurs when creation preconditions are violated.
	#[error("Invalid order: {0}")]
	InvalidOrder(String),
	/// Error that occurs when a referenced order id does not exist.
	#[error("Order not found: {0}")]
	NotFound(String),
	/// Error that occurs in the storage gateway.
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),
}

/// Service that couples the lifecycle engine to the storage gateway.
///
/// Each operation is one fetch and/or one write; the service never issues
/// overlapping calls for the same order. There is no locking and no
/// optimistic-concurrency check: concurrent writers race and the last write
/// wins, a known and accepted hazard of the business process.
pub struct OrderService {
	/// The storage gateway all order records go through.
	storage: Arc<StorageService>,
}

impl OrderService {
	/// Creates a new OrderService backed by the given storage gateway.
	pub fn new(storage: Arc<StorageService>) -> Self {
		Self { storage }
	}

	/// Creates and persists a new order, assigning its id at insertion.
	pub async fn create(
		&self,
		customer_name: &str,
		items: Vec<OrderItem>,
		notes: String,
	) -> Result<Order, OrderError> {
		let mut order = lifecycle::create_order(customer_name, items, notes)?;
		order.id = uuid::Uuid::new_v4().to_string();

		self.storage
			.store(StorageKey::Orders.as_str(), &order.id, &order)
			.await?;

		tracing::info!(
			"Created order {} ({}) for {}",
			order.tracking_number,
			order.id,
			order.customer_name
		);

		Ok(order)
	}

	/// Fetches an order by id.
	pub async fn get(&self, id: &str) -> Result<Order, OrderError> {
		self.storage
			.retrieve(StorageKey::Orders.as_str(), id)
			.await
			.map_err(|e| match e {
				StorageError::NotFound => OrderError::NotFound(id.to_string()),
				other => OrderError::Storage(other),
			})
	}

	/// Fetches every stored order.
	pub async fn list(&self) -> Result<Vec<Order>, OrderError> {
		Ok(self.storage.retrieve_all(StorageKey::Orders.as_str()).await?)
	}

	/// Applies a status transition to a stored order and persists the
	/// result. Returns the updated order.
	pub async fn update_status(
		&self,
		id: &str,
		new_status: OrderStatus,
		note: Option<String>,
	) -> Result<Order, OrderError> {
		let mut order = self.get(id).await?;
		lifecycle::update_status(&mut order, new_status, note);

		self.storage
			.update(StorageKey::Orders.as_str(), id, &order)
			.await?;

		tracing::info!("Order {} moved to {}", order.tracking_number, order.status);

		Ok(order)
	}

	/// Administrative full-field edit of a stored order.
	///
	/// The id is taken from the call, not the body, and the status history
	/// is carried over unchanged from the stored record: corrections adjust
	/// fields, they do not rewrite the ledger.
	pub async fn replace(&self, id: &str, mut order: Order) -> Result<Order, OrderError> {
		let existing = self.get(id).await?;
		order.id = existing.id;
		order.status_history = existing.status_history;

		self.storage
			.update(StorageKey::Orders.as_str(), id, &order)
			.await?;

		Ok(order)
	}

	/// Deletes a stored order. A gateway operation, not a lifecycle one:
	/// the engine itself never removes orders.
	pub async fn remove(&self, id: &str) -> Result<(), OrderError> {
		self.storage
			.remove(StorageKey::Orders.as_str(), id)
			.await
			.map_err(|e| match e {
				StorageError::NotFound => OrderError::NotFound(id.to_string()),
				other => OrderError::Storage(other),
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use dyeworks_storage::implementations::memory::MemoryStorage;
	use dyeworks_types::OrderItem;

	fn service() -> OrderService {
		let storage = Arc::new(StorageService::new(Box::new(MemoryStorage::new())));
		OrderService::new(storage)
	}

	fn items() -> Vec<OrderItem> {
		vec![OrderItem {
			fabric: "Cotton".into(),
			color: "Blue".into(),
			quantity: 50.0,
			unit: "meters".into(),
		}]
	}

	#[tokio::test]
	async fn create_assigns_id_and_persists() {
		let orders = service();
		let order = orders
			.create("Meridian Textiles", items(), String::new())
			.await
			.unwrap();

		assert!(!order.id.is_empty());

		let fetched = orders.get(&order.id).await.unwrap();
		assert_eq!(fetched, order);
	}

	#[tokio::test]
	async fn get_unknown_id_surfaces_not_found() {
		let orders = service();
		let err = orders.get("missing").await.unwrap_err();
		assert!(matches!(err, OrderError::NotFound(_)));
	}

	#[tokio::test]
	async fn status_update_persists_history() {
		let orders = service();
		let order = orders
			.create("Acme", items(), String::new())
			.await
			.unwrap();

		orders
			.update_status(&order.id, OrderStatus::Processing, None)
			.await
			.unwrap();
		let updated = orders
			.update_status(&order.id, OrderStatus::Completed, Some("handed over".into()))
			.await
			.unwrap();

		assert_eq!(updated.status, OrderStatus::Completed);
		assert!(updated.delivered_at.is_some());
		assert_eq!(updated.status_history.len(), 2);

		let fetched = orders.get(&order.id).await.unwrap();
		assert_eq!(fetched.status_history.len(), 2);
		assert_eq!(fetched.status_history[1].note, "handed over");
	}

	#[tokio::test]
	async fn replace_preserves_id_and_history() {
		let orders = service();
		let order = orders
			.create("Acme", items(), String::new())
			.await
			.unwrap();
		orders
			.update_status(&order.id, OrderStatus::Processing, None)
			.await
			.unwrap();

		let mut edited = orders.get(&order.id).await.unwrap();
		edited.id = "attacker-controlled".into();
		edited.customer_name = "Acme Dyeing Ltd".into();
		edited.status_history = vec![];

		let replaced = orders.replace(&order.id, edited).await.unwrap();
		assert_eq!(replaced.id, order.id);
		assert_eq!(replaced.customer_name, "Acme Dyeing Ltd");
		// Administrative edits never rewrite the ledger
		assert_eq!(replaced.status_history.len(), 1);
	}

	#[tokio::test]
	async fn remove_deletes_and_reports_unknown_ids() {
		let orders = service();
		let order = orders
			.create("Acme", items(), String::new())
			.await
			.unwrap();

		orders.remove(&order.id).await.unwrap();
		assert!(matches!(
			orders.get(&order.id).await,
			Err(OrderError::NotFound(_))
		));
		assert!(matches!(
			orders.remove(&order.id).await,
			Err(OrderError::NotFound(_))
		));
	}

	#[tokio::test]
	async fn list_returns_all_created_orders() {
		let orders = service();
		for name in ["A", "B", "C"] {
			orders.create(name, items(), String::new()).await.unwrap();
		}

		let all = orders.list().await.unwrap();
		assert_eq!(all.len(), 3);
	}
}
