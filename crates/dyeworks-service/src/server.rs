//! HTTP server for the dyeworks API.
//!
//! This module provides a minimal HTTP server infrastructure for the
//! dyeworks REST API. Cross-cutting concerns such as CORS headers are
//! attached per request through explicit tower middleware layers; nothing
//! here mutates global client or connection state.

use axum::{
	extract::State,
	response::Json,
	routing::{get, put},
	Router,
};
use dyeworks_config::{ApiConfig, Config};
use dyeworks_order::OrderService;
use dyeworks_storage::StorageService;
use dyeworks_types::{ApiError, HealthResponse, StorageKey};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::apis;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Order lifecycle operations.
	pub orders: Arc<OrderService>,
	/// Storage gateway for the pass-through collections.
	pub storage: Arc<StorageService>,
	/// Complete configuration.
	pub config: Config,
}

/// Builds the API router with all routes and middleware.
pub fn router(state: AppState) -> Router {
	Router::new()
		.nest(
			"/api",
			Router::new()
				.route("/health", get(handle_health))
				.route(
					"/orders",
					get(apis::order::list_orders).post(apis::order::create_order),
				)
				.route(
					"/orders/{id}",
					get(apis::order::get_order)
						.put(apis::order::replace_order)
						.delete(apis::order::delete_order),
				)
				.route("/orders/{id}/status", put(apis::order::update_order_status))
				.route(
					"/inventory",
					get(apis::inventory::list_inventory).post(apis::inventory::create_inventory_item),
				)
				.route(
					"/inventory/{id}",
					get(apis::inventory::get_inventory_item)
						.put(apis::inventory::update_inventory_item)
						.delete(apis::inventory::delete_inventory_item),
				)
				.route(
					"/staff",
					get(apis::staff::list_staff).post(apis::staff::create_staff_member),
				)
				.route(
					"/staff/{id}",
					get(apis::staff::get_staff_member)
						.put(apis::staff::update_staff_member)
						.delete(apis::staff::delete_staff_member),
				),
		)
		.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
		.with_state(state)
}

/// Starts the HTTP server for the API.
///
/// This function creates and configures the HTTP server with routing,
/// middleware, and error handling for the REST endpoints.
pub async fn start_server(
	api_config: ApiConfig,
	state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = router(state);

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Dyeworks API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Handles GET /api/health requests.
///
/// Reports service liveness plus the record count of every collection,
/// which doubles as a storage-backend connectivity check.
async fn handle_health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
	let mut collections = HashMap::new();

	for key in StorageKey::all() {
		let count = state.storage.count(key.as_str()).await.map_err(|e| {
			tracing::warn!("Health check failed reading {}: {}", key.as_str(), e);
			ApiError::InternalServerError {
				error_type: "STORAGE_ERROR".to_string(),
				message: e.to_string(),
			}
		})?;
		collections.insert(key.as_str().to_string(), count);
	}

	Ok(Json(HealthResponse {
		status: "ok".to_string(),
		collections,
	}))
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::body::Body;
	use axum::http::{Request, StatusCode};
	use dyeworks_config::{StorageConfig, WorkshopConfig};
	use dyeworks_storage::implementations::memory::MemoryStorage;
	use tower::ServiceExt;

	fn test_state() -> AppState {
		let storage = Arc::new(StorageService::new(Box::new(MemoryStorage::new())));
		AppState {
			orders: Arc::new(OrderService::new(Arc::clone(&storage))),
			storage,
			config: Config {
				workshop: WorkshopConfig {
					id: "test".to_string(),
					name: "Dyeworks".to_string(),
				},
				storage: StorageConfig {
					primary: "memory".to_string(),
					implementations: HashMap::new(),
				},
				api: None,
			},
		}
	}

	#[tokio::test]
	async fn health_reports_collection_counts() {
		let app = router(test_state());

		let response = app
			.oneshot(
				Request::builder()
					.uri("/api/health")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::OK);

		let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
			.await
			.unwrap();
		let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();
		assert_eq!(health.status, "ok");
		assert_eq!(health.collections.get("orders"), Some(&0));
		assert_eq!(health.collections.get("inventory"), Some(&0));
		assert_eq!(health.collections.get("staff"), Some(&0));
	}

	#[tokio::test]
	async fn create_then_fetch_order_end_to_end() {
		let app = router(test_state());

		let body = r#"{
			"customerName": "Meridian Textiles",
			"items": [
				{"fabric": "Cotton", "color": "Blue", "quantity": 50, "unit": "meters"},
				{"fabric": "Silk", "color": "Gold", "quantity": 10, "unit": "meters"}
			],
			"notes": "rush job"
		}"#;

		let response = app
			.clone()
			.oneshot(
				Request::builder()
					.method("POST")
					.uri("/api/orders")
					.header("content-type", "application/json")
					.body(Body::from(body))
					.unwrap(),
			)
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::CREATED);

		let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
			.await
			.unwrap();
		let order: dyeworks_types::Order = serde_json::from_slice(&bytes).unwrap();
		assert_eq!(order.total_amount, 370.0);
		assert_eq!(order.status, dyeworks_types::OrderStatus::Pending);

		let response = app
			.oneshot(
				Request::builder()
					.uri(format!("/api/orders/{}", order.id))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
	}

	#[tokio::test]
	async fn creating_an_empty_order_is_a_bad_request() {
		let app = router(test_state());

		let response = app
			.oneshot(
				Request::builder()
					.method("POST")
					.uri("/api/orders")
					.header("content-type", "application/json")
					.body(Body::from(r#"{"customerName": "Acme", "items": []}"#))
					.unwrap(),
			)
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::BAD_REQUEST);

		let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
			.await
			.unwrap();
		let error: dyeworks_types::ErrorResponse = serde_json::from_slice(&bytes).unwrap();
		assert_eq!(error.error, "INVALID_ORDER");
	}

	#[tokio::test]
	async fn unknown_order_id_is_not_found() {
		let app = router(test_state());

		let response = app
			.oneshot(
				Request::builder()
					.uri("/api/orders/does-not-exist")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::NOT_FOUND);
	}
}
