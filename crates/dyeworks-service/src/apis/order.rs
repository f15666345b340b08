//! Order endpoints for the dyeworks API.
//!
//! Listing runs the lifecycle engine's filtering and sorting server-side so
//! every screen shares one implementation instead of re-filtering rows in
//! the presentation layer.

use crate::apis::map_order_error;
use crate::server::AppState;
use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	response::Json,
};
use dyeworks_order::{filter_orders, sort_orders, DateRange};
use dyeworks_types::{
	ApiError, CreateOrderRequest, DateField, Order, OrderListQuery, SortDirection, SortField,
	UpdateStatusRequest,
};
use tracing::warn;

/// Handles GET /api/orders requests.
pub async fn list_orders(
	State(state): State<AppState>,
	Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
	let mut orders = state.orders.list().await.map_err(map_order_error)?;

	if let Some(ref customer) = query.customer {
		orders.retain(|order| &order.customer_name == customer);
	}

	let range = if query.from.is_some() || query.to.is_some() {
		Some(DateRange {
			from: query.from,
			to: query.to,
			field: query.date_field.unwrap_or(DateField::CreatedAt),
		})
	} else {
		None
	};

	let mut orders = filter_orders(orders, query.search.as_deref(), range.as_ref());

	// Newest first unless the caller asked for something else
	sort_orders(
		&mut orders,
		query.sort.unwrap_or(SortField::CreatedAt),
		query.direction.unwrap_or(SortDirection::Desc),
	);

	Ok(Json(orders))
}

/// Handles POST /api/orders requests.
pub async fn create_order(
	State(state): State<AppState>,
	Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
	match state
		.orders
		.create(&request.customer_name, request.items, request.notes)
		.await
	{
		Ok(order) => Ok((StatusCode::CREATED, Json(order))),
		Err(e) => {
			warn!("Order creation failed: {}", e);
			Err(map_order_error(e))
		}
	}
}

/// Handles GET /api/orders/{id} requests.
pub async fn get_order(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<Order>, ApiError> {
	state
		.orders
		.get(&id)
		.await
		.map(Json)
		.map_err(map_order_error)
}

/// Handles PUT /api/orders/{id} requests: administrative full-field edit.
pub async fn replace_order(
	Path(id): Path<String>,
	State(state): State<AppState>,
	Json(order): Json<Order>,
) -> Result<Json<Order>, ApiError> {
	state
		.orders
		.replace(&id, order)
		.await
		.map(Json)
		.map_err(map_order_error)
}

/// Handles PUT /api/orders/{id}/status requests: a lifecycle transition.
pub async fn update_order_status(
	Path(id): Path<String>,
	State(state): State<AppState>,
	Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, ApiError> {
	match state
		.orders
		.update_status(&id, request.status, request.note)
		.await
	{
		Ok(order) => Ok(Json(order)),
		Err(e) => {
			warn!("Status update for order {} failed: {}", id, e);
			Err(map_order_error(e))
		}
	}
}

/// Handles DELETE /api/orders/{id} requests.
pub async fn delete_order(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
	state.orders.remove(&id).await.map_err(map_order_error)?;
	Ok(Json(serde_json::json!({
		"message": "Order deleted successfully"
	})))
}
