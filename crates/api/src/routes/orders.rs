//! Order placement, lookup, and status endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use catalog::Catalog;
use common::{OrderId, ProductId};
use domain::{LineRequest, Order};
use order_store::OrderStore;
use serde::{Deserialize, Serialize};
use workflow::{OrderWorkflow, PlaceOrderRequest};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<C: Catalog, S: OrderStore> {
    pub workflow: OrderWorkflow<C, S>,
}

// -- Request types --

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_email: Option<String>,
    pub items: Option<Vec<OrderItemRequest>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: Option<i64>,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// -- Response types --

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub customer_email: Option<String>,
    pub status: String,
    pub items: Vec<OrderItemResponse>,
    pub total_amount: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: i64,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let items = order
            .lines
            .iter()
            .map(|line| OrderItemResponse {
                product_id: line.product_id.to_string(),
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price.cents(),
            })
            .collect();

        OrderResponse {
            id: order.id.to_string(),
            customer_email: order.customer_email,
            status: order.status.to_string(),
            items,
            total_amount: order.total_amount.cents(),
            created_at: order.created_at.to_rfc3339(),
            updated_at: order.updated_at.to_rfc3339(),
        }
    }
}

// -- Handlers --

/// POST /orders — validate, price, and persist a new order.
#[tracing::instrument(skip(state, req))]
pub async fn create<C: Catalog + 'static, S: OrderStore + 'static>(
    State(state): State<Arc<AppState<C, S>>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(axum::http::StatusCode, Json<OrderResponse>), ApiError> {
    // A missing items field reads as an empty order and is rejected the
    // same way.
    let items = req
        .items
        .unwrap_or_default()
        .into_iter()
        .map(|item| LineRequest {
            product_id: ProductId::new(item.product_id),
            quantity: item.quantity,
        })
        .collect();

    let order = state
        .workflow
        .place_order(PlaceOrderRequest {
            customer_email: req.customer_email,
            items,
        })
        .await?;

    Ok((axum::http::StatusCode::CREATED, Json(order.into())))
}

/// GET /orders — list the most recent orders, newest first.
#[tracing::instrument(skip(state))]
pub async fn list<C: Catalog + 'static, S: OrderStore + 'static>(
    State(state): State<Arc<AppState<C, S>>>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.workflow.list_orders().await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// GET /orders/:id — load a single order by ID.
#[tracing::instrument(skip(state))]
pub async fn get<C: Catalog + 'static, S: OrderStore + 'static>(
    State(state): State<Arc<AppState<C, S>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let order = state.workflow.get_order(order_id).await?;
    Ok(Json(order.into()))
}

/// PATCH /orders/:id — set an order's status.
#[tracing::instrument(skip(state, req))]
pub async fn update_status<C: Catalog + 'static, S: OrderStore + 'static>(
    State(state): State<Arc<AppState<C, S>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let order = state.workflow.update_status(order_id, &req.status).await?;
    Ok(Json(order.into()))
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid order ID: {e}")))?;
    Ok(OrderId::from_uuid(uuid))
}
