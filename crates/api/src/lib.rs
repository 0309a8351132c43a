//! HTTP API server for the order service.
//!
//! Provides REST endpoints for order placement and status management,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch, post};
use catalog::Catalog;
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::OrderStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<C, S>(state: Arc<AppState<C, S>>, metrics_handle: PrometheusHandle) -> Router
where
    C: Catalog + 'static,
    S: OrderStore + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/orders", post(routes::orders::create::<C, S>))
        .route("/orders", get(routes::orders::list::<C, S>))
        .route("/orders/{id}", get(routes::orders::get::<C, S>))
        .route("/orders/{id}", patch(routes::orders::update_status::<C, S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
