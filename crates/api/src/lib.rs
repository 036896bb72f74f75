//! HTTP API server with observability for the storefront checkout.
//!
//! Provides REST endpoints for checkout, purchase history and the seller
//! dashboard, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use checkout::{OrderPlacement, StoreProfileReader};
use document_store::DocumentStore;
use domain::OrderAssembler;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use views::{PurchaseHistory, SellerDashboard};

use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: DocumentStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/checkout", post(routes::checkout::place::<S>))
        .route("/checkout/preview", post(routes::checkout::preview::<S>))
        .route(
            "/buyers/{username}/orders",
            get(routes::orders::buyer_orders::<S>),
        )
        .route(
            "/buyers/{username}/orders/{transaction_id}",
            get(routes::orders::buyer_order::<S>),
        )
        .route(
            "/sellers/{username}/orders",
            get(routes::orders::seller_orders::<S>),
        )
        .route(
            "/sellers/{username}/dashboard",
            get(routes::orders::seller_dashboard::<S>),
        )
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

/// Creates the application state over a document store.
pub fn create_default_state<S: DocumentStore + Clone + 'static>(
    store: S,
    assembler: OrderAssembler,
) -> Arc<AppState<S>> {
    let placement = OrderPlacement::new(
        store.clone(),
        StoreProfileReader::new(store.clone()),
        assembler,
    );

    Arc::new(AppState {
        placement,
        history: PurchaseHistory::new(store.clone()),
        dashboard: SellerDashboard::new(store.clone()),
        store,
    })
}
