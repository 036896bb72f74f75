//! Purchase history and seller dashboard endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use common::{TransactionId, Username};
use document_store::DocumentStore;
use domain::{Order, OrderStatus};
use serde::Deserialize;
use views::StatusCounts;

use super::AppState;
use crate::error::ApiError;

/// Optional `?status=` filter.
#[derive(Debug, Default, Deserialize)]
pub struct StatusFilter {
    pub status: Option<OrderStatus>,
}

/// GET /buyers/{username}/orders — the buyer's orders, newest first.
#[tracing::instrument(skip(state))]
pub async fn buyer_orders<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(username): Path<String>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let buyer = parse_username(username)?;
    Ok(Json(state.history.orders(&buyer, filter.status).await?))
}

/// GET /buyers/{username}/orders/{transaction_id} — one of the buyer's orders.
#[tracing::instrument(skip(state))]
pub async fn buyer_order<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path((username, transaction_id)): Path<(String, String)>,
) -> Result<Json<Order>, ApiError> {
    let buyer = parse_username(username)?;
    if !TransactionId::is_well_formed(&transaction_id) {
        return Err(ApiError::BadRequest(format!(
            "Invalid transaction id: {transaction_id}"
        )));
    }
    let transaction_id = TransactionId::from(transaction_id.as_str());
    Ok(Json(state.history.find(&buyer, &transaction_id).await?))
}

/// GET /sellers/{username}/orders — the seller's incoming orders, newest first.
#[tracing::instrument(skip(state))]
pub async fn seller_orders<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(username): Path<String>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let seller = parse_username(username)?;
    Ok(Json(state.dashboard.orders(&seller, filter.status).await?))
}

/// GET /sellers/{username}/dashboard — order counts per status.
#[tracing::instrument(skip(state))]
pub async fn seller_dashboard<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(username): Path<String>,
) -> Result<Json<StatusCounts>, ApiError> {
    let seller = parse_username(username)?;
    Ok(Json(state.dashboard.order_counts(&seller).await?))
}

fn parse_username(raw: String) -> Result<Username, ApiError> {
    let username = Username::from(raw);
    if username.is_blank() {
        return Err(ApiError::BadRequest("Username is required".to_string()));
    }
    Ok(username)
}
