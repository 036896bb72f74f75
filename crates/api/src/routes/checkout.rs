//! Checkout preview and order placement endpoints.

use std::sync::Arc;

use ::checkout::{PlaceOrder, PlacedOrder, Session};
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use document_store::DocumentStore;
use domain::{CheckoutSummary, OrderItem};
use serde::Deserialize;

use super::AppState;
use crate::error::ApiError;

/// Header carrying the uid issued by the auth service.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Body of a checkout request.
///
/// Only the items are read; totals sent by the client are ignored.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<OrderItem>,
}

/// Extracts the session from the auth header, if present.
fn session_from(headers: &HeaderMap) -> Option<Session> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|uid| !uid.is_empty())
        .map(Session::new)
}

/// POST /checkout/preview — totals grouped by seller, nothing written.
#[tracing::instrument(skip(state, req))]
pub async fn preview<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutSummary>, ApiError> {
    Ok(Json(state.placement.preview(&req.items)?))
}

/// POST /checkout — place an order for the signed-in buyer.
#[tracing::instrument(skip(state, headers, req))]
pub async fn place<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<PlacedOrder>), ApiError> {
    let request = PlaceOrder::new(session_from(&headers), req.items);
    let placed = state.placement.place_order(request).await?;
    Ok((StatusCode::CREATED, Json(placed)))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_session_from_header() {
        let mut headers = HeaderMap::new();
        assert!(session_from(&headers).is_none());

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("  "));
        assert!(session_from(&headers).is_none());

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("uid-juan"));
        assert_eq!(session_from(&headers), Some(Session::new("uid-juan")));
    }

    #[test]
    fn test_request_ignores_client_totals() {
        let req: CheckoutRequest = serde_json::from_value(serde_json::json!({
            "items": [{
                "productId": "rice",
                "productName": "Rice",
                "sellerUsername": "ana",
                "price": 100,
                "quantity": 1
            }],
            "total": 1
        }))
        .unwrap();
        assert_eq!(req.items.len(), 1);
    }
}
