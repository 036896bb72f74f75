//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checkout::CheckoutError;
use views::ViewError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Order placement error.
    Checkout(CheckoutError),
    /// Read-side error.
    View(ViewError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Checkout(err) => checkout_error_to_response(err),
            ApiError::View(err) => view_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, String) {
    let status = match &err {
        CheckoutError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        CheckoutError::EmptySelection | CheckoutError::InvalidItem(_) => StatusCode::BAD_REQUEST,
        CheckoutError::MissingUsername(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CheckoutError::StepFailed { .. } | CheckoutError::Serialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.user_message())
}

fn view_error_to_response(err: ViewError) -> (StatusCode, String) {
    match &err {
        ViewError::OrderNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        ViewError::Store(_) => {
            tracing::error!(error = %err, "failed to read view");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load orders".to_string(),
            )
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        ApiError::Checkout(err)
    }
}

impl From<ViewError> for ApiError {
    fn from(err: ViewError) -> Self {
        ApiError::View(err)
    }
}
