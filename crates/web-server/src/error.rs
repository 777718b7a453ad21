use api_client::ApiError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_types::ValidationError;
use executor::{FailureKind, OrderFailure};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Order execution failed: {}", .0.message)]
    Order(OrderFailure),
    #[error("Connectivity check failed: {0}")]
    Connectivity(#[from] ApiError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": e.reason, "field": e.field.as_str() }),
            ),
            AppError::Order(failure) => {
                let status = match failure.kind {
                    FailureKind::ValidationEcho => StatusCode::UNPROCESSABLE_ENTITY,
                    FailureKind::Api { .. } => StatusCode::BAD_GATEWAY,
                    FailureKind::Network => StatusCode::SERVICE_UNAVAILABLE,
                };
                let body = serde_json::to_value(&failure)
                    .unwrap_or_else(|_| json!({ "error": failure.message }));
                (status, with_error_key(body, &failure.message))
            }
            AppError::Connectivity(e) => {
                tracing::error!(error = %e, "Connectivity check failed.");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({ "error": "Exchange is not reachable." }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

fn with_error_key(mut body: serde_json::Value, message: &str) -> serde_json::Value {
    if let Some(map) = body.as_object_mut() {
        map.insert("error".to_string(), json!(message));
    }
    body
}
