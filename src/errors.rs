use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failure taxonomy for the order placement / reconciliation core.
///
/// Business-rule violations carry a message the client may see; database and
/// gateway failures are logged and surfaced as generic messages only.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Invalid order data")]
    InvalidRequest,

    #[error("Product {0} not found")]
    ProductNotFound(String),

    #[error("Access denied")]
    Unauthorized,

    #[error("payment gateway error: {0}")]
    Gateway(String),

    #[error("database error: {0}")]
    Db(#[from] mongodb::error::Error),
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            OrderError::InvalidRequest => (StatusCode::BAD_REQUEST, self.to_string()),
            OrderError::ProductNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            OrderError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            OrderError::Gateway(msg) => {
                tracing::error!("gateway failure: {msg}");
                (StatusCode::BAD_GATEWAY, "Payment service unavailable".to_string())
            }
            OrderError::Db(e) => {
                tracing::error!("db failure: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}
