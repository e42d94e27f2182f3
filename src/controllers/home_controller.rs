use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::doc;
use serde_json::json;

use crate::AppState;

// GET /
pub async fn index() -> Response {
    Json(json!({ "success": true, "message": "RustCart API" })).into_response()
}

// GET /health
pub async fn health(State(state): State<AppState>) -> Response {
    match state.db.run_command(doc! { "ping": 1 }, None).await {
        Ok(_) => Json(json!({ "status": "ok", "db": "up" })).into_response(),
        Err(e) => {
            tracing::warn!("db ping failed: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "db": "down" })),
            )
                .into_response()
        }
    }
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Not found" })),
    )
        .into_response()
}
