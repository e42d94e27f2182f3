use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::oid::ObjectId;
use serde_json::json;

use crate::{errors::OrderError, services::product_service, AppState};

// GET /product/list
pub async fn get_list(State(state): State<AppState>) -> Result<Response, OrderError> {
    let products = product_service::list(&state).await?;
    Ok(Json(json!({ "success": true, "products": products })).into_response())
}

// GET /product/:id
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, OrderError> {
    let oid = ObjectId::parse_str(&id).map_err(|_| OrderError::ProductNotFound(id))?;

    let product = product_service::get(&state, oid).await?;
    Ok(Json(json!({ "success": true, "product": product })).into_response())
}
