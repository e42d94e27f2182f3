use std::collections::HashMap;

use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{errors::OrderError, models::CurrentUser, services::user_service, AppState};

#[derive(Deserialize)]
pub struct UpdateCartBody {
    // product hex id -> quantity
    pub cart_items: HashMap<String, i64>,
}

// POST /cart/update
pub async fn post_update(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<UpdateCartBody>,
) -> Result<Response, OrderError> {
    let Some(Extension(u)) = user else {
        return Err(OrderError::Unauthorized);
    };

    if body.cart_items.values().any(|&q| q < 0) {
        return Err(OrderError::InvalidRequest);
    }

    user_service::update_cart(&state, u.id, &body.cart_items).await?;
    Ok(Json(json!({ "success": true, "message": "Cart updated" })).into_response())
}
