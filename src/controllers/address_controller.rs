use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    errors::OrderError,
    models::{AddressSnapshot, CurrentUser},
    services::address_service,
    AppState,
};

#[derive(Deserialize)]
pub struct AddAddressBody {
    pub address: Option<AddressSnapshot>,
}

// POST /address/add
pub async fn post_add(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<AddAddressBody>,
) -> Result<Response, OrderError> {
    let Some(Extension(u)) = user else {
        return Err(OrderError::Unauthorized);
    };

    let fields = body.address.ok_or(OrderError::InvalidRequest)?;
    if fields.street.trim().is_empty() || fields.city.trim().is_empty() {
        return Err(OrderError::InvalidRequest);
    }

    let address = address_service::add_address(&state, u.id, fields).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Address added successfully",
        "address": address,
    }))
    .into_response())
}

// GET /address/get
pub async fn get_list(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Result<Response, OrderError> {
    let Some(Extension(u)) = user else {
        return Err(OrderError::Unauthorized);
    };

    let addresses = address_service::list_for_user(&state, u.id).await?;
    Ok(Json(json!({ "success": true, "addresses": addresses })).into_response())
}
