use axum::{
    body::Bytes,
    extract::{Extension, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::json;

use crate::{
    errors::OrderError,
    models::{AddressSnapshot, CurrentUser, OrderItem},
    services::{order_query_service, order_service, reconcile_service, stripe},
    AppState,
};

/// Order placement body. Any client-supplied price fields are unknown keys
/// and silently dropped; the server recomputes the amount from the catalog.
#[derive(Deserialize)]
pub struct PlaceOrderBody {
    #[serde(default)]
    pub items: Vec<ItemDto>,
    pub address: Option<AddressSnapshot>,
}

#[derive(Deserialize)]
pub struct ItemDto {
    pub product: String,
    pub quantity: i64,
}

fn parse_items(items: &[ItemDto]) -> Result<Vec<OrderItem>, OrderError> {
    items
        .iter()
        .map(|it| {
            let product =
                ObjectId::parse_str(&it.product).map_err(|_| OrderError::InvalidRequest)?;
            Ok(OrderItem {
                product,
                quantity: it.quantity,
            })
        })
        .collect()
}

fn current(user: Option<Extension<CurrentUser>>) -> Result<CurrentUser, OrderError> {
    match user {
        Some(Extension(u)) => Ok(u),
        None => Err(OrderError::Unauthorized),
    }
}

// POST /order/cod
pub async fn post_cod(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<PlaceOrderBody>,
) -> Result<Response, OrderError> {
    let u = current(user)?;

    let address = body.address.ok_or(OrderError::InvalidRequest)?;
    let items = parse_items(&body.items)?;

    order_service::place_cod(&state, u.id, items, address).await?;

    Ok(Json(json!({ "success": true, "message": "Order placed successfully" })).into_response())
}

// POST /order/online
pub async fn post_online(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    headers: HeaderMap,
    Json(body): Json<PlaceOrderBody>,
) -> Result<Response, OrderError> {
    let u = current(user)?;

    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let address = body.address.ok_or(OrderError::InvalidRequest)?;
    let items = parse_items(&body.items)?;

    let url = order_service::place_online(&state, u.id, items, address, origin).await?;

    Ok(Json(json!({ "success": true, "url": url })).into_response())
}

// POST /order/webhook
//
// No session auth here: authenticity comes from the gateway signature over
// the raw body. Verification happens before the payload is even parsed.
// Internal dispatch failures after a valid signature surface as 5xx so the
// gateway retries; transitions are idempotent, so retries converge.
pub async fn post_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let sig = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !stripe::verify_signature(&body, sig, &state.settings.stripe_webhook_secret) {
        tracing::warn!("webhook signature verification failed");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Webhook signature verification failed" })),
        )
            .into_response();
    }

    let event = match reconcile_service::parse_event(&body) {
        Ok(ev) => ev,
        Err(e) => return e.into_response(),
    };

    match reconcile_service::handle_event(&state, event).await {
        Ok(()) => Json(json!({ "received": true })).into_response(),
        Err(e) => e.into_response(),
    }
}

// GET /order/mine
pub async fn get_mine(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Result<Response, OrderError> {
    let u = current(user)?;

    let orders = order_query_service::list_for_user(&state, u.id).await?;
    Ok(Json(json!({ "success": true, "orders": orders })).into_response())
}

// GET /order/all (seller account only)
pub async fn get_all(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Result<Response, OrderError> {
    let u = current(user)?;

    if state.settings.seller_email.is_empty() || u.email != state.settings.seller_email {
        return Err(OrderError::Unauthorized);
    }

    let orders = order_query_service::list_all(&state).await?;
    Ok(Json(json!({ "success": true, "orders": orders })).into_response())
}
