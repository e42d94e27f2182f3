use mongodb::bson::oid::ObjectId;

use crate::{
    errors::OrderError,
    services::{order_store, stripe::CheckoutSession, user_service},
    AppState,
};

/// Closed vocabulary of gateway notifications we act on. Anything else is
/// acknowledged without action so new gateway event kinds cannot break us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    PaymentSucceeded { payment_intent: String },
    PaymentFailed { payment_intent: String },
    Unhandled(String),
}

/// Parse a verified webhook body. Callers must have checked the signature
/// first; this only interprets the payload.
pub fn parse_event(payload: &[u8]) -> Result<GatewayEvent, OrderError> {
    let json: serde_json::Value =
        serde_json::from_slice(payload).map_err(|_| OrderError::InvalidRequest)?;

    let kind = json
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(OrderError::InvalidRequest)?;

    let payment_intent = || {
        json.pointer("/data/object/id")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or(OrderError::InvalidRequest)
    };

    Ok(match kind {
        "payment_intent.succeeded" => GatewayEvent::PaymentSucceeded {
            payment_intent: payment_intent()?,
        },
        "payment_intent.payment_failed" => GatewayEvent::PaymentFailed {
            payment_intent: payment_intent()?,
        },
        other => GatewayEvent::Unhandled(other.to_string()),
    })
}

/// {order, owner} resolved from a checkout session: metadata first, stored
/// session correlation as fallback.
async fn correlate(
    state: &AppState,
    session: &CheckoutSession,
) -> Result<Option<(ObjectId, Option<ObjectId>)>, OrderError> {
    if let Some(order_id) = session
        .metadata
        .get("order_id")
        .and_then(|s| ObjectId::parse_str(s).ok())
    {
        let user_id = session
            .metadata
            .get("user_id")
            .and_then(|s| ObjectId::parse_str(s).ok());
        return Ok(Some((order_id, user_id)));
    }

    if let Some(order) = order_store::find_by_session(state, &session.id).await? {
        return Ok(Some((order.id, Some(order.user_id))));
    }

    Ok(None)
}

/// Apply a gateway outcome to local order state.
///
/// Transitions are idempotent: a re-delivered success re-sets `is_paid` to
/// true, a failure for an already-removed order deletes nothing. Either way
/// the second delivery converges on the same state.
pub async fn handle_event(state: &AppState, event: GatewayEvent) -> Result<(), OrderError> {
    match event {
        GatewayEvent::PaymentSucceeded { payment_intent } => {
            let sessions = state
                .stripe
                .list_sessions_for_intent(&payment_intent)
                .await
                .map_err(OrderError::Gateway)?;

            let Some(session) = sessions.data.first() else {
                return Err(OrderError::Gateway(format!(
                    "no checkout session for intent {payment_intent}"
                )));
            };

            let Some((order_id, user_id)) = correlate(state, session).await? else {
                tracing::warn!(session_id = %session.id, "success event with no order correlation");
                return Ok(());
            };

            // metadata ids are not trusted blindly; settle only a real order
            let Some(order) = order_store::find_by_id(state, order_id).await? else {
                tracing::warn!(order_id = %order_id, "success event for unknown order");
                return Ok(());
            };

            order_store::mark_paid(state, order.id).await?;
            user_service::clear_cart(state, user_id.unwrap_or(order.user_id)).await?;
            tracing::info!(order_id = %order.id, "order settled");
        }

        GatewayEvent::PaymentFailed { payment_intent } => {
            let sessions = state
                .stripe
                .list_sessions_for_intent(&payment_intent)
                .await
                .map_err(OrderError::Gateway)?;

            let Some(session) = sessions.data.first() else {
                return Err(OrderError::Gateway(format!(
                    "no checkout session for intent {payment_intent}"
                )));
            };

            let Some((order_id, _)) = correlate(state, session).await? else {
                tracing::warn!(session_id = %session.id, "failure event with no order correlation");
                return Ok(());
            };

            order_store::delete(state, order_id).await?;
            tracing::info!(order_id = %order_id, "provisional order removed after failed payment");
        }

        GatewayEvent::Unhandled(kind) => {
            tracing::info!("unhandled gateway event type {kind}");
        }
    }

    Ok(())
}
