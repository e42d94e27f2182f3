use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::{
    errors::OrderError,
    models::{AddressSnapshot, Order, OrderItem, PaymentType},
    services::{order_store, pricing_service, stripe},
    AppState,
};

fn validate(items: &[OrderItem]) -> Result<(), OrderError> {
    if items.is_empty() || items.iter().any(|i| i.quantity <= 0) {
        return Err(OrderError::InvalidRequest);
    }
    Ok(())
}

/// Cash on delivery: priced, persisted, done. Settlement needs no further
/// asynchronous step, so the order is immediately visible in listings.
pub async fn place_cod(
    state: &AppState,
    user_id: ObjectId,
    items: Vec<OrderItem>,
    address: AddressSnapshot,
) -> Result<(), OrderError> {
    validate(&items)?;

    let priced = pricing_service::price_cart(state, &items).await?;

    let order = Order {
        id: ObjectId::new(),
        user_id,
        items,
        amount: priced.amount,
        address,
        payment_type: PaymentType::Cod,
        is_paid: false,
        checkout_session_id: None,
        created_at: Utc::now().timestamp(),
    };

    order_store::insert(state, &order).await?;
    tracing::info!(order_id = %order.id, amount = order.amount, "placed COD order");
    Ok(())
}

/// Gateway display prices carry the surcharge per unit, mirroring the order
/// total computation (floor of +2%). Checked like the total itself.
fn checkout_lines(
    priced: &pricing_service::PricedCart,
) -> Result<Vec<stripe::CheckoutLine>, OrderError> {
    priced
        .lines
        .iter()
        .map(|l| {
            let unit_amount = l
                .offer_price
                .checked_mul(100 + pricing_service::SURCHARGE_PERCENT)
                .ok_or(OrderError::InvalidRequest)?
                / 100;
            Ok(stripe::CheckoutLine {
                name: l.name.clone(),
                unit_amount,
                quantity: l.quantity,
            })
        })
        .collect()
}

/// Online payment: persist a provisional order, then open a gateway checkout
/// session correlated to it via metadata and a stored session id. Returns the
/// URL the client should redirect to.
///
/// If session creation fails after the insert, the provisional row is
/// compensating-deleted so no orphan is left behind.
pub async fn place_online(
    state: &AppState,
    user_id: ObjectId,
    items: Vec<OrderItem>,
    address: AddressSnapshot,
    origin: &str,
) -> Result<String, OrderError> {
    validate(&items)?;
    if origin.is_empty() {
        return Err(OrderError::InvalidRequest);
    }

    let priced = pricing_service::price_cart(state, &items).await?;
    let lines = checkout_lines(&priced)?;

    let order = Order {
        id: ObjectId::new(),
        user_id,
        items,
        amount: priced.amount,
        address,
        payment_type: PaymentType::Online,
        is_paid: false,
        checkout_session_id: None,
        created_at: Utc::now().timestamp(),
    };

    order_store::insert(state, &order).await?;

    let params = stripe::CheckoutParams {
        lines,
        success_url: format!("{origin}/loader?next=my-orders"),
        cancel_url: format!("{origin}/cart"),
        order_id: order.id.to_hex(),
        user_id: user_id.to_hex(),
    };

    let session = match state.stripe.create_checkout_session(&params).await {
        Ok(s) => s,
        Err(e) => {
            // compensating delete: do not leave an orphaned provisional order
            if let Err(del) = order_store::delete(state, order.id).await {
                tracing::error!(order_id = %order.id, "rollback of provisional order failed: {del}");
            }
            return Err(OrderError::Gateway(e));
        }
    };

    order_store::set_checkout_session(state, order.id, &session.id).await?;

    let url = session
        .url
        .ok_or_else(|| OrderError::Gateway("checkout session has no url".to_string()))?;

    tracing::info!(order_id = %order.id, session_id = %session.id, "opened checkout session");
    Ok(url)
}
