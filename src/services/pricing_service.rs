use mongodb::bson::doc;

use crate::{
    errors::OrderError,
    models::{OrderItem, Product},
    AppState,
};

/// Processing surcharge applied to every order, both payment modes.
pub const SURCHARGE_PERCENT: i64 = 2;

/// A cart line with its catalog price resolved; display data for the
/// gateway's checkout page comes from here, never from client input.
#[derive(Debug, Clone)]
pub struct ResolvedLine {
    pub name: String,
    // minor units
    pub offer_price: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone)]
pub struct PricedCart {
    pub lines: Vec<ResolvedLine>,
    // subtotal + surcharge, minor units
    pub amount: i64,
}

/// Quantities come straight from the client, so every step is checked; an
/// overflowing cart is rejected rather than wrapped into a bogus amount.
pub fn total_with_surcharge(subtotal: i64) -> Option<i64> {
    let surcharge = subtotal.checked_mul(SURCHARGE_PERCENT)? / 100;
    subtotal.checked_add(surcharge)
}

/// Sole authority for order amounts: resolves every line against the catalog
/// and computes the surcharge-inclusive total. Read-only.
pub async fn price_cart(state: &AppState, items: &[OrderItem]) -> Result<PricedCart, OrderError> {
    let products = state.db.collection::<Product>("products");

    let mut lines = Vec::with_capacity(items.len());
    let mut subtotal: i64 = 0;

    for item in items {
        let product = products
            .find_one(doc! { "_id": item.product }, None)
            .await?
            .ok_or_else(|| OrderError::ProductNotFound(item.product.to_hex()))?;

        let line_total = product
            .offer_price
            .checked_mul(item.quantity)
            .ok_or(OrderError::InvalidRequest)?;
        subtotal = subtotal
            .checked_add(line_total)
            .ok_or(OrderError::InvalidRequest)?;

        lines.push(ResolvedLine {
            name: product.name,
            offer_price: product.offer_price,
            quantity: item.quantity,
        });
    }

    let amount = total_with_surcharge(subtotal).ok_or(OrderError::InvalidRequest)?;

    Ok(PricedCart { lines, amount })
}
