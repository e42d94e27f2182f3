use std::collections::HashMap;

use mongodb::bson::{doc, oid::ObjectId};
use serde::Serialize;

use crate::{
    errors::OrderError,
    models::{Order, Product},
    services::order_store,
    AppState,
};

#[derive(Debug, Serialize)]
pub struct OrderItemView {
    pub product: Product,
    pub quantity: i64,
}

/// A settled order with its line items joined against the catalog.
#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItemView>,
    pub amount: i64,
    pub address: crate::models::AddressSnapshot,
    pub payment_type: &'static str,
    pub is_paid: bool,
    pub created_at: i64,
}

async fn enrich(state: &AppState, orders: Vec<Order>) -> Result<Vec<OrderView>, OrderError> {
    let products = state.db.collection::<Product>("products");

    // one lookup per distinct product across the page of orders
    let mut cache: HashMap<ObjectId, Option<Product>> = HashMap::new();

    let mut out = Vec::with_capacity(orders.len());
    for order in orders {
        let mut items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let entry = match cache.get(&item.product) {
                Some(hit) => hit.clone(),
                None => {
                    let found = products.find_one(doc! { "_id": item.product }, None).await?;
                    cache.insert(item.product, found.clone());
                    found
                }
            };
            // products deleted since placement are skipped in the view
            if let Some(product) = entry {
                items.push(OrderItemView {
                    product,
                    quantity: item.quantity,
                });
            }
        }

        out.push(OrderView {
            id: order.id.to_hex(),
            user_id: order.user_id.to_hex(),
            items,
            amount: order.amount,
            address: order.address,
            payment_type: order.payment_type.as_str(),
            is_paid: order.is_paid,
            created_at: order.created_at,
        });
    }
    Ok(out)
}

/// Settled orders for one customer, newest first.
pub async fn list_for_user(
    state: &AppState,
    user_id: ObjectId,
) -> Result<Vec<OrderView>, OrderError> {
    let orders = order_store::find_settled(state, Some(user_id)).await?;
    enrich(state, orders).await
}

/// Every settled order in the store, newest first. Seller view.
pub async fn list_all(state: &AppState) -> Result<Vec<OrderView>, OrderError> {
    let orders = order_store::find_settled(state, None).await?;
    enrich(state, orders).await
}
