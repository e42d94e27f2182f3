use futures_util::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::FindOptions;

use crate::{errors::OrderError, models::Order, AppState};

fn orders(state: &AppState) -> mongodb::Collection<Order> {
    state.db.collection::<Order>("orders")
}

pub async fn insert(state: &AppState, order: &Order) -> Result<(), OrderError> {
    orders(state).insert_one(order, None).await?;
    Ok(())
}

pub async fn set_checkout_session(
    state: &AppState,
    order_id: ObjectId,
    session_id: &str,
) -> Result<(), OrderError> {
    orders(state)
        .update_one(
            doc! { "_id": order_id },
            doc! { "$set": { "checkout_session_id": session_id } },
            None,
        )
        .await?;
    Ok(())
}

/// Settlement transition. Re-applying to an already-paid order is a no-op,
/// which is what makes duplicate success deliveries safe.
pub async fn mark_paid(state: &AppState, order_id: ObjectId) -> Result<(), OrderError> {
    orders(state)
        .update_one(
            doc! { "_id": order_id },
            doc! { "$set": { "is_paid": true } },
            None,
        )
        .await?;
    Ok(())
}

/// Removes a provisional order. Deleting an id that is already gone is Ok.
pub async fn delete(state: &AppState, order_id: ObjectId) -> Result<(), OrderError> {
    orders(state).delete_one(doc! { "_id": order_id }, None).await?;
    Ok(())
}

pub async fn find_by_id(state: &AppState, order_id: ObjectId) -> Result<Option<Order>, OrderError> {
    Ok(orders(state).find_one(doc! { "_id": order_id }, None).await?)
}

/// Correlation fallback when gateway metadata is missing.
pub async fn find_by_session(
    state: &AppState,
    session_id: &str,
) -> Result<Option<Order>, OrderError> {
    Ok(orders(state)
        .find_one(doc! { "checkout_session_id": session_id }, None)
        .await?)
}

/// Only COD orders and confirmed online orders count as settled; provisional
/// online orders stay invisible to every listing.
pub fn settled_filter(user_id: Option<ObjectId>) -> Document {
    let mut filter = doc! {
        "$or": [ { "payment_type": "COD" }, { "is_paid": true } ],
    };
    if let Some(uid) = user_id {
        filter.insert("user_id", uid);
    }
    filter
}

pub async fn find_settled(
    state: &AppState,
    user_id: Option<ObjectId>,
) -> Result<Vec<Order>, OrderError> {
    let find_opts = FindOptions::builder().sort(doc! { "created_at": -1 }).build();

    let mut cursor = orders(state).find(settled_filter(user_id), find_opts).await?;

    let mut out: Vec<Order> = vec![];
    while let Some(res) = cursor.next().await {
        out.push(res?);
    }
    Ok(out)
}
