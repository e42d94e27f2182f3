use futures_util::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::{errors::OrderError, models::Product, AppState};

pub async fn list(state: &AppState) -> Result<Vec<Product>, OrderError> {
    let products = state.db.collection::<Product>("products");

    let mut cursor = products.find(doc! {}, None).await?;

    let mut out: Vec<Product> = vec![];
    while let Some(res) = cursor.next().await {
        out.push(res?);
    }
    Ok(out)
}

pub async fn get(state: &AppState, id: ObjectId) -> Result<Product, OrderError> {
    let products = state.db.collection::<Product>("products");

    products
        .find_one(doc! { "_id": id }, None)
        .await?
        .ok_or_else(|| OrderError::ProductNotFound(id.to_hex()))
}
