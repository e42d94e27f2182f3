use std::collections::HashMap;

use mongodb::bson::{doc, oid::ObjectId, to_bson};

use crate::{errors::OrderError, models::User, AppState};

/// Replace the user's active cart snapshot.
pub async fn update_cart(
    state: &AppState,
    user_id: ObjectId,
    cart_items: &HashMap<String, i64>,
) -> Result<(), OrderError> {
    let users = state.db.collection::<User>("users");
    let cart = to_bson(cart_items).map_err(|_| OrderError::InvalidRequest)?;

    users
        .update_one(
            doc! { "_id": user_id },
            doc! { "$set": { "cart_items": cart } },
            None,
        )
        .await?;
    Ok(())
}

/// Empty the cart once an online payment is confirmed.
pub async fn clear_cart(state: &AppState, user_id: ObjectId) -> Result<(), OrderError> {
    let users = state.db.collection::<User>("users");
    users
        .update_one(
            doc! { "_id": user_id },
            doc! { "$set": { "cart_items": {} } },
            None,
        )
        .await?;
    Ok(())
}
