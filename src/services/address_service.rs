use futures_util::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::{
    errors::OrderError,
    models::{Address, AddressSnapshot},
    AppState,
};

pub async fn add_address(
    state: &AppState,
    user_id: ObjectId,
    fields: AddressSnapshot,
) -> Result<Address, OrderError> {
    let addresses = state.db.collection::<Address>("addresses");

    let address = Address {
        id: ObjectId::new(),
        user_id,
        fields,
    };

    addresses.insert_one(&address, None).await?;
    Ok(address)
}

pub async fn list_for_user(
    state: &AppState,
    user_id: ObjectId,
) -> Result<Vec<Address>, OrderError> {
    let addresses = state.db.collection::<Address>("addresses");

    let mut cursor = addresses.find(doc! { "user_id": user_id }, None).await?;

    let mut out: Vec<Address> = vec![];
    while let Some(res) = cursor.next().await {
        out.push(res?);
    }
    Ok(out)
}
