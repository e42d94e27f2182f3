use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Saved shipping address belonging to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub user_id: ObjectId,

    #[serde(flatten)]
    pub fields: AddressSnapshot,
}

/// The address payload itself. Orders embed a copy of this at placement time
/// so that later edits to the saved address do not change a placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressSnapshot {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zipcode: String,
    pub country: String,
    #[serde(default)]
    pub phone: String,
}
