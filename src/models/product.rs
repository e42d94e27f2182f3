use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

fn default_in_stock() -> bool {
    true
}

/// Catalog entry. Prices are integer minor units (cents); `offer_price` is
/// what the customer is actually charged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    pub price: i64,
    pub offer_price: i64,

    #[serde(default)]
    pub image: Vec<String>,

    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}
