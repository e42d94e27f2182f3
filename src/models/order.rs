use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::address::AddressSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    #[serde(rename = "COD")]
    Cod,
    #[serde(rename = "Online")]
    Online,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cod => "COD",
            PaymentType::Online => "Online",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: ObjectId,
    pub quantity: i64,
}

/// A placed order. `amount` is always recomputed server-side from catalog
/// prices plus the surcharge; it is never taken from client input.
///
/// An `Online` order with `is_paid == false` is provisional: it is hidden
/// from settlement listings until the gateway confirms or rejects payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub user_id: ObjectId,

    pub items: Vec<OrderItem>,

    // minor units (cents)
    pub amount: i64,

    pub address: AddressSnapshot,

    pub payment_type: PaymentType,

    pub is_paid: bool,

    // gateway correlation; set once the checkout session exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_session_id: Option<String>,

    pub created_at: i64,
}
