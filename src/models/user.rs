use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub email: String,

    pub username: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    // product hex id -> quantity; the active cart snapshot, cleared on payment
    #[serde(default)]
    pub cart_items: HashMap<String, i64>,
}

/// Authenticated identity injected into request extensions by the auth
/// middleware. Deliberately omits the password hash and cart snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: ObjectId,
    pub email: String,
    pub username: String,
}

impl From<User> for CurrentUser {
    fn from(u: User) -> Self {
        CurrentUser {
            id: u.id,
            email: u.email,
            username: u.username,
        }
    }
}
