// Store-level settlement transitions. These hit a real MongoDB, so they are
// ignore-gated; run with `cargo test -- --ignored` against a local mongod.

use chrono::Utc;
use mongodb::{bson::oid::ObjectId, Client};
use rustcart::{
    config,
    models::{AddressSnapshot, Order, OrderItem, PaymentType},
    services::{self, order_store},
    AppState,
};

async fn test_state() -> AppState {
    let mut settings = config::load();
    settings.stripe_secret_key = String::new();

    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("mongodb client");
    let db = client.database(&settings.mongodb_db);

    let stripe = services::stripe::StripeClient::new(settings.stripe_secret_key.clone());

    AppState {
        db,
        settings,
        stripe,
    }
}

fn online_order(user_id: ObjectId) -> Order {
    Order {
        id: ObjectId::new(),
        user_id,
        items: vec![OrderItem {
            product: ObjectId::new(),
            quantity: 2,
        }],
        amount: 204,
        address: AddressSnapshot {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            street: "1 Main St".into(),
            city: "Sofia".into(),
            state: String::new(),
            zipcode: String::new(),
            country: "BG".into(),
            phone: String::new(),
        },
        payment_type: PaymentType::Online,
        is_paid: false,
        checkout_session_id: Some(format!("cs_test_{}", ObjectId::new().to_hex())),
        created_at: Utc::now().timestamp(),
    }
}

#[tokio::test]
#[ignore]
async fn duplicate_success_delivery_converges_on_settled() {
    let state = test_state().await;
    let user_id = ObjectId::new();
    let order = online_order(user_id);

    order_store::insert(&state, &order).await.unwrap();

    // provisional: invisible to the settled listing
    let before = order_store::find_settled(&state, Some(user_id)).await.unwrap();
    assert!(before.iter().all(|o| o.id != order.id));

    // first delivery settles, second re-applies the same state
    order_store::mark_paid(&state, order.id).await.unwrap();
    order_store::mark_paid(&state, order.id).await.unwrap();

    let got = order_store::find_by_id(&state, order.id)
        .await
        .unwrap()
        .expect("order still exists");
    assert!(got.is_paid);
    assert_eq!(got.amount, 204);

    // visible exactly once after settlement
    let after = order_store::find_settled(&state, Some(user_id)).await.unwrap();
    assert_eq!(after.iter().filter(|o| o.id == order.id).count(), 1);

    order_store::delete(&state, order.id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn failure_delivery_for_removed_order_is_a_noop() {
    let state = test_state().await;
    let user_id = ObjectId::new();
    let order = online_order(user_id);

    order_store::insert(&state, &order).await.unwrap();

    // first failure removes the provisional order, redelivery removes nothing
    order_store::delete(&state, order.id).await.unwrap();
    order_store::delete(&state, order.id).await.unwrap();

    assert!(order_store::find_by_id(&state, order.id)
        .await
        .unwrap()
        .is_none());

    let settled = order_store::find_settled(&state, Some(user_id)).await.unwrap();
    assert!(settled.iter().all(|o| o.id != order.id));
}
