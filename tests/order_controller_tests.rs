use axum::{
    http::{header, Request, StatusCode},
    routing::{get, post},
    Router,
};
use hmac::{Hmac, Mac};
use http_body_util::BodyExt;
use mongodb::{bson::oid::ObjectId, Client};
use rustcart::{config, controllers::order_controller, models::CurrentUser, services, AppState};
use sha2::Sha256;
use tower::ServiceExt;

const WEBHOOK_SECRET: &str = "whsec_test_secret";

async fn test_state() -> AppState {
    let mut settings = config::load();
    settings.stripe_secret_key = String::new();
    settings.stripe_webhook_secret = WEBHOOK_SECRET.to_string();

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

async fn response_body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

fn sign(payload: &[u8]) -> String {
    let ts = chrono::Utc::now().timestamp();
    let mut mac = Hmac::<Sha256>::new_from_slice(WEBHOOK_SECRET.as_bytes()).unwrap();
    mac.update(format!("{ts}.").as_bytes());
    mac.update(payload);
    format!("t={ts},v1={}", hex::encode(mac.finalize().into_bytes()))
}

fn authed(mut req: Request<axum::body::Body>) -> Request<axum::body::Body> {
    req.extensions_mut().insert(CurrentUser {
        id: ObjectId::new(),
        email: "test@example.com".to_string(),
        username: "test".to_string(),
    });
    req
}

#[tokio::test]
async fn post_cod_unauthorized_returns_401() {
    let state = test_state().await;
    let app = Router::new()
        .route("/order/cod", post(order_controller::post_cod))
        .with_state(state);

    let req = Request::builder()
        .method("POST")
        .uri("/order/cod")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(r#"{"items":[],"address":null}"#))
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn post_cod_empty_cart_returns_400() {
    let state = test_state().await;
    let app = Router::new()
        .route("/order/cod", post(order_controller::post_cod))
        .with_state(state);

    let body = r#"{"items":[],"address":{"street":"1 Main St","city":"Sofia","country":"BG"}}"#;
    let req = authed(
        Request::builder()
            .method("POST")
            .uri("/order/cod")
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(body))
            .unwrap(),
    );

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("Invalid order data"));
}

#[tokio::test]
async fn post_cod_missing_address_returns_400() {
    let state = test_state().await;
    let app = Router::new()
        .route("/order/cod", post(order_controller::post_cod))
        .with_state(state);

    let body = format!(
        r#"{{"items":[{{"product":"{}","quantity":1}}]}}"#,
        ObjectId::new().to_hex()
    );
    let req = authed(
        Request::builder()
            .method("POST")
            .uri("/order/cod")
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(body))
            .unwrap(),
    );

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn post_online_empty_cart_returns_400() {
    let state = test_state().await;
    let app = Router::new()
        .route("/order/online", post(order_controller::post_online))
        .with_state(state);

    let body = r#"{"items":[],"address":{"street":"1 Main St","city":"Sofia","country":"BG"}}"#;
    let req = authed(
        Request::builder()
            .method("POST")
            .uri("/order/online")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(body))
            .unwrap(),
    );

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("Invalid order data"));
}

#[tokio::test]
async fn post_online_zero_quantity_returns_400() {
    let state = test_state().await;
    let app = Router::new()
        .route("/order/online", post(order_controller::post_online))
        .with_state(state);

    let body = format!(
        r#"{{"items":[{{"product":"{}","quantity":0}}],"address":{{"street":"1 Main St","city":"Sofia","country":"BG"}}}}"#,
        ObjectId::new().to_hex()
    );
    let req = authed(
        Request::builder()
            .method("POST")
            .uri("/order/online")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(body))
            .unwrap(),
    );

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn webhook_with_invalid_signature_returns_400() {
    let state = test_state().await;
    let app = Router::new()
        .route("/order/webhook", post(order_controller::post_webhook))
        .with_state(state);

    let payload = r#"{"type":"payment_intent.succeeded","data":{"object":{"id":"pi_1"}}}"#;
    let req = Request::builder()
        .method("POST")
        .uri("/order/webhook")
        .header("Stripe-Signature", "t=1,v1=deadbeef")
        .body(axum::body::Body::from(payload))
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("signature"));
}

#[tokio::test]
async fn webhook_without_signature_header_returns_400() {
    let state = test_state().await;
    let app = Router::new()
        .route("/order/webhook", post(order_controller::post_webhook))
        .with_state(state);

    let req = Request::builder()
        .method("POST")
        .uri("/order/webhook")
        .body(axum::body::Body::from("{}"))
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn webhook_acknowledges_unhandled_event_kinds() {
    let state = test_state().await;
    let app = Router::new()
        .route("/order/webhook", post(order_controller::post_webhook))
        .with_state(state);

    let payload = r#"{"type":"charge.refunded","data":{"object":{"id":"ch_1"}}}"#;
    let req = Request::builder()
        .method("POST")
        .uri("/order/webhook")
        .header("Stripe-Signature", sign(payload.as_bytes()))
        .body(axum::body::Body::from(payload))
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("received"));
}

#[tokio::test]
async fn webhook_rejects_signed_but_malformed_payload() {
    let state = test_state().await;
    let app = Router::new()
        .route("/order/webhook", post(order_controller::post_webhook))
        .with_state(state);

    let payload = "not json at all";
    let req = Request::builder()
        .method("POST")
        .uri("/order/webhook")
        .header("Stripe-Signature", sign(payload.as_bytes()))
        .body(axum::body::Body::from(payload))
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_mine_unauthorized_returns_401() {
    let state = test_state().await;
    let app = Router::new()
        .route("/order/mine", get(order_controller::get_mine))
        .with_state(state);

    let req = Request::builder()
        .method("GET")
        .uri("/order/mine")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn get_all_requires_the_seller_account() {
    let mut state = test_state().await;
    state.settings.seller_email = "seller@example.com".to_string();

    let app = Router::new()
        .route("/order/all", get(order_controller::get_all))
        .with_state(state);

    // authenticated, but not the seller
    let req = authed(
        Request::builder()
            .method("GET")
            .uri("/order/all")
            .body(axum::body::Body::empty())
            .unwrap(),
    );

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
