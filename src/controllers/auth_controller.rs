use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

use crate::{models::CurrentUser, services::auth_service, AppState};

fn is_valid_email(email: &str) -> bool {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    re.is_match(email)
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "message": message })),
    )
        .into_response()
}

#[derive(Deserialize)]
pub struct RegisterBody {
    pub username: String,
    pub email: String,
    pub password: String,
}

// POST /auth/register
pub async fn post_register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterBody>,
) -> Response {
    let username = body.username.trim();
    let email = body.email.trim();

    if username.is_empty() || email.is_empty() || body.password.len() < 6 {
        return bad_request("Username, email and a password of at least 6 characters are required.");
    }
    if !is_valid_email(email) {
        return bad_request("Invalid email.");
    }

    let user_id = match auth_service::register_user(&state, username, email, &body.password).await {
        Ok(id) => id,
        Err(msg) => return bad_request(&msg),
    };

    let token = match auth_service::make_jwt(&state, &user_id) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("jwt encode failed: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "message": "Server error" })),
            )
                .into_response();
        }
    };

    let jar = jar.add(auth_service::auth_cookie(&state, token));
    (jar, Json(json!({ "success": true, "message": "Registered successfully" }))).into_response()
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

// POST /auth/login
pub async fn post_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Response {
    let email = body.email.trim();

    if email.is_empty() || body.password.is_empty() {
        return bad_request("Email and password are required.");
    }

    let user = match auth_service::login_user(&state, email, &body.password).await {
        Ok(u) => u,
        Err(msg) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "message": msg })),
            )
                .into_response();
        }
    };

    let token = match auth_service::make_jwt(&state, &user.id) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("jwt encode failed: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "message": "Server error" })),
            )
                .into_response();
        }
    };

    let jar = jar.add(auth_service::auth_cookie(&state, token));
    (jar, Json(json!({ "success": true, "message": "Logged in" }))).into_response()
}

// GET /auth/logout
pub async fn get_logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let jar = jar.add(auth_service::clear_auth_cookie(&state));
    (jar, Json(json!({ "success": true, "message": "Logged out" }))).into_response()
}

// GET /auth/is-auth
pub async fn get_is_auth(user: Option<Extension<CurrentUser>>) -> Response {
    match user {
        Some(Extension(u)) => Json(json!({ "success": true, "user": u })).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Not authenticated" })),
        )
            .into_response(),
    }
}
