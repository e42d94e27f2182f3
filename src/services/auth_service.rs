use axum_extra::extract::cookie::{Cookie, SameSite};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use mongodb::bson::{doc, oid::ObjectId};

use crate::{models::User, AppState};

#[derive(serde::Serialize)]
struct Claims {
    sub: String,
    exp: usize,
}

pub fn make_jwt(state: &AppState, user_id: &ObjectId) -> Result<String, String> {
    let exp = (Utc::now() + Duration::days(7)).timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_hex(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| e.to_string())
}

pub fn auth_cookie(state: &AppState, token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(state.settings.jwt_cookie_name.clone(), token);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    if state.settings.cookie_secure {
        cookie.set_secure(true);
    }
    cookie
}

pub fn clear_auth_cookie(state: &AppState) -> Cookie<'static> {
    let mut cookie = Cookie::new(state.settings.jwt_cookie_name.clone(), "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.make_removal();
    cookie
}

pub async fn login_user(state: &AppState, email: &str, password: &str) -> Result<User, String> {
    let users = state.db.collection::<User>("users");

    let user = match users.find_one(doc! { "email": email }, None).await {
        Ok(Some(u)) => u,
        Ok(None) => return Err("Invalid email or password.".to_string()),
        Err(_) => return Err("Server error. Please try again.".to_string()),
    };

    if !verify(password, &user.password_hash).unwrap_or(false) {
        return Err("Invalid email or password.".to_string());
    }

    Ok(user)
}

pub async fn register_user(
    state: &AppState,
    username: &str,
    email: &str,
    password: &str,
) -> Result<ObjectId, String> {
    let users = state.db.collection::<User>("users");

    match users.find_one(doc! { "email": email }, None).await {
        Ok(Some(_)) => return Err("Email has already been taken!".to_string()),
        Ok(None) => {}
        Err(_) => return Err("There is a problem registering this user!".to_string()),
    }

    let pw_hash =
        hash(password, DEFAULT_COST).map_err(|_| "There is a problem registering this user!".to_string())?;

    let insert = state
        .db
        .collection("users")
        .insert_one(
            doc! {
                "email": email,
                "username": username,
                "password_hash": pw_hash,
                "cart_items": {},
            },
            None,
        )
        .await
        .map_err(|_| "There is a problem registering this user!".to_string())?;

    insert
        .inserted_id
        .as_object_id()
        .ok_or_else(|| "There is a problem registering this user!".to_string())
}
