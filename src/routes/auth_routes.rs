use axum::{
    routing::{get, post},
    Router,
};

use crate::{controllers::auth_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/auth/register", post(auth_controller::post_register))
        .route("/auth/login", post(auth_controller::post_login))
        .route("/auth/logout", get(auth_controller::get_logout))
        .route("/auth/is-auth", get(auth_controller::get_is_auth))
}
