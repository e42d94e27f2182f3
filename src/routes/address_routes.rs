use axum::{
    routing::{get, post},
    Router,
};

use crate::{controllers::address_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/address/add", post(address_controller::post_add))
        .route("/address/get", get(address_controller::get_list))
}
