use axum::{routing::get, Router};

use crate::{controllers::product_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/product/list", get(product_controller::get_list))
        .route("/product/:id", get(product_controller::get_one))
}
