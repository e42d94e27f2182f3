use axum::{
    routing::{get, post},
    Router,
};

use crate::{controllers::order_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/order/cod", post(order_controller::post_cod))
        .route("/order/online", post(order_controller::post_online))
        .route("/order/webhook", post(order_controller::post_webhook))
        .route("/order/mine", get(order_controller::get_mine))
        .route("/order/all", get(order_controller::get_all))
}
