use axum::{routing::post, Router};

use crate::{controllers::cart_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/cart/update", post(cart_controller::post_update))
}
