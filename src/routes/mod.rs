use axum::middleware::from_fn_with_state;
use axum::Router;

use crate::{controllers::home_controller, AppState};

pub mod auth_routes;
pub mod product_routes;
pub mod cart_routes;
pub mod address_routes;
pub mod order_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes(router);
    let router = auth_routes::add_routes(router);
    let router = product_routes::add_routes(router);
    let router = cart_routes::add_routes(router);
    let router = address_routes::add_routes(router);
    let router = order_routes::add_routes(router);

    router
        .fallback(home_controller::not_found)
        .layer(from_fn_with_state(state.clone(), crate::auth::require_auth))
        .layer(from_fn_with_state(state.clone(), crate::auth::inject_current_user))
        .with_state(state)
}

fn home_routes(router: Router<AppState>) -> Router<AppState> {
    use axum::routing::get;
    router
        .route("/", get(home_controller::index))
        .route("/health", get(home_controller::health))
}
