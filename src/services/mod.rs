pub mod stripe;
pub mod db_init;

pub mod auth_service;
pub mod user_service;
pub mod product_service;
pub mod address_service;

pub mod pricing_service;
pub mod order_store;
pub mod order_service;
pub mod reconcile_service;
pub mod order_query_service;
