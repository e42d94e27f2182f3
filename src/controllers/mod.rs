pub mod auth_controller;
pub mod product_controller;
pub mod cart_controller;
pub mod address_controller;
pub mod order_controller;
pub mod home_controller;
