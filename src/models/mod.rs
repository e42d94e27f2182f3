pub mod user;
pub mod product;
pub mod order;
pub mod address;

pub use user::{CurrentUser, User};
pub use product::Product;
pub use order::{Order, OrderItem, PaymentType};
pub use address::{Address, AddressSnapshot};
