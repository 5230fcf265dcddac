pub mod models;
pub mod registry;
pub mod repository;

pub use models::{
    AddCheck, CartLineItem, CartSnapshot, CategoryCart, NewCartItem, ValidatedCart,
    DEFAULT_MIN_ORDER_AMOUNT,
};
pub use registry::CartRegistry;
pub use repository::{CartStore, InMemoryCartStore};
