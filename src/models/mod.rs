// src/models/mod.rs

//! Contains data structures representing database entities.

pub mod cart_item;
pub mod catalog;
pub mod order;
pub mod order_item;
pub mod review;
pub mod user;

// Re-export the model structs for convenient access
pub use cart_item::{AnonymousCartLine, CartLine};
pub use catalog::{CatalogItem, CatalogRef, ItemType};
pub use order::{Order, OrderWithItems};
pub use order_item::OrderItem;
pub use review::ReviewView;
pub use user::User;
