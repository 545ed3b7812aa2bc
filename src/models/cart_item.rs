// src/models/cart_item.rs

use serde::{Deserialize, Serialize};

use super::catalog::ItemType;

/// A cart row joined with its catalog item, as returned to clients.
///
/// `id` is the catalog item id and `cartItemId` the cart row id, matching the
/// shape the storefront UI consumes.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartLine {
  #[serde(rename = "id")]
  pub item_id: i64,
  #[serde(rename = "cartItemId")]
  pub cart_item_id: i64,
  pub name: String,
  pub price: f64,
  pub image: Option<String>,
  pub category: String,
  pub quantity: i64,
  #[serde(rename = "productType")]
  pub item_type: ItemType,
}

/// A line from a client-held anonymous cart, as submitted for merging on login.
///
/// Only the reference and quantity matter server-side; the denormalized display
/// fields the client keeps alongside are not trusted.
#[derive(Debug, Clone, Deserialize)]
pub struct AnonymousCartLine {
  pub id: i64,
  #[serde(rename = "productType")]
  pub item_type: ItemType,
  #[serde(default = "default_quantity")]
  pub quantity: i64,
}

fn default_quantity() -> i64 {
  1
}
