// src/models/order_item.rs

use serde::Serialize;
use sqlx::FromRow;

use super::catalog::ItemType;

/// One `order_items` row.
///
/// `item_name` and `unit_price` are snapshots taken when the order was created;
/// they stay fixed even if the catalog row is renamed or repriced later.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
  pub id: i64,
  pub order_id: i64,
  pub item_type: ItemType,
  pub item_id: i64,
  pub item_name: String,
  pub quantity: i64,
  pub unit_price: f64,
}
