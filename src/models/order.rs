// src/models/order.rs

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use super::order_item::OrderItem;

/// An `orders` row. Immutable after creation; there is no status-transition API,
/// so every order stays `pending`.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: i64,
  pub user_id: i64,
  pub total_amount: f64,
  pub status: String,
  pub shipping_address: Option<String>,
  pub payment_method: Option<String>,
  pub created_at: Option<NaiveDateTime>,
}

/// An order with its nested line items, for history responses.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
  #[serde(flatten)]
  pub order: Order,
  pub items: Vec<OrderItem>,
}
