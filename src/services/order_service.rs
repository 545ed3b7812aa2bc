// src/services/order_service.rs

//! Cart→order conversion and order history reads.
//!
//! Conversion is the one place in the system that needs true transactional
//! discipline: the order row, its line items and the cart clearing commit
//! together or not at all. A half-written order or a cleared cart with no
//! order behind it must be impossible.

use serde::Serialize;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{error, info, instrument};

use crate::errors::{AppError, Result};
use crate::models::{CartLine, Order, OrderItem, OrderWithItems};
use crate::services::cart_service;

#[derive(Debug, Clone, Serialize)]
pub struct OrderReceipt {
  #[serde(rename = "orderId")]
  pub order_id: i64,
  #[serde(rename = "totalAmount")]
  pub total_amount: f64,
}

const ORDER_COLUMNS: &str = "id, user_id, total_amount, status, shipping_address, payment_method, created_at";
const ORDER_ITEM_COLUMNS: &str = "id, order_id, item_type, item_id, item_name, quantity, unit_price";

/// Convert the user's cart into an order.
///
/// Reads the cart inside the transaction, snapshots current names and prices
/// into the order items, clears the cart, and commits. Any failure after the
/// empty-cart check rolls back wholly and leaves the cart untouched.
#[instrument(name = "order_service::create_order", skip(pool, shipping_address, payment_method), fields(user_id = %user_id))]
pub async fn create_order(
  pool: &SqlitePool,
  user_id: i64,
  shipping_address: Option<String>,
  payment_method: Option<String>,
) -> Result<OrderReceipt> {
  let mut tx = pool.begin().await?;

  let lines = cart_service::fetch_lines(&mut *tx, user_id).await?;
  if lines.is_empty() {
    return Err(AppError::EmptyCart); // tx dropped here, nothing written
  }

  let total_amount: f64 = lines.iter().map(|l| l.price * l.quantity as f64).sum();

  let order_id = write_order(&mut tx, user_id, total_amount, &lines, shipping_address, payment_method)
    .await
    .map_err(|e| {
      error!(error = %e, user_id, "Order transaction failed; rolling back.");
      AppError::OrderCreation(e.to_string())
    })?;

  tx.commit().await.map_err(|e| {
    error!(error = %e, user_id, "Order commit failed.");
    AppError::OrderCreation(e.to_string())
  })?;

  info!(order_id, total_amount, "Order created and cart cleared.");
  Ok(OrderReceipt { order_id, total_amount })
}

// The write half of the conversion; errors bubble as sqlx errors so the caller
// can collapse them into one order-creation failure.
async fn write_order(
  tx: &mut Transaction<'_, Sqlite>,
  user_id: i64,
  total_amount: f64,
  lines: &[CartLine],
  shipping_address: Option<String>,
  payment_method: Option<String>,
) -> std::result::Result<i64, sqlx::Error> {
  let (order_id,): (i64,) = sqlx::query_as(
    r#"
    INSERT INTO orders (user_id, total_amount, status, shipping_address, payment_method)
    VALUES (?, ?, 'pending', ?, ?)
    RETURNING id
    "#,
  )
  .bind(user_id)
  .bind(total_amount)
  .bind(shipping_address)
  .bind(payment_method)
  .fetch_one(&mut **tx)
  .await?;

  for line in lines {
    sqlx::query(
      r#"
      INSERT INTO order_items (order_id, item_type, item_id, item_name, quantity, unit_price)
      VALUES (?, ?, ?, ?, ?, ?)
      "#,
    )
    .bind(order_id)
    .bind(line.item_type)
    .bind(line.item_id)
    .bind(&line.name)
    .bind(line.quantity)
    .bind(line.price)
    .execute(&mut **tx)
    .await?;
  }

  sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
    .bind(user_id)
    .execute(&mut **tx)
    .await?;

  Ok(order_id)
}

/// All of a user's orders, newest first, each with its line items.
#[instrument(name = "order_service::list_orders", skip(pool), fields(user_id = %user_id))]
pub async fn list_orders(pool: &SqlitePool, user_id: i64) -> Result<Vec<OrderWithItems>> {
  let sql = format!(
    "SELECT {} FROM orders WHERE user_id = ? ORDER BY created_at DESC, id DESC",
    ORDER_COLUMNS
  );
  let orders: Vec<Order> = sqlx::query_as(&sql).bind(user_id).fetch_all(pool).await?;

  let mut result = Vec::with_capacity(orders.len());
  for order in orders {
    let items = order_items(pool, order.id).await?;
    result.push(OrderWithItems { order, items });
  }
  Ok(result)
}

/// One order scoped to its owner.
///
/// Absent and owned-by-another produce the same `NotFound`; existence of other
/// users' orders must not leak.
#[instrument(name = "order_service::get_order", skip(pool), fields(user_id = %user_id))]
pub async fn get_order(pool: &SqlitePool, user_id: i64, order_id: i64) -> Result<OrderWithItems> {
  let sql = format!("SELECT {} FROM orders WHERE id = ? AND user_id = ?", ORDER_COLUMNS);
  let order: Order = sqlx::query_as(&sql)
    .bind(order_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

  let items = order_items(pool, order.id).await?;
  Ok(OrderWithItems { order, items })
}

async fn order_items(pool: &SqlitePool, order_id: i64) -> Result<Vec<OrderItem>> {
  let sql = format!("SELECT {} FROM order_items WHERE order_id = ? ORDER BY id ASC", ORDER_ITEM_COLUMNS);
  let items: Vec<OrderItem> = sqlx::query_as(&sql).bind(order_id).fetch_all(pool).await?;
  Ok(items)
}
