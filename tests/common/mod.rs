// tests/common/mod.rs
#![allow(dead_code)] // Allow unused helpers in this common test module

use guitarhub::db;
use guitarhub::models::ItemType;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Fresh in-memory database with the full schema.
///
/// A single pooled connection keeps every query on the same `:memory:`
/// database; with more connections each would see its own empty one.
pub async fn test_pool() -> SqlitePool {
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("failed to open in-memory database");
  db::init_schema(&pool).await.expect("failed to initialize schema");
  pool
}

pub async fn create_user(pool: &SqlitePool, email: &str) -> i64 {
  let (id,): (i64,) = sqlx::query_as(
    "INSERT INTO users (first_name, last_name, email, password_hash) VALUES ('Test', 'User', ?, 'x') RETURNING id",
  )
  .bind(email)
  .fetch_one(pool)
  .await
  .expect("failed to insert user");
  id
}

pub struct SeedItem<'a> {
  pub name: &'a str,
  pub category: &'a str,
  pub brand: &'a str,
  pub price: f64,
  pub featured: bool,
  pub badge: Option<&'a str>,
  pub description: Option<&'a str>,
}

impl Default for SeedItem<'_> {
  fn default() -> Self {
    Self {
      name: "Test Item",
      category: "electric",
      brand: "fender",
      price: 100.0,
      featured: false,
      badge: None,
      description: None,
    }
  }
}

pub async fn insert_item(pool: &SqlitePool, kind: ItemType, item: SeedItem<'_>) -> i64 {
  let sql = format!(
    "INSERT INTO {} (name, category, brand, price, description, badge, featured, stock_quantity) \
     VALUES (?, ?, ?, ?, ?, ?, ?, 10) RETURNING id",
    kind.table()
  );
  let (id,): (i64,) = sqlx::query_as(&sql)
    .bind(item.name)
    .bind(item.category)
    .bind(item.brand)
    .bind(item.price)
    .bind(item.description)
    .bind(item.badge)
    .bind(item.featured)
    .fetch_one(pool)
    .await
    .expect("failed to insert catalog item");
  id
}

pub async fn insert_product(pool: &SqlitePool, name: &str, price: f64) -> i64 {
  insert_item(pool, ItemType::Product, SeedItem { name, price, ..Default::default() }).await
}

pub async fn insert_accessory(pool: &SqlitePool, name: &str, price: f64) -> i64 {
  insert_item(
    pool,
    ItemType::Accessory,
    SeedItem { name, price, category: "strings", brand: "daddario", ..Default::default() },
  )
  .await
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
  let sql = format!("SELECT COUNT(*) FROM {}", table);
  let (count,): (i64,) = sqlx::query_as(&sql).fetch_one(pool).await.expect("count query failed");
  count
}
