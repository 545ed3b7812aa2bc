// src/db.rs

//! SQLite pool construction and schema initialization.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::errors::Result;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  first_name TEXT NOT NULL,
  last_name TEXT NOT NULL,
  email TEXT UNIQUE NOT NULL,
  password_hash TEXT NOT NULL,
  created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
  updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL,
  category TEXT NOT NULL,
  brand TEXT NOT NULL,
  price REAL NOT NULL CHECK(price >= 0),
  description TEXT,
  image TEXT,
  badge TEXT,
  featured INTEGER DEFAULT 0,
  stock_quantity INTEGER DEFAULT 0,
  created_at DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

const CREATE_ACCESSORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS accessories (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL,
  category TEXT NOT NULL,
  brand TEXT NOT NULL,
  price REAL NOT NULL CHECK(price >= 0),
  description TEXT,
  image TEXT,
  badge TEXT,
  featured INTEGER DEFAULT 0,
  stock_quantity INTEGER DEFAULT 0,
  created_at DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

// The UNIQUE constraint is what the merge-by-increment upsert conflicts against;
// two concurrent adds for the same line can never produce duplicate rows.
const CREATE_CART_ITEMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS cart_items (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  user_id INTEGER NOT NULL,
  item_type TEXT NOT NULL CHECK(item_type IN ('product', 'accessory')),
  item_id INTEGER NOT NULL,
  quantity INTEGER NOT NULL CHECK(quantity >= 1),
  created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
  FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
  UNIQUE(user_id, item_type, item_id)
)
"#;

const CREATE_ORDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  user_id INTEGER NOT NULL,
  total_amount REAL NOT NULL,
  status TEXT NOT NULL DEFAULT 'pending',
  shipping_address TEXT,
  payment_method TEXT,
  created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
  FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
)
"#;

// item_name and unit_price are snapshots taken at order time; later catalog
// changes must not alter historical orders.
const CREATE_ORDER_ITEMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS order_items (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  order_id INTEGER NOT NULL,
  item_type TEXT NOT NULL CHECK(item_type IN ('product', 'accessory')),
  item_id INTEGER NOT NULL,
  item_name TEXT NOT NULL,
  quantity INTEGER NOT NULL,
  unit_price REAL NOT NULL,
  FOREIGN KEY (order_id) REFERENCES orders(id) ON DELETE CASCADE
)
"#;

const CREATE_REVIEWS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS reviews (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  user_id INTEGER NOT NULL,
  item_type TEXT NOT NULL CHECK(item_type IN ('product', 'accessory')),
  item_id INTEGER NOT NULL,
  rating INTEGER NOT NULL CHECK(rating >= 1 AND rating <= 5),
  comment TEXT,
  created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
  FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
  UNIQUE(user_id, item_type, item_id)
)
"#;

/// Connect to the SQLite database named by `database_url`.
///
/// Foreign keys are enabled on every connection; the database file is created
/// on first run.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
  let options = SqliteConnectOptions::from_str(database_url)
    .map_err(sqlx::Error::from)?
    .create_if_missing(true)
    .foreign_keys(true);

  let pool = SqlitePoolOptions::new().connect_with(options).await?;
  Ok(pool)
}

/// Create all tables if they do not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
  for ddl in [
    CREATE_USERS_TABLE,
    CREATE_PRODUCTS_TABLE,
    CREATE_ACCESSORIES_TABLE,
    CREATE_CART_ITEMS_TABLE,
    CREATE_ORDERS_TABLE,
    CREATE_ORDER_ITEMS_TABLE,
    CREATE_REVIEWS_TABLE,
  ] {
    sqlx::query(ddl).execute(pool).await?;
  }
  tracing::info!("Database schema initialized.");
  Ok(())
}
