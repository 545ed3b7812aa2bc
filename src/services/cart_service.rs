// src/services/cart_service.rs

//! The cart reconciliation engine.
//!
//! One interface, [`CartStore`], serves both flows: [`UserCart`] is the
//! SQLite-backed store for an authenticated user, [`LocalCart`] the in-memory
//! equivalent of the browser-held anonymous cart. Reconciliation on login is
//! [`merge_carts`], which drains one store into the other with the same
//! merge-by-increment rule `add` applies everywhere: adding an already-present
//! line sums quantities, never duplicates or replaces the row.

use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, instrument, warn};

use crate::errors::{AppError, Result};
use crate::models::{AnonymousCartLine, CartLine, CatalogRef, ItemType};
use crate::services::catalog_service;

/// Per-session cart operations, shared by the authenticated and anonymous paths.
#[async_trait]
pub trait CartStore: Send + Sync {
  /// Current cart contents, oldest line first. Empty carts are an empty list,
  /// never an error.
  async fn lines(&self) -> Result<Vec<CartLine>>;

  /// Add `quantity` of a catalog item, merging into an existing line if one
  /// holds the same item. Returns the resulting line.
  async fn add(&self, item: CatalogRef, quantity: i64) -> Result<CartLine>;

  /// Set a line's quantity; `quantity <= 0` delegates to [`CartStore::remove`].
  async fn set_quantity(&self, line_id: i64, quantity: i64) -> Result<()>;

  /// Remove one line. Removing an absent line is a no-op.
  async fn remove(&self, line_id: i64) -> Result<()>;

  /// Remove every line. Idempotent.
  async fn clear(&self) -> Result<()>;
}

/// Database-backed cart scoped to one authenticated user.
///
/// Constructed per request from the verified identity; every write is scoped by
/// both the row id and `user_id`, so one user can never touch another's lines.
pub struct UserCart {
  pool: SqlitePool,
  user_id: i64,
}

impl UserCart {
  pub fn new(pool: SqlitePool, user_id: i64) -> Self {
    Self { pool, user_id }
  }
}

#[derive(FromRow)]
struct CartLineRow {
  cart_item_id: i64,
  item_type: ItemType,
  item_id: i64,
  quantity: i64,
  name: Option<String>,
  price: Option<f64>,
  image: Option<String>,
  category: Option<String>,
}

impl CartLineRow {
  // A line whose catalog row vanished joins to NULLs; such lines are dropped
  // from the view rather than failing the whole cart read.
  fn into_line(self) -> Option<CartLine> {
    match (self.name, self.price, self.category) {
      (Some(name), Some(price), Some(category)) => Some(CartLine {
        item_id: self.item_id,
        cart_item_id: self.cart_item_id,
        name,
        price,
        image: self.image,
        category,
        quantity: self.quantity,
        item_type: self.item_type,
      }),
      _ => {
        warn!(cart_item_id = self.cart_item_id, "Dropping cart line with missing catalog row.");
        None
      }
    }
  }
}

const CART_LINES_SQL: &str = r#"
SELECT
  ci.id AS cart_item_id,
  ci.item_type,
  ci.item_id,
  ci.quantity,
  CASE WHEN ci.item_type = 'product' THEN p.name ELSE a.name END AS name,
  CASE WHEN ci.item_type = 'product' THEN p.price ELSE a.price END AS price,
  CASE WHEN ci.item_type = 'product' THEN p.image ELSE a.image END AS image,
  CASE WHEN ci.item_type = 'product' THEN p.category ELSE a.category END AS category
FROM cart_items ci
LEFT JOIN products p ON ci.item_type = 'product' AND ci.item_id = p.id
LEFT JOIN accessories a ON ci.item_type = 'accessory' AND ci.item_id = a.id
WHERE ci.user_id = ?
ORDER BY ci.id ASC
"#;

/// Fetch a user's joined cart lines through any executor, so the order
/// conversion can read the cart inside its own transaction.
pub(crate) async fn fetch_lines<'e, E>(executor: E, user_id: i64) -> Result<Vec<CartLine>>
where
  E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
  let rows: Vec<CartLineRow> = sqlx::query_as(CART_LINES_SQL).bind(user_id).fetch_all(executor).await?;
  Ok(rows.into_iter().filter_map(CartLineRow::into_line).collect())
}

#[async_trait]
impl CartStore for UserCart {
  #[instrument(name = "cart::lines", skip(self), fields(user_id = %self.user_id))]
  async fn lines(&self) -> Result<Vec<CartLine>> {
    fetch_lines(&self.pool, self.user_id).await
  }

  #[instrument(name = "cart::add", skip(self), fields(user_id = %self.user_id, item = %item))]
  async fn add(&self, item: CatalogRef, quantity: i64) -> Result<CartLine> {
    if quantity < 1 {
      return Err(AppError::Validation("Quantity must be at least 1".to_string()));
    }

    // Validate the reference before touching the cart; a dangling cart row is
    // worse than a rejected request.
    let catalog_item = catalog_service::fetch_item(&self.pool, item)
      .await?
      .ok_or_else(|| AppError::NotFound(format!("Catalog item {} not found", item)))?;

    // Atomic merge-by-increment: the UNIQUE(user_id, item_type, item_id) key
    // makes two racing adds sum their quantities instead of duplicating rows.
    let (cart_item_id, merged_quantity): (i64, i64) = sqlx::query_as(
      r#"
      INSERT INTO cart_items (user_id, item_type, item_id, quantity)
      VALUES (?, ?, ?, ?)
      ON CONFLICT(user_id, item_type, item_id)
      DO UPDATE SET quantity = quantity + excluded.quantity
      RETURNING id, quantity
      "#,
    )
    .bind(self.user_id)
    .bind(item.item_type())
    .bind(item.item_id())
    .bind(quantity)
    .fetch_one(&self.pool)
    .await?;

    debug!(cart_item_id, merged_quantity, "Cart line upserted.");

    Ok(CartLine {
      item_id: catalog_item.id,
      cart_item_id,
      name: catalog_item.name,
      price: catalog_item.price,
      image: catalog_item.image,
      category: catalog_item.category,
      quantity: merged_quantity,
      item_type: item.item_type(),
    })
  }

  #[instrument(name = "cart::set_quantity", skip(self), fields(user_id = %self.user_id))]
  async fn set_quantity(&self, line_id: i64, quantity: i64) -> Result<()> {
    if quantity <= 0 {
      return self.remove(line_id).await;
    }

    let result = sqlx::query("UPDATE cart_items SET quantity = ? WHERE id = ? AND user_id = ?")
      .bind(quantity)
      .bind(line_id)
      .bind(self.user_id)
      .execute(&self.pool)
      .await?;

    // Zero rows means the line is absent or owned by someone else; both look
    // identical to the caller.
    if result.rows_affected() == 0 {
      return Err(AppError::NotFound("Cart item not found".to_string()));
    }
    Ok(())
  }

  #[instrument(name = "cart::remove", skip(self), fields(user_id = %self.user_id))]
  async fn remove(&self, line_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM cart_items WHERE id = ? AND user_id = ?")
      .bind(line_id)
      .bind(self.user_id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  #[instrument(name = "cart::clear", skip(self), fields(user_id = %self.user_id))]
  async fn clear(&self) -> Result<()> {
    sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
      .bind(self.user_id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }
}

/// In-memory cart for an anonymous session: the server-side model of the
/// browser's localStorage cart. Same interface, same merge semantics, no
/// persistence. Item metadata is still resolved through the catalog so lines
/// carry trusted names and prices.
pub struct LocalCart {
  pool: SqlitePool,
  inner: Mutex<LocalCartInner>,
}

#[derive(Default)]
struct LocalCartInner {
  lines: Vec<CartLine>,
  next_id: i64,
}

impl LocalCart {
  pub fn new(pool: SqlitePool) -> Self {
    Self {
      pool,
      inner: Mutex::new(LocalCartInner { lines: Vec::new(), next_id: 1 }),
    }
  }

  fn locked(&self) -> std::sync::MutexGuard<'_, LocalCartInner> {
    // Lock poisoning would mean a panic mid-mutation on a Vec; recover the data.
    self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

#[async_trait]
impl CartStore for LocalCart {
  async fn lines(&self) -> Result<Vec<CartLine>> {
    Ok(self.locked().lines.clone())
  }

  async fn add(&self, item: CatalogRef, quantity: i64) -> Result<CartLine> {
    if quantity < 1 {
      return Err(AppError::Validation("Quantity must be at least 1".to_string()));
    }
    let catalog_item = catalog_service::fetch_item(&self.pool, item)
      .await?
      .ok_or_else(|| AppError::NotFound(format!("Catalog item {} not found", item)))?;

    let mut inner = self.locked();
    if let Some(line) = inner
      .lines
      .iter_mut()
      .find(|l| l.item_type == item.item_type() && l.item_id == item.item_id())
    {
      line.quantity += quantity;
      return Ok(line.clone());
    }

    let line = CartLine {
      item_id: catalog_item.id,
      cart_item_id: inner.next_id,
      name: catalog_item.name,
      price: catalog_item.price,
      image: catalog_item.image,
      category: catalog_item.category,
      quantity,
      item_type: item.item_type(),
    };
    inner.next_id += 1;
    inner.lines.push(line.clone());
    Ok(line)
  }

  async fn set_quantity(&self, line_id: i64, quantity: i64) -> Result<()> {
    if quantity <= 0 {
      return self.remove(line_id).await;
    }
    let mut inner = self.locked();
    match inner.lines.iter_mut().find(|l| l.cart_item_id == line_id) {
      Some(line) => {
        line.quantity = quantity;
        Ok(())
      }
      None => Err(AppError::NotFound("Cart item not found".to_string())),
    }
  }

  async fn remove(&self, line_id: i64) -> Result<()> {
    self.locked().lines.retain(|l| l.cart_item_id != line_id);
    Ok(())
  }

  async fn clear(&self) -> Result<()> {
    self.locked().lines.clear();
    Ok(())
  }
}

/// Drain `src` into `dst` line by line, then clear `src`.
///
/// Runs once per session, at the anonymous→authenticated transition. Quantities
/// for items present on both sides are summed, which is the least-surprising
/// outcome when the same guitar was added from two sessions.
#[instrument(name = "cart::merge_carts", skip(src, dst))]
pub async fn merge_carts(src: &dyn CartStore, dst: &dyn CartStore) -> Result<Vec<CartLine>> {
  for line in src.lines().await? {
    dst.add(CatalogRef::new(line.item_type, line.item_id), line.quantity).await?;
  }
  src.clear().await?;
  dst.lines().await
}

/// Merge raw anonymous lines (as posted by the client on login) into a store.
///
/// Lines pointing at catalog items that no longer exist are skipped rather than
/// failing the whole merge; a stale localStorage entry should not block login.
#[instrument(name = "cart::merge_anonymous_lines", skip(dst, lines), fields(line_count = lines.len()))]
pub async fn merge_anonymous_lines(dst: &dyn CartStore, lines: &[AnonymousCartLine]) -> Result<Vec<CartLine>> {
  for line in lines {
    if line.quantity < 1 {
      warn!(item_id = line.id, "Skipping anonymous cart line with non-positive quantity.");
      continue;
    }
    match dst.add(CatalogRef::new(line.item_type, line.id), line.quantity).await {
      Ok(_) => {}
      Err(AppError::NotFound(_)) => {
        warn!(item_id = line.id, item_type = %line.item_type, "Skipping anonymous cart line for unknown catalog item.");
      }
      Err(e) => return Err(e),
    }
  }
  dst.lines().await
}
