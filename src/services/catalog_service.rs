// src/services/catalog_service.rs

//! Read-only catalog queries: filtered/sorted/paginated listings, item detail
//! with related items, and the featured shelf.
//!
//! Products and accessories live in two structurally identical tables; every
//! query here is written once and pointed at a table via [`ItemType::table`].

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::instrument;

use crate::errors::Result;
use crate::models::{CatalogItem, CatalogRef, ItemType};

const ITEM_COLUMNS: &str = "id, name, category, brand, price, description, image, badge, featured, stock_quantity, created_at";

pub const DEFAULT_PAGE_SIZE: i64 = 12;
const RELATED_ITEMS_LIMIT: i64 = 4;
const DEFAULT_FEATURED_LIMIT: i64 = 8;

/// Sort orders accepted by the listing endpoints. Unknown values fall back to
/// `Featured`, as the original storefront did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  #[default]
  Featured,
  PriceAsc,
  PriceDesc,
  NameAsc,
  NameDesc,
}

impl SortOrder {
  pub fn parse(s: &str) -> Self {
    match s {
      "price-asc" => SortOrder::PriceAsc,
      "price-desc" => SortOrder::PriceDesc,
      "name-asc" => SortOrder::NameAsc,
      "name-desc" => SortOrder::NameDesc,
      _ => SortOrder::Featured,
    }
  }

  // Whitelisted ORDER BY fragments; never interpolate client input here.
  fn order_by(self) -> &'static str {
    match self {
      SortOrder::Featured => "featured DESC, id ASC",
      SortOrder::PriceAsc => "price ASC",
      SortOrder::PriceDesc => "price DESC",
      SortOrder::NameAsc => "name ASC",
      SortOrder::NameDesc => "name DESC",
    }
  }
}

/// Filter/sort/pagination parameters for a catalog listing.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
  pub category: Option<String>,
  /// Comma-separated brand set; an item matches if its brand is in the set.
  pub brand: Option<String>,
  pub min_price: Option<f64>,
  pub max_price: Option<f64>,
  pub featured: bool,
  pub sale: bool,
  pub search: Option<String>,
  pub sort: SortOrder,
  pub page: i64,
  pub limit: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
  pub page: i64,
  pub limit: i64,
  pub total: i64,
  #[serde(rename = "totalPages")]
  pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
  pub items: Vec<CatalogItem>,
  pub pagination: Pagination,
}

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, query: &CatalogQuery) {
  let mut prefix = " WHERE ";
  let mut sep = |builder: &mut QueryBuilder<'_, Sqlite>| {
    builder.push(prefix);
    prefix = " AND ";
  };

  if let Some(category) = &query.category {
    sep(&mut *builder);
    builder.push("category = ").push_bind(category.clone());
  }
  if let Some(brand_csv) = &query.brand {
    let brands: Vec<&str> = brand_csv.split(',').filter(|b| !b.is_empty()).collect();
    if !brands.is_empty() {
      sep(&mut *builder);
      builder.push("brand IN (");
      let mut separated = builder.separated(", ");
      for brand in brands {
        separated.push_bind(brand.to_string());
      }
      separated.push_unseparated(")");
    }
  }
  if let Some(min_price) = query.min_price {
    sep(&mut *builder);
    builder.push("price >= ").push_bind(min_price);
  }
  if let Some(max_price) = query.max_price {
    sep(&mut *builder);
    builder.push("price <= ").push_bind(max_price);
  }
  if query.featured {
    sep(&mut *builder);
    builder.push("featured = 1");
  }
  if query.sale {
    sep(&mut *builder);
    builder.push("badge = 'Sale'");
  }
  if let Some(search) = &query.search {
    let pattern = format!("%{}%", search);
    sep(&mut *builder);
    builder
      .push("(name LIKE ")
      .push_bind(pattern.clone())
      .push(" OR description LIKE ")
      .push_bind(pattern)
      .push(")");
  }
}

/// List catalog items of one kind with filters, sorting and 1-indexed pagination.
///
/// An out-of-range page yields an empty item list with correct pagination
/// metadata, never an error.
#[instrument(name = "catalog_service::list_items", skip(pool, query), fields(kind = %kind))]
pub async fn list_items(pool: &SqlitePool, kind: ItemType, query: &CatalogQuery) -> Result<CatalogPage> {
  let page = query.page.max(1);
  let limit = if query.limit >= 1 { query.limit } else { DEFAULT_PAGE_SIZE };
  let offset = (page - 1) * limit;

  let mut count_builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", kind.table()));
  push_filters(&mut count_builder, query);
  let total: i64 = count_builder.build_query_scalar().fetch_one(pool).await?;

  let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", ITEM_COLUMNS, kind.table()));
  push_filters(&mut builder, query);
  builder
    .push(" ORDER BY ")
    .push(query.sort.order_by())
    .push(" LIMIT ")
    .push_bind(limit)
    .push(" OFFSET ")
    .push_bind(offset);

  let items: Vec<CatalogItem> = builder.build_query_as().fetch_all(pool).await?;

  Ok(CatalogPage {
    items,
    pagination: Pagination {
      page,
      limit,
      total,
      total_pages: (total + limit - 1) / limit,
    },
  })
}

/// Fetch one catalog row by typed reference.
pub async fn fetch_item(pool: &SqlitePool, item: CatalogRef) -> Result<Option<CatalogItem>> {
  let sql = format!("SELECT {} FROM {} WHERE id = ?", ITEM_COLUMNS, item.item_type().table());
  let row: Option<CatalogItem> = sqlx::query_as(&sql).bind(item.item_id()).fetch_optional(pool).await?;
  Ok(row)
}

/// Up to four same-category items, excluding the item itself.
#[instrument(name = "catalog_service::related_items", skip(pool))]
pub async fn related_items(pool: &SqlitePool, item: CatalogRef, category: &str) -> Result<Vec<CatalogItem>> {
  let sql = format!(
    "SELECT {} FROM {} WHERE category = ? AND id != ? LIMIT {}",
    ITEM_COLUMNS,
    item.item_type().table(),
    RELATED_ITEMS_LIMIT
  );
  let rows: Vec<CatalogItem> = sqlx::query_as(&sql)
    .bind(category)
    .bind(item.item_id())
    .fetch_all(pool)
    .await?;
  Ok(rows)
}

/// Featured items for the homepage shelf.
#[instrument(name = "catalog_service::featured_items", skip(pool), fields(kind = %kind))]
pub async fn featured_items(pool: &SqlitePool, kind: ItemType, limit: Option<i64>) -> Result<Vec<CatalogItem>> {
  let limit = limit.filter(|l| *l >= 1).unwrap_or(DEFAULT_FEATURED_LIMIT);
  let sql = format!(
    "SELECT {} FROM {} WHERE featured = 1 ORDER BY id ASC LIMIT ?",
    ITEM_COLUMNS,
    kind.table()
  );
  let rows: Vec<CatalogItem> = sqlx::query_as(&sql).bind(limit).fetch_all(pool).await?;
  Ok(rows)
}
