// src/models/catalog.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Which of the two structurally identical catalog tables an id points into.
///
/// The type tag travels with every item reference; nothing in this crate infers
/// the kind from an id range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ItemType {
  Product,
  Accessory,
}

impl ItemType {
  /// Name of the physical table holding items of this kind.
  pub fn table(self) -> &'static str {
    match self {
      ItemType::Product => "products",
      ItemType::Accessory => "accessories",
    }
  }

  /// The value stored in `item_type` columns and used in API payloads.
  pub fn as_str(self) -> &'static str {
    match self {
      ItemType::Product => "product",
      ItemType::Accessory => "accessory",
    }
  }
}

impl fmt::Display for ItemType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ItemType {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "product" => Ok(ItemType::Product),
      "accessory" => Ok(ItemType::Accessory),
      other => Err(AppError::Validation(format!("Invalid product type: {}", other))),
    }
  }
}

/// A typed reference to one catalog row: a kind plus the id within that kind's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogRef {
  Product(i64),
  Accessory(i64),
}

impl CatalogRef {
  pub fn new(item_type: ItemType, item_id: i64) -> Self {
    match item_type {
      ItemType::Product => CatalogRef::Product(item_id),
      ItemType::Accessory => CatalogRef::Accessory(item_id),
    }
  }

  pub fn item_type(self) -> ItemType {
    match self {
      CatalogRef::Product(_) => ItemType::Product,
      CatalogRef::Accessory(_) => ItemType::Accessory,
    }
  }

  pub fn item_id(self) -> i64 {
    match self {
      CatalogRef::Product(id) | CatalogRef::Accessory(id) => id,
    }
  }
}

impl fmt::Display for CatalogRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.item_type(), self.item_id())
  }
}

/// One row of `products` or `accessories`; the two tables share this shape.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CatalogItem {
  pub id: i64,
  pub name: String,
  pub category: String,
  pub brand: String,
  pub price: f64,
  pub description: Option<String>,
  pub image: Option<String>,
  pub badge: Option<String>,
  pub featured: bool,
  pub stock_quantity: i64,
  pub created_at: Option<NaiveDateTime>,
}
