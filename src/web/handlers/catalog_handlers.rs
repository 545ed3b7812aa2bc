// src/web/handlers/catalog_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::models::{CatalogRef, ItemType};
use crate::services::catalog_service::{self, CatalogQuery, SortOrder, DEFAULT_PAGE_SIZE};
use crate::state::AppState;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsQuery {
  pub category: Option<String>,
  pub brand: Option<String>,
  pub min_price: Option<f64>,
  pub max_price: Option<f64>,
  pub featured: Option<String>,
  pub sale: Option<String>,
  pub sort: Option<String>,
  pub page: Option<i64>,
  pub limit: Option<i64>,
  pub search: Option<String>,
}

impl ListItemsQuery {
  fn into_catalog_query(self) -> CatalogQuery {
    CatalogQuery {
      category: self.category,
      brand: self.brand,
      min_price: self.min_price,
      max_price: self.max_price,
      featured: self.featured.as_deref() == Some("true"),
      sale: self.sale.as_deref() == Some("true"),
      search: self.search,
      sort: self.sort.as_deref().map(SortOrder::parse).unwrap_or_default(),
      page: self.page.unwrap_or(1),
      limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    }
  }
}

#[derive(Deserialize, Debug)]
pub struct FeaturedQuery {
  pub limit: Option<i64>,
}

async fn list_items(
  app_state: &AppState,
  kind: ItemType,
  query: ListItemsQuery,
) -> Result<HttpResponse, AppError> {
  let page = catalog_service::list_items(&app_state.db_pool, kind, &query.into_catalog_query()).await?;
  Ok(HttpResponse::Ok().json(page))
}

async fn get_item(app_state: &AppState, item: CatalogRef) -> Result<HttpResponse, AppError> {
  let catalog_item = catalog_service::fetch_item(&app_state.db_pool, item)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("{} not found", capitalized(item.item_type()))))?;

  let related = catalog_service::related_items(&app_state.db_pool, item, &catalog_item.category).await?;

  let mut body = serde_json::to_value(&catalog_item).map_err(|e| AppError::Internal(e.to_string()))?;
  body["relatedItems"] = json!(related);
  Ok(HttpResponse::Ok().json(body))
}

async fn featured_list(
  app_state: &AppState,
  kind: ItemType,
  query: FeaturedQuery,
) -> Result<HttpResponse, AppError> {
  let items = catalog_service::featured_items(&app_state.db_pool, kind, query.limit).await?;
  Ok(HttpResponse::Ok().json(items))
}

fn capitalized(kind: ItemType) -> &'static str {
  match kind {
    ItemType::Product => "Product",
    ItemType::Accessory => "Accessory",
  }
}

// --- Products ---

#[instrument(name = "handler::list_products", skip(app_state, query))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListItemsQuery>,
) -> Result<HttpResponse, AppError> {
  list_items(&app_state, ItemType::Product, query.into_inner()).await
}

#[instrument(name = "handler::get_product", skip(app_state))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  get_item(&app_state, CatalogRef::Product(path.into_inner())).await
}

#[instrument(name = "handler::featured_products", skip(app_state, query))]
pub async fn featured_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<FeaturedQuery>,
) -> Result<HttpResponse, AppError> {
  featured_list(&app_state, ItemType::Product, query.into_inner()).await
}

// --- Accessories ---

#[instrument(name = "handler::list_accessories", skip(app_state, query))]
pub async fn list_accessories_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListItemsQuery>,
) -> Result<HttpResponse, AppError> {
  list_items(&app_state, ItemType::Accessory, query.into_inner()).await
}

#[instrument(name = "handler::get_accessory", skip(app_state))]
pub async fn get_accessory_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  get_item(&app_state, CatalogRef::Accessory(path.into_inner())).await
}

#[instrument(name = "handler::featured_accessories", skip(app_state, query))]
pub async fn featured_accessories_handler(
  app_state: web::Data<AppState>,
  query: web::Query<FeaturedQuery>,
) -> Result<HttpResponse, AppError> {
  featured_list(&app_state, ItemType::Accessory, query.into_inner()).await
}
