// src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::{AnonymousCartLine, CatalogRef, ItemType};
use crate::services::cart_service::{self, CartStore, UserCart};
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequestPayload {
  pub product_id: Option<i64>,
  pub accessory_id: Option<i64>,
  pub product_type: ItemType,
  #[serde(default = "default_quantity")]
  pub quantity: i64,
}

fn default_quantity() -> i64 {
  1
}

impl AddToCartRequestPayload {
  // The payload carries the id in the column matching its type; the type tag
  // decides which one counts.
  fn catalog_ref(&self) -> Result<CatalogRef, AppError> {
    let id = match self.product_type {
      ItemType::Product => self.product_id,
      ItemType::Accessory => self.accessory_id,
    };
    id.map(|id| CatalogRef::new(self.product_type, id))
      .ok_or_else(|| AppError::Validation("Product/Accessory ID and type required".to_string()))
  }
}

#[derive(Deserialize, Debug)]
pub struct UpdateQuantityPayload {
  pub quantity: i64,
}

#[derive(Deserialize, Debug)]
pub struct MergeCartPayload {
  pub items: Vec<AnonymousCartLine>,
}

// --- Handlers ---

#[instrument(name = "handler::get_cart", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_cart_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let cart = UserCart::new(app_state.db_pool.clone(), auth_user.user_id);
  let lines = cart.lines().await?;
  Ok(HttpResponse::Ok().json(json!({"cart": lines})))
}

#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, payload, auth_user),
  fields(user_id = %auth_user.user_id, quantity = %payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<AddToCartRequestPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let item = payload.catalog_ref()?;
  let cart = UserCart::new(app_state.db_pool.clone(), auth_user.user_id);
  let line = cart.add(item, payload.quantity).await?;

  info!(cart_item_id = line.cart_item_id, new_quantity = line.quantity, "Cart line upserted.");
  Ok(HttpResponse::Ok().json(json!({
    "message": "Item added to cart",
    "cartItemId": line.cart_item_id,
    "cartItem": line,
  })))
}

/// Login-time reconciliation: fold the client's anonymous cart into the
/// authenticated one and return the merged result.
#[instrument(
  name = "handler::merge_cart",
  skip(app_state, payload, auth_user),
  fields(user_id = %auth_user.user_id, line_count = payload.items.len())
)]
pub async fn merge_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<MergeCartPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let cart = UserCart::new(app_state.db_pool.clone(), auth_user.user_id);
  let lines = cart_service::merge_anonymous_lines(&cart, &payload.items).await?;
  Ok(HttpResponse::Ok().json(json!({"message": "Cart merged", "cart": lines})))
}

#[instrument(
  name = "handler::update_cart_item",
  skip(app_state, payload, auth_user),
  fields(user_id = %auth_user.user_id, quantity = %payload.quantity)
)]
pub async fn update_cart_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  payload: web::Json<UpdateQuantityPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let cart = UserCart::new(app_state.db_pool.clone(), auth_user.user_id);
  cart.set_quantity(path.into_inner(), payload.quantity).await?;
  Ok(HttpResponse::Ok().json(json!({"message": "Cart updated"})))
}

#[instrument(name = "handler::remove_cart_item", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn remove_cart_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let cart = UserCart::new(app_state.db_pool.clone(), auth_user.user_id);
  cart.remove(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({"message": "Item removed from cart"})))
}

#[instrument(name = "handler::clear_cart", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn clear_cart_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let cart = UserCart::new(app_state.db_pool.clone(), auth_user.user_id);
  cart.clear().await?;
  Ok(HttpResponse::Ok().json(json!({"message": "Cart cleared"})))
}
