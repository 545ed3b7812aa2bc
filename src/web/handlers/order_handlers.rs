// src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::order_service;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequestPayload {
  pub shipping_address: Option<String>,
  pub payment_method: Option<String>,
}

#[instrument(name = "handler::create_order", skip(app_state, payload, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CreateOrderRequestPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let payload = payload.into_inner();
  let receipt = order_service::create_order(
    &app_state.db_pool,
    auth_user.user_id,
    payload.shipping_address,
    payload.payment_method,
  )
  .await?;

  info!(order_id = receipt.order_id, "Order placed.");
  Ok(HttpResponse::Created().json(json!({
    "message": "Order created successfully",
    "orderId": receipt.order_id,
    "totalAmount": receipt.total_amount,
  })))
}

#[instrument(name = "handler::list_orders", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let orders = order_service::list_orders(&app_state.db_pool, auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(json!({"orders": orders})))
}

#[instrument(name = "handler::get_order", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let order = order_service::get_order(&app_state.db_pool, auth_user.user_id, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(order))
}
