// src/web/handlers/review_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::{CatalogRef, ItemType};
use crate::services::review_service;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequestPayload {
  pub product_type: ItemType,
  pub product_id: i64,
  pub rating: i64,
  pub comment: Option<String>,
}

#[instrument(name = "handler::list_reviews", skip(app_state))]
pub async fn list_reviews_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, i64)>,
) -> Result<HttpResponse, AppError> {
  let (product_type, product_id) = path.into_inner();
  let item_type: ItemType = product_type.parse()?;
  let summary = review_service::list_reviews(&app_state.db_pool, CatalogRef::new(item_type, product_id)).await?;
  Ok(HttpResponse::Ok().json(summary))
}

#[instrument(
  name = "handler::create_review",
  skip(app_state, payload, auth_user),
  fields(user_id = %auth_user.user_id, rating = %payload.rating)
)]
pub async fn create_review_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CreateReviewRequestPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let payload = payload.into_inner();
  let review_id = review_service::create_review(
    &app_state.db_pool,
    auth_user.user_id,
    CatalogRef::new(payload.product_type, payload.product_id),
    payload.rating,
    payload.comment,
  )
  .await?;

  info!(review_id, "Review submitted.");
  Ok(HttpResponse::Created().json(json!({
    "message": "Review submitted successfully",
    "reviewId": review_id,
  })))
}

#[instrument(name = "handler::delete_review", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn delete_review_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  review_service::delete_review(&app_state.db_pool, auth_user.user_id, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({"message": "Review deleted successfully"})))
}
