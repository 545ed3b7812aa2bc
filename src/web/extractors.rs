// src/web/extractors.rs

use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::errors::AppError;
use crate::services::auth_service;
use crate::state::AppState;

/// The verified identity behind a bearer token.
///
/// Extraction fails with 401 when the Authorization header is missing and 403
/// when the token is present but invalid or expired.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub user_id: i64,
  pub email: String,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    ready(extract_user(req))
  }
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
  let state = req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Internal("Application state is not configured".to_string()))?;

  let token = req
    .headers()
    .get(header::AUTHORIZATION)
    .and_then(|h| h.to_str().ok())
    .and_then(|h| h.strip_prefix("Bearer "))
    .ok_or_else(|| AppError::Auth("Access token required".to_string()))?;

  let claims = auth_service::decode_token(&state.config, token)?;
  Ok(AuthenticatedUser {
    user_id: claims.user_id,
    email: claims.email,
  })
}
