// src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::models::User;
use crate::services::auth_service;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestPayload {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequestPayload {
  pub email: String,
  pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct VerifyRequestPayload {
  pub token: Option<String>,
}

fn validate_registration(payload: &RegisterRequestPayload) -> Result<(), AppError> {
  if payload.first_name.trim().is_empty() {
    return Err(AppError::Validation("First name is required".to_string()));
  }
  if payload.last_name.trim().is_empty() {
    return Err(AppError::Validation("Last name is required".to_string()));
  }
  if !payload.email.contains('@') || payload.email.trim().len() < 3 {
    return Err(AppError::Validation("Valid email is required".to_string()));
  }
  if payload.password.len() < 6 {
    return Err(AppError::Validation(
      "Password must be at least 6 characters".to_string(),
    ));
  }
  Ok(())
}

fn user_json(id: i64, first_name: &str, last_name: &str, email: &str) -> serde_json::Value {
  json!({
    "id": id,
    "firstName": first_name,
    "lastName": last_name,
    "email": email,
  })
}

#[instrument(name = "handler::register", skip(app_state, payload))]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<RegisterRequestPayload>,
) -> Result<HttpResponse, AppError> {
  validate_registration(&payload)?;
  let email = payload.email.trim().to_lowercase();

  let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
    .bind(&email)
    .fetch_optional(&app_state.db_pool)
    .await?;
  if existing.is_some() {
    return Err(AppError::Conflict("Email already registered".to_string()));
  }

  let password_hash = auth_service::hash_password(&payload.password)?;
  let (user_id,): (i64,) = sqlx::query_as(
    "INSERT INTO users (first_name, last_name, email, password_hash) VALUES (?, ?, ?, ?) RETURNING id",
  )
  .bind(payload.first_name.trim())
  .bind(payload.last_name.trim())
  .bind(&email)
  .bind(&password_hash)
  .fetch_one(&app_state.db_pool)
  .await?;

  let token = auth_service::issue_token(&app_state.config, user_id, &email)?;
  info!(user_id, "User registered.");

  Ok(HttpResponse::Created().json(json!({
    "message": "Registration successful",
    "token": token,
    "user": user_json(user_id, payload.first_name.trim(), payload.last_name.trim(), &email),
  })))
}

#[instrument(name = "handler::login", skip(app_state, payload))]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<LoginRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let email = payload.email.trim().to_lowercase();

  // Unknown email and wrong password must be indistinguishable.
  let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = ?")
    .bind(&email)
    .fetch_optional(&app_state.db_pool)
    .await?;

  let user = match user {
    Some(u) => u,
    None => {
      warn!("Login attempt for unknown email.");
      return Err(AppError::Auth("Invalid email or password".to_string()));
    }
  };

  if !auth_service::verify_password(&user.password_hash, &payload.password)? {
    warn!(user_id = user.id, "Login attempt with wrong password.");
    return Err(AppError::Auth("Invalid email or password".to_string()));
  }

  let token = auth_service::issue_token(&app_state.config, user.id, &user.email)?;
  info!(user_id = user.id, "User logged in.");

  Ok(HttpResponse::Ok().json(json!({
    "message": "Login successful",
    "token": token,
    "user": user_json(user.id, &user.first_name, &user.last_name, &user.email),
  })))
}

#[instrument(name = "handler::me", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn me_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let user: User = sqlx::query_as("SELECT * FROM users WHERE id = ?")
    .bind(auth_user.user_id)
    .fetch_optional(&app_state.db_pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

  Ok(HttpResponse::Ok().json(json!({
    "id": user.id,
    "firstName": user.first_name,
    "lastName": user.last_name,
    "email": user.email,
    "createdAt": user.created_at,
  })))
}

/// Token introspection for the client: always 200, with a `valid` flag.
#[instrument(name = "handler::verify_token", skip(app_state, payload))]
pub async fn verify_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<VerifyRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let token = match &payload.token {
    Some(t) if !t.is_empty() => t,
    _ => return Err(AppError::Validation("Token required".to_string())),
  };

  match auth_service::decode_token(&app_state.config, token) {
    Ok(claims) => Ok(HttpResponse::Ok().json(json!({"valid": true, "userId": claims.user_id}))),
    Err(_) => Ok(HttpResponse::Ok().json(json!({"valid": false}))),
  }
}
