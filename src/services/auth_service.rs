// src/services/auth_service.rs

//! Password hashing/verification and bearer-token issuance.

use argon2::{
  password_hash::{
    rand_core::OsRng, // For generating random salts
    PasswordHash,
    PasswordHasher,   // The main trait for hashing
    PasswordVerifier, // The main trait for verifying
    SaltString,
  },
  Argon2, // The Argon2 algorithm instance
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::config::AppConfig;
use crate::errors::AppError;

/// Claims carried by every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
  #[serde(rename = "userId")]
  pub user_id: i64,
  pub email: String,
  pub iat: i64,
  pub exp: i64,
}

/// Hashes a plain-text password using Argon2.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    return Err(AppError::Validation(
      "Password cannot be empty for hashing.".to_string(),
    ));
  }

  let salt = SaltString::generate(&mut OsRng); // Cryptographically secure random salt
  let argon2_hasher = Argon2::default(); // Default Argon2 parameters (recommended)

  match argon2_hasher.hash_password(password.as_bytes(), &salt) {
    Ok(password_hash_obj) => Ok(password_hash_obj.to_string()),
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!(
        "Password hashing process failed: {}",
        argon_err
      )))
    }
  }
}

/// Verifies a plain-text password against a stored Argon2 hash.
///
/// Returns `Ok(false)` on a mismatch; an `Err` only for malformed hashes or
/// internal verifier failures.
#[instrument(name = "auth_service::verify_password", skip(hashed_password_str, provided_password), err(Display))]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool, AppError> {
  if provided_password.is_empty() {
    return Ok(false);
  }

  let parsed_hash = match PasswordHash::new(hashed_password_str) {
    Ok(ph) => ph,
    Err(parse_err) => {
      error!(error = %parse_err, "Failed to parse stored password hash string.");
      return Err(AppError::Internal(format!(
        "Invalid stored password hash format: {}",
        parse_err
      )));
    }
  };

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password verification failed: passwords do not match.");
      Ok(false)
    }
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

/// Issues a signed access token for the given user identity.
#[instrument(name = "auth_service::issue_token", skip(config), fields(user_id = %user_id))]
pub fn issue_token(config: &AppConfig, user_id: i64, email: &str) -> Result<String, AppError> {
  let now = Utc::now();
  let claims = Claims {
    user_id,
    email: email.to_string(),
    iat: now.timestamp(),
    exp: (now + Duration::hours(config.jwt_expires_hours)).timestamp(),
  };

  encode(
    &Header::default(),
    &claims,
    &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
  )
  .map_err(|e| {
    error!(error = %e, "Failed to sign access token.");
    AppError::Internal(format!("Token signing failed: {}", e))
  })
}

/// Decodes and validates a bearer token, returning its claims.
///
/// Expiry is checked as part of validation; any failure maps to a 403.
pub fn decode_token(config: &AppConfig, token: &str) -> Result<Claims, AppError> {
  decode::<Claims>(
    token,
    &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
    &Validation::default(),
  )
  .map(|data| data.claims)
  .map_err(|_| AppError::Forbidden("Invalid or expired token".to_string()))
}
