// src/models/review.rs

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// A review joined with the reviewer's display name, as returned to clients.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
  pub id: i64,
  pub rating: i64,
  pub comment: Option<String>,
  pub created_at: Option<NaiveDateTime>,
  pub user_name: String,
}
