// src/services/review_service.rs

//! Review CRUD: one review per user per catalog item.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use crate::errors::{AppError, Result};
use crate::models::{CatalogRef, ReviewView};

/// Reviews for one catalog item plus the aggregate the product page renders.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewSummary {
  pub reviews: Vec<ReviewView>,
  /// Average formatted to one decimal place; `"0.0"` when no reviews exist.
  #[serde(rename = "averageRating")]
  pub average_rating: String,
  #[serde(rename = "totalReviews")]
  pub total_reviews: usize,
}

/// Reviews newest-first with reviewer names and the running average.
#[instrument(name = "review_service::list_reviews", skip(pool), fields(item = %item))]
pub async fn list_reviews(pool: &SqlitePool, item: CatalogRef) -> Result<ReviewSummary> {
  let reviews: Vec<ReviewView> = sqlx::query_as(
    r#"
    SELECT r.id, r.rating, r.comment, r.created_at,
           u.first_name || ' ' || u.last_name AS user_name
    FROM reviews r
    JOIN users u ON r.user_id = u.id
    WHERE r.item_type = ? AND r.item_id = ?
    ORDER BY r.created_at DESC, r.id DESC
    "#,
  )
  .bind(item.item_type())
  .bind(item.item_id())
  .fetch_all(pool)
  .await?;

  let average = if reviews.is_empty() {
    0.0
  } else {
    reviews.iter().map(|r| r.rating as f64).sum::<f64>() / reviews.len() as f64
  };

  Ok(ReviewSummary {
    average_rating: format!("{:.1}", average),
    total_reviews: reviews.len(),
    reviews,
  })
}

/// Create a review; a second review for the same (user, item) is a conflict.
#[instrument(name = "review_service::create_review", skip(pool, comment), fields(user_id = %user_id, item = %item))]
pub async fn create_review(
  pool: &SqlitePool,
  user_id: i64,
  item: CatalogRef,
  rating: i64,
  comment: Option<String>,
) -> Result<i64> {
  if !(1..=5).contains(&rating) {
    return Err(AppError::Validation("Rating must be between 1 and 5".to_string()));
  }

  let insert = sqlx::query_as::<_, (i64,)>(
    r#"
    INSERT INTO reviews (user_id, item_type, item_id, rating, comment)
    VALUES (?, ?, ?, ?, ?)
    RETURNING id
    "#,
  )
  .bind(user_id)
  .bind(item.item_type())
  .bind(item.item_id())
  .bind(rating)
  .bind(comment)
  .fetch_one(pool)
  .await;

  match insert {
    Ok((review_id,)) => {
      info!(review_id, "Review created.");
      Ok(review_id)
    }
    // The UNIQUE(user_id, item_type, item_id) key enforces one review per item.
    Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
      Err(AppError::Conflict("You have already reviewed this item".to_string()))
    }
    Err(e) => Err(e.into()),
  }
}

/// Delete a review the caller owns.
#[instrument(name = "review_service::delete_review", skip(pool), fields(user_id = %user_id))]
pub async fn delete_review(pool: &SqlitePool, user_id: i64, review_id: i64) -> Result<()> {
  let owner: Option<(i64,)> = sqlx::query_as("SELECT user_id FROM reviews WHERE id = ?")
    .bind(review_id)
    .fetch_optional(pool)
    .await?;

  match owner {
    None => Err(AppError::NotFound("Review not found".to_string())),
    Some((owner_id,)) if owner_id != user_id => Err(AppError::Forbidden("Unauthorized".to_string())),
    Some(_) => {
      sqlx::query("DELETE FROM reviews WHERE id = ?")
        .bind(review_id)
        .execute(pool)
        .await?;
      Ok(())
    }
  }
}
