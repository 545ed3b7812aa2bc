// tests/review_tests.rs
mod common;

use common::*;
use guitarhub::errors::AppError;
use guitarhub::models::CatalogRef;
use guitarhub::services::review_service::{create_review, delete_review, list_reviews};

#[tokio::test]
async fn item_without_reviews_averages_zero() {
  let pool = test_pool().await;
  let product_id = insert_product(&pool, "Les Paul", 2999.0).await;

  let summary = list_reviews(&pool, CatalogRef::Product(product_id)).await.unwrap();
  assert_eq!(summary.average_rating, "0.0");
  assert_eq!(summary.total_reviews, 0);
  assert!(summary.reviews.is_empty());
}

#[tokio::test]
async fn average_is_formatted_to_one_decimal() {
  let pool = test_pool().await;
  let product_id = insert_product(&pool, "Strat", 2499.0).await;
  let alice_id = create_user(&pool, "alice@example.com").await;
  let bob_id = create_user(&pool, "bob@example.com").await;

  create_review(&pool, alice_id, CatalogRef::Product(product_id), 4, None).await.unwrap();
  create_review(&pool, bob_id, CatalogRef::Product(product_id), 5, Some("Great tone".to_string()))
    .await
    .unwrap();

  let summary = list_reviews(&pool, CatalogRef::Product(product_id)).await.unwrap();
  assert_eq!(summary.average_rating, "4.5");
  assert_eq!(summary.total_reviews, 2);
  assert_eq!(summary.reviews[0].user_name, "Test User");
}

#[tokio::test]
async fn second_review_for_same_item_conflicts() {
  let pool = test_pool().await;
  let product_id = insert_product(&pool, "Tele", 1899.0).await;
  let user_id = create_user(&pool, "once@example.com").await;

  create_review(&pool, user_id, CatalogRef::Product(product_id), 5, None).await.unwrap();
  let err = create_review(&pool, user_id, CatalogRef::Product(product_id), 3, None)
    .await
    .unwrap_err();

  assert!(matches!(err, AppError::Conflict(_)));
  assert_eq!(count_rows(&pool, "reviews").await, 1);
}

#[tokio::test]
async fn same_user_can_review_distinct_items() {
  let pool = test_pool().await;
  let product_id = insert_product(&pool, "SG", 1599.0).await;
  let accessory_id = insert_accessory(&pool, "Strings", 12.99).await;
  let user_id = create_user(&pool, "multi@example.com").await;

  create_review(&pool, user_id, CatalogRef::Product(product_id), 5, None).await.unwrap();
  create_review(&pool, user_id, CatalogRef::Accessory(accessory_id), 4, None).await.unwrap();

  assert_eq!(count_rows(&pool, "reviews").await, 2);
}

#[tokio::test]
async fn rating_must_be_between_one_and_five() {
  let pool = test_pool().await;
  let product_id = insert_product(&pool, "RG", 799.0).await;
  let user_id = create_user(&pool, "rating@example.com").await;

  for bad in [0, 6, -1] {
    let err = create_review(&pool, user_id, CatalogRef::Product(product_id), bad, None)
      .await
      .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
  }
}

#[tokio::test]
async fn only_the_author_can_delete_a_review() {
  let pool = test_pool().await;
  let product_id = insert_product(&pool, "J-45", 2799.0).await;
  let author_id = create_user(&pool, "author@example.com").await;
  let other_id = create_user(&pool, "other@example.com").await;

  let review_id = create_review(&pool, author_id, CatalogRef::Product(product_id), 5, None)
    .await
    .unwrap();

  let err = delete_review(&pool, other_id, review_id).await.unwrap_err();
  assert!(matches!(err, AppError::Forbidden(_)));
  assert_eq!(count_rows(&pool, "reviews").await, 1);

  delete_review(&pool, author_id, review_id).await.unwrap();
  assert_eq!(count_rows(&pool, "reviews").await, 0);

  let err = delete_review(&pool, author_id, review_id).await.unwrap_err();
  assert!(matches!(err, AppError::NotFound(_)));
}
