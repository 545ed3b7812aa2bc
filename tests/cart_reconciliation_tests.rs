// tests/cart_reconciliation_tests.rs
mod common;

use common::*;
use guitarhub::errors::AppError;
use guitarhub::models::{AnonymousCartLine, CatalogRef, ItemType};
use guitarhub::services::cart_service::{merge_anonymous_lines, merge_carts, CartStore, LocalCart, UserCart};

#[tokio::test]
async fn empty_cart_reads_as_empty_list() {
  let pool = test_pool().await;
  let user_id = create_user(&pool, "empty@example.com").await;

  let cart = UserCart::new(pool.clone(), user_id);
  assert!(cart.lines().await.unwrap().is_empty());
}

#[tokio::test]
async fn adding_same_item_twice_merges_into_one_line() {
  let pool = test_pool().await;
  let user_id = create_user(&pool, "merge@example.com").await;
  let product_id = insert_product(&pool, "Les Paul Standard", 2999.0).await;

  let cart = UserCart::new(pool.clone(), user_id);
  cart.add(CatalogRef::Product(product_id), 2).await.unwrap();
  let line = cart.add(CatalogRef::Product(product_id), 3).await.unwrap();

  assert_eq!(line.quantity, 5);
  assert_eq!(count_rows(&pool, "cart_items").await, 1);

  let lines = cart.lines().await.unwrap();
  assert_eq!(lines.len(), 1);
  assert_eq!(lines[0].quantity, 5);
  assert_eq!(lines[0].name, "Les Paul Standard");
}

#[tokio::test]
async fn product_and_accessory_with_same_id_are_distinct_lines() {
  let pool = test_pool().await;
  let user_id = create_user(&pool, "types@example.com").await;
  let product_id = insert_product(&pool, "Strat", 2499.0).await;
  let accessory_id = insert_accessory(&pool, "Strings", 12.99).await;
  // Both tables start their id sequence at 1
  assert_eq!(product_id, accessory_id);

  let cart = UserCart::new(pool.clone(), user_id);
  cart.add(CatalogRef::Product(product_id), 1).await.unwrap();
  cart.add(CatalogRef::Accessory(accessory_id), 1).await.unwrap();

  let lines = cart.lines().await.unwrap();
  assert_eq!(lines.len(), 2);
  assert_ne!(lines[0].item_type, lines[1].item_type);
}

#[tokio::test]
async fn add_rejects_non_positive_quantity() {
  let pool = test_pool().await;
  let user_id = create_user(&pool, "qty@example.com").await;
  let product_id = insert_product(&pool, "Tele", 1899.0).await;

  let cart = UserCart::new(pool.clone(), user_id);
  let err = cart.add(CatalogRef::Product(product_id), 0).await.unwrap_err();
  assert!(matches!(err, AppError::Validation(_)));
  assert_eq!(count_rows(&pool, "cart_items").await, 0);
}

#[tokio::test]
async fn add_rejects_unknown_catalog_item() {
  let pool = test_pool().await;
  let user_id = create_user(&pool, "unknown@example.com").await;

  let cart = UserCart::new(pool.clone(), user_id);
  let err = cart.add(CatalogRef::Product(9999), 1).await.unwrap_err();
  assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn set_quantity_zero_removes_the_line() {
  let pool = test_pool().await;
  let user_id = create_user(&pool, "zero@example.com").await;
  let product_id = insert_product(&pool, "SG Special", 1599.0).await;

  let cart = UserCart::new(pool.clone(), user_id);
  let line = cart.add(CatalogRef::Product(product_id), 4).await.unwrap();
  cart.set_quantity(line.cart_item_id, 0).await.unwrap();

  assert!(cart.lines().await.unwrap().is_empty());
}

#[tokio::test]
async fn set_quantity_updates_owned_line() {
  let pool = test_pool().await;
  let user_id = create_user(&pool, "update@example.com").await;
  let product_id = insert_product(&pool, "RG Series", 799.0).await;

  let cart = UserCart::new(pool.clone(), user_id);
  let line = cart.add(CatalogRef::Product(product_id), 1).await.unwrap();
  cart.set_quantity(line.cart_item_id, 7).await.unwrap();

  assert_eq!(cart.lines().await.unwrap()[0].quantity, 7);
}

#[tokio::test]
async fn set_quantity_on_another_users_line_is_not_found() {
  let pool = test_pool().await;
  let owner_id = create_user(&pool, "owner@example.com").await;
  let intruder_id = create_user(&pool, "intruder@example.com").await;
  let product_id = insert_product(&pool, "J-45", 2799.0).await;

  let owner_cart = UserCart::new(pool.clone(), owner_id);
  let line = owner_cart.add(CatalogRef::Product(product_id), 2).await.unwrap();

  let intruder_cart = UserCart::new(pool.clone(), intruder_id);
  let err = intruder_cart.set_quantity(line.cart_item_id, 99).await.unwrap_err();
  assert!(matches!(err, AppError::NotFound(_)));

  // Owner's line untouched
  assert_eq!(owner_cart.lines().await.unwrap()[0].quantity, 2);
}

#[tokio::test]
async fn remove_and_clear_are_idempotent() {
  let pool = test_pool().await;
  let user_id = create_user(&pool, "idem@example.com").await;
  let product_id = insert_product(&pool, "Explorer", 2199.0).await;

  let cart = UserCart::new(pool.clone(), user_id);
  let line = cart.add(CatalogRef::Product(product_id), 1).await.unwrap();

  cart.remove(line.cart_item_id).await.unwrap();
  cart.remove(line.cart_item_id).await.unwrap(); // already gone, still Ok

  cart.clear().await.unwrap();
  cart.clear().await.unwrap();
  assert!(cart.lines().await.unwrap().is_empty());
}

#[tokio::test]
async fn local_cart_follows_the_same_merge_rule() {
  let pool = test_pool().await;
  let product_id = insert_product(&pool, "Classical Pro", 899.0).await;

  let cart = LocalCart::new(pool.clone());
  cart.add(CatalogRef::Product(product_id), 1).await.unwrap();
  let line = cart.add(CatalogRef::Product(product_id), 2).await.unwrap();

  assert_eq!(line.quantity, 3);
  assert_eq!(cart.lines().await.unwrap().len(), 1);

  let err = cart.set_quantity(12345, 2).await.unwrap_err();
  assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn merging_anonymous_cart_sums_quantities() {
  let pool = test_pool().await;
  let user_id = create_user(&pool, "login@example.com").await;
  let product_id = insert_product(&pool, "Jazz Bass Premium", 2299.0).await;

  // Authenticated cart already holds one of the item
  let user_cart = UserCart::new(pool.clone(), user_id);
  user_cart.add(CatalogRef::Product(product_id), 1).await.unwrap();

  // Anonymous session added two more of the same item
  let local_cart = LocalCart::new(pool.clone());
  local_cart.add(CatalogRef::Product(product_id), 2).await.unwrap();

  let merged = merge_carts(&local_cart, &user_cart).await.unwrap();

  assert_eq!(merged.len(), 1);
  assert_eq!(merged[0].quantity, 3);
  assert_eq!(count_rows(&pool, "cart_items").await, 1);
  // Anonymous state is discarded after the merge
  assert!(local_cart.lines().await.unwrap().is_empty());
}

#[tokio::test]
async fn merging_raw_lines_skips_stale_items() {
  let pool = test_pool().await;
  let user_id = create_user(&pool, "stale@example.com").await;
  let product_id = insert_product(&pool, "American Ultra", 2899.0).await;

  let user_cart = UserCart::new(pool.clone(), user_id);
  let lines = vec![
    AnonymousCartLine { id: product_id, item_type: ItemType::Product, quantity: 2 },
    // localStorage junk pointing at an item that no longer exists
    AnonymousCartLine { id: 4242, item_type: ItemType::Accessory, quantity: 1 },
  ];

  let merged = merge_anonymous_lines(&user_cart, &lines).await.unwrap();
  assert_eq!(merged.len(), 1);
  assert_eq!(merged[0].quantity, 2);
}
