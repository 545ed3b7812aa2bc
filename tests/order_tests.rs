// tests/order_tests.rs
mod common;

use common::*;
use guitarhub::errors::AppError;
use guitarhub::models::CatalogRef;
use guitarhub::services::cart_service::{CartStore, UserCart};
use guitarhub::services::order_service::{create_order, get_order, list_orders};

#[tokio::test]
async fn checkout_with_empty_cart_creates_nothing() {
  let pool = test_pool().await;
  let user_id = create_user(&pool, "empty@example.com").await;

  let err = create_order(&pool, user_id, None, None).await.unwrap_err();
  assert!(matches!(err, AppError::EmptyCart));
  assert_eq!(count_rows(&pool, "orders").await, 0);
  assert_eq!(count_rows(&pool, "order_items").await, 0);
}

#[tokio::test]
async fn checkout_totals_snapshots_and_clears_the_cart() {
  let pool = test_pool().await;
  let user_id = create_user(&pool, "buyer@example.com").await;
  let guitar_id = insert_product(&pool, "Les Paul Standard", 2999.0).await;
  let strings_id = insert_accessory(&pool, "Electric Guitar Strings Set", 12.99).await;

  let cart = UserCart::new(pool.clone(), user_id);
  cart.add(CatalogRef::Product(guitar_id), 1).await.unwrap();
  cart.add(CatalogRef::Accessory(strings_id), 3).await.unwrap();

  let receipt = create_order(
    &pool,
    user_id,
    Some("12 Fret Street".to_string()),
    Some("card".to_string()),
  )
  .await
  .unwrap();

  let expected_total = 2999.0 + 3.0 * 12.99;
  assert!((receipt.total_amount - expected_total).abs() < 1e-9);

  // One order item per pre-conversion cart line, and the cart is empty
  assert_eq!(count_rows(&pool, "order_items").await, 2);
  assert_eq!(count_rows(&pool, "cart_items").await, 0);

  // A later price change must not alter the stored snapshot
  sqlx::query("UPDATE products SET price = 1.0, name = 'Renamed' WHERE id = ?")
    .bind(guitar_id)
    .execute(&pool)
    .await
    .unwrap();

  let order = get_order(&pool, user_id, receipt.order_id).await.unwrap();
  let guitar_line = order
    .items
    .iter()
    .find(|i| i.item_id == guitar_id && i.item_type == guitarhub::models::ItemType::Product)
    .unwrap();
  assert_eq!(guitar_line.unit_price, 2999.0);
  assert_eq!(guitar_line.item_name, "Les Paul Standard");
  assert!((order.order.total_amount - expected_total).abs() < 1e-9);
  assert_eq!(order.order.status, "pending");
}

#[tokio::test]
async fn failed_conversion_rolls_back_and_keeps_the_cart() {
  let pool = test_pool().await;
  let user_id = create_user(&pool, "rollback@example.com").await;
  let product_id = insert_product(&pool, "Flying V", 1999.0).await;

  let cart = UserCart::new(pool.clone(), user_id);
  cart.add(CatalogRef::Product(product_id), 2).await.unwrap();

  // Force the line-item insert to fail mid-transaction
  sqlx::query("DROP TABLE order_items").execute(&pool).await.unwrap();

  let err = create_order(&pool, user_id, None, None).await.unwrap_err();
  assert!(matches!(err, AppError::OrderCreation(_)));

  // The order row written before the failure must be rolled back too
  assert_eq!(count_rows(&pool, "orders").await, 0);

  // And the cart survives untouched
  let lines = cart.lines().await.unwrap();
  assert_eq!(lines.len(), 1);
  assert_eq!(lines[0].quantity, 2);
}

#[tokio::test]
async fn foreign_and_missing_orders_are_indistinguishable() {
  let pool = test_pool().await;
  let owner_id = create_user(&pool, "owner@example.com").await;
  let other_id = create_user(&pool, "other@example.com").await;
  let product_id = insert_product(&pool, "Telecaster Classic", 1899.0).await;

  let cart = UserCart::new(pool.clone(), owner_id);
  cart.add(CatalogRef::Product(product_id), 1).await.unwrap();
  let receipt = create_order(&pool, owner_id, None, None).await.unwrap();

  let foreign_err = get_order(&pool, other_id, receipt.order_id).await.unwrap_err();
  let missing_err = get_order(&pool, other_id, 999_999).await.unwrap_err();

  assert!(matches!(foreign_err, AppError::NotFound(_)));
  // Same message for "owned by someone else" and "does not exist"
  assert_eq!(foreign_err.to_string(), missing_err.to_string());
}

#[tokio::test]
async fn order_history_is_newest_first_with_nested_items() {
  let pool = test_pool().await;
  let user_id = create_user(&pool, "history@example.com").await;
  let product_id = insert_product(&pool, "Precision Bass", 1799.0).await;

  let cart = UserCart::new(pool.clone(), user_id);

  cart.add(CatalogRef::Product(product_id), 1).await.unwrap();
  let first = create_order(&pool, user_id, None, None).await.unwrap();

  cart.add(CatalogRef::Product(product_id), 2).await.unwrap();
  let second = create_order(&pool, user_id, None, None).await.unwrap();

  let orders = list_orders(&pool, user_id).await.unwrap();
  assert_eq!(orders.len(), 2);
  assert_eq!(orders[0].order.id, second.order_id);
  assert_eq!(orders[1].order.id, first.order_id);
  assert_eq!(orders[0].items.len(), 1);
  assert_eq!(orders[0].items[0].quantity, 2);
}

#[tokio::test]
async fn orders_are_scoped_per_user() {
  let pool = test_pool().await;
  let alice_id = create_user(&pool, "alice@example.com").await;
  let bob_id = create_user(&pool, "bob@example.com").await;
  let product_id = insert_product(&pool, "SR Bass", 699.0).await;

  let alice_cart = UserCart::new(pool.clone(), alice_id);
  alice_cart.add(CatalogRef::Product(product_id), 1).await.unwrap();
  create_order(&pool, alice_id, None, None).await.unwrap();

  assert_eq!(list_orders(&pool, alice_id).await.unwrap().len(), 1);
  assert!(list_orders(&pool, bob_id).await.unwrap().is_empty());

  // Bob's cart was never touched by Alice's checkout
  let bob_cart = UserCart::new(pool.clone(), bob_id);
  bob_cart.add(CatalogRef::Product(product_id), 5).await.unwrap();
  create_order(&pool, alice_id, None, None).await.unwrap_err(); // Alice's cart is empty again
  assert_eq!(bob_cart.lines().await.unwrap()[0].quantity, 5);
}
