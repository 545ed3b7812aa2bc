// src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{auth_handlers, cart_handlers, catalog_handlers, order_handlers, review_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok", "message": "GuitarHub API is running" }))
}

/// Registers every API route; called from `main.rs` when building the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/auth")
          .route("/register", web::post().to(auth_handlers::register_handler))
          .route("/login", web::post().to(auth_handlers::login_handler))
          .route("/me", web::get().to(auth_handlers::me_handler))
          .route("/verify", web::post().to(auth_handlers::verify_handler)),
      )
      .service(
        web::scope("/products")
          .route("", web::get().to(catalog_handlers::list_products_handler))
          .route("/featured/list", web::get().to(catalog_handlers::featured_products_handler))
          .route("/{id}", web::get().to(catalog_handlers::get_product_handler)),
      )
      .service(
        web::scope("/accessories")
          .route("", web::get().to(catalog_handlers::list_accessories_handler))
          .route(
            "/featured/list",
            web::get().to(catalog_handlers::featured_accessories_handler),
          )
          .route("/{id}", web::get().to(catalog_handlers::get_accessory_handler)),
      )
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::get_cart_handler))
          .route("", web::post().to(cart_handlers::add_to_cart_handler))
          .route("", web::delete().to(cart_handlers::clear_cart_handler))
          .route("/merge", web::post().to(cart_handlers::merge_cart_handler))
          .route("/{itemId}", web::put().to(cart_handlers::update_cart_item_handler))
          .route("/{itemId}", web::delete().to(cart_handlers::remove_cart_item_handler)),
      )
      .service(
        web::scope("/orders")
          .route("", web::post().to(order_handlers::create_order_handler))
          .route("", web::get().to(order_handlers::list_orders_handler))
          .route("/{id}", web::get().to(order_handlers::get_order_handler)),
      )
      .service(
        web::scope("/reviews")
          .route("", web::post().to(review_handlers::create_review_handler))
          .route("/{id}", web::delete().to(review_handlers::delete_review_handler))
          .route(
            "/{productType}/{productId}",
            web::get().to(review_handlers::list_reviews_handler),
          ),
      ),
  );
}
