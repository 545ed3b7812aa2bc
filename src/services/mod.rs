// src/services/mod.rs

//! Business logic, one module per storefront concern. Handlers stay thin and
//! delegate here; everything below returns `AppError` at the boundary.

pub mod auth_service;
pub mod cart_service;
pub mod catalog_service;
pub mod order_service;
pub mod review_service;
