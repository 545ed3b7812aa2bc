// src/lib.rs

//! GuitarHub storefront backend: catalog browsing, cart reconciliation,
//! order conversion and reviews over SQLite.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod web;

pub use errors::{AppError, Result};
pub use state::AppState;
