// src/main.rs

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web as actix_data, App, HttpServer};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

use guitarhub::config::AppConfig;
use guitarhub::state::AppState;
use guitarhub::{db, web};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting GuitarHub backend server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      panic!("Configuration error: {}", e);
    }
  };

  let db_pool = match db::connect(&app_config.database_url).await {
    Ok(pool) => {
      tracing::info!("Successfully connected to the database.");
      pool
    }
    Err(e) => {
      tracing::error!(error = %e, "Failed to connect to the database.");
      panic!("Database connection error: {}", e);
    }
  };

  if let Err(e) = db::init_schema(&db_pool).await {
    tracing::error!(error = %e, "Failed to initialize database schema.");
    panic!("Schema initialization error: {}", e);
  }

  if app_config.seed_db {
    tracing::info!("SEED_DB is set; run the seed-catalog binary to populate the catalog.");
  }

  let app_state = AppState {
    db_pool: db_pool.clone(),
    config: app_config.clone(),
  };

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(Cors::permissive())
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::routes::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
