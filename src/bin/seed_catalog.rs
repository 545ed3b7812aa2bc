// src/bin/seed_catalog.rs

//! Offline catalog seeding: populates the products and accessories tables with
//! the storefront's sample inventory. Safe to re-run; existing rows are kept.

use anyhow::Context;
use guitarhub::config::AppConfig;
use guitarhub::db;
use guitarhub::models::ItemType;
use sqlx::SqlitePool;

struct SeedItem {
  name: &'static str,
  category: &'static str,
  brand: &'static str,
  price: f64,
  badge: Option<&'static str>,
  featured: bool,
  stock_quantity: i64,
  description: &'static str,
}

const PRODUCTS: &[SeedItem] = &[
  SeedItem {
    name: "Les Paul Standard",
    category: "electric",
    brand: "gibson",
    price: 2999.0,
    badge: Some("New"),
    featured: true,
    stock_quantity: 15,
    description: "Iconic Les Paul with classic tone and feel. Features dual humbuckers and mahogany body.",
  },
  SeedItem {
    name: "Stratocaster Deluxe",
    category: "electric",
    brand: "fender",
    price: 2499.0,
    badge: Some("Sale"),
    featured: true,
    stock_quantity: 20,
    description: "Legendary Stratocaster with versatile tone. Three single-coil pickups.",
  },
  SeedItem {
    name: "Acoustic Dreadnought",
    category: "acoustic",
    brand: "martin",
    price: 1899.0,
    badge: None,
    featured: true,
    stock_quantity: 12,
    description: "Rich, powerful acoustic tone with solid spruce top.",
  },
  SeedItem {
    name: "Jazz Bass Premium",
    category: "bass",
    brand: "fender",
    price: 2299.0,
    badge: Some("Popular"),
    featured: true,
    stock_quantity: 10,
    description: "Classic Jazz Bass with smooth playability and punchy tone.",
  },
  SeedItem {
    name: "SG Special",
    category: "electric",
    brand: "gibson",
    price: 1599.0,
    badge: None,
    featured: false,
    stock_quantity: 18,
    description: "Lightweight SG with powerful dual humbuckers.",
  },
  SeedItem {
    name: "Telecaster Classic",
    category: "electric",
    brand: "fender",
    price: 1899.0,
    badge: Some("Sale"),
    featured: false,
    stock_quantity: 14,
    description: "Classic Telecaster twang with modern reliability.",
  },
  SeedItem {
    name: "Classical Pro",
    category: "classical",
    brand: "martin",
    price: 899.0,
    badge: None,
    featured: false,
    stock_quantity: 25,
    description: "Professional nylon-string guitar with warm tone.",
  },
  SeedItem {
    name: "RG Series",
    category: "electric",
    brand: "ibanez",
    price: 799.0,
    badge: Some("New"),
    featured: false,
    stock_quantity: 22,
    description: "Fast-playing RG with versatile pickup configuration.",
  },
  SeedItem {
    name: "Precision Bass",
    category: "bass",
    brand: "fender",
    price: 1799.0,
    badge: None,
    featured: false,
    stock_quantity: 16,
    description: "The original electric bass with timeless tone.",
  },
  SeedItem {
    name: "J-45 Acoustic",
    category: "acoustic",
    brand: "gibson",
    price: 2799.0,
    badge: Some("Popular"),
    featured: false,
    stock_quantity: 8,
    description: "Legendary acoustic with balanced, rich tone.",
  },
];

const ACCESSORIES: &[SeedItem] = &[
  SeedItem {
    name: "Electric Guitar Strings Set",
    category: "strings",
    brand: "daddario",
    price: 12.99,
    badge: Some("Popular"),
    featured: true,
    stock_quantity: 100,
    description: "Premium nickel wound strings for electric guitar.",
  },
  SeedItem {
    name: "Acoustic Guitar Strings",
    category: "strings",
    brand: "ernieball",
    price: 14.99,
    badge: Some("Sale"),
    featured: true,
    stock_quantity: 85,
    description: "Bronze wound acoustic guitar strings.",
  },
  SeedItem {
    name: "Premium Guitar Picks Pack",
    category: "picks",
    brand: "dunlop",
    price: 8.99,
    badge: None,
    featured: true,
    stock_quantity: 200,
    description: "Assorted thickness guitar pick variety pack.",
  },
  SeedItem {
    name: "Hard Shell Guitar Case",
    category: "cases",
    brand: "fender",
    price: 149.99,
    badge: None,
    featured: true,
    stock_quantity: 30,
    description: "Durable hard shell case with plush interior.",
  },
  SeedItem {
    name: "Professional Guitar Cable 20ft",
    category: "cables",
    brand: "monster",
    price: 39.99,
    badge: Some("Sale"),
    featured: false,
    stock_quantity: 60,
    description: "High-quality instrument cable with lifetime warranty.",
  },
  SeedItem {
    name: "Overdrive Pedal",
    category: "pedals",
    brand: "boss",
    price: 129.99,
    badge: Some("Popular"),
    featured: true,
    stock_quantity: 25,
    description: "Classic overdrive tone pedal.",
  },
  SeedItem {
    name: "Clip-On Tuner",
    category: "tuners",
    brand: "snark",
    price: 19.99,
    badge: Some("Sale"),
    featured: false,
    stock_quantity: 120,
    description: "Convenient clip-on chromatic tuner.",
  },
  SeedItem {
    name: "Pedalboard Case",
    category: "cases",
    brand: "pedaltrain",
    price: 199.99,
    badge: Some("New"),
    featured: true,
    stock_quantity: 15,
    description: "Professional pedalboard with case.",
  },
];

async fn seed_table(pool: &SqlitePool, kind: ItemType, items: &[SeedItem]) -> anyhow::Result<u64> {
  let sql = format!(
    r#"
    INSERT INTO {} (name, category, brand, price, description, badge, featured, stock_quantity)
    SELECT ?, ?, ?, ?, ?, ?, ?, ?
    WHERE NOT EXISTS (SELECT 1 FROM {} WHERE name = ?)
    "#,
    kind.table(),
    kind.table()
  );

  let mut inserted = 0;
  for item in items {
    let result = sqlx::query(&sql)
      .bind(item.name)
      .bind(item.category)
      .bind(item.brand)
      .bind(item.price)
      .bind(item.description)
      .bind(item.badge)
      .bind(item.featured)
      .bind(item.stock_quantity)
      .bind(item.name)
      .execute(pool)
      .await
      .with_context(|| format!("seeding {} '{}'", kind, item.name))?;
    inserted += result.rows_affected();
  }
  Ok(inserted)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let config = AppConfig::from_env().context("loading configuration")?;
  let pool = db::connect(&config.database_url).await.context("connecting to database")?;
  db::init_schema(&pool).await.context("initializing schema")?;

  let products = seed_table(&pool, ItemType::Product, PRODUCTS).await?;
  let accessories = seed_table(&pool, ItemType::Accessory, ACCESSORIES).await?;

  tracing::info!(products, accessories, "Catalog seeding complete.");
  Ok(())
}
