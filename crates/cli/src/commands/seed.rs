//! Seed the catalog with sample categories and items.
//!
//! Gives a fresh database something to show on the shop page. Safe to run
//! more than once in the sense that it only ever appends; it does not check
//! for existing rows.

use sqlx::PgPool;

use super::migrate::{MigrationError, database_url};

/// Sample categories.
const CATEGORIES: &[&str] = &["Kitchen", "Garden", "Stationery"];

/// Sample items: (title, body, price, published, category index).
const ITEMS: &[(&str, &str, &str, bool, usize)] = &[
    (
        "Enamel Kettle",
        "A two-litre stovetop kettle in forest green enamel.",
        "34.00",
        true,
        0,
    ),
    (
        "Hand Trowel",
        "Ash handle, stainless blade, comfortable in the hand.",
        "14.50",
        true,
        1,
    ),
    (
        "Dot Grid Notebook",
        "A5, 160 pages, lies flat when open.",
        "9.99",
        true,
        2,
    ),
    (
        "Seedling Tray",
        "Reusable 24-cell tray for spring starts.",
        "7.25",
        false,
        1,
    ),
];

/// Insert the sample data.
///
/// # Errors
///
/// Returns `MigrationError` if the database URL is missing or an insert fails.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;

    tracing::info!("Connecting to shop database...");
    let pool = PgPool::connect(&database_url).await?;

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        let id = insert_category(&pool, name).await?;
        category_ids.push(id);
        tracing::info!(category = name, id, "Seeded category");
    }

    for (title, body, price, published, category_index) in ITEMS {
        let category = category_ids.get(*category_index).copied();
        insert_item(&pool, title, body, price, *published, category).await?;
        tracing::info!(item = title, "Seeded item");
    }

    tracing::info!("Seed data complete!");
    Ok(())
}

async fn insert_category(pool: &PgPool, name: &str) -> Result<i32, MigrationError> {
    let id: i32 = sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(id)
}

async fn insert_item(
    pool: &PgPool,
    title: &str,
    body: &str,
    price: &str,
    published: bool,
    category: Option<i32>,
) -> Result<(), MigrationError> {
    sqlx::query(
        "INSERT INTO items (title, body, price, published, category, post_date)
         VALUES ($1, $2, $3::numeric, $4, $5, NOW())",
    )
    .bind(title)
    .bind(body)
    .bind(price)
    .bind(published)
    .bind(category)
    .execute(pool)
    .await?;
    Ok(())
}
