//! Catalog repository: items and categories.
//!
//! Filters compose in SQL rather than in application code, so published-only
//! and per-category listings are single queries. Category deletion performs
//! no referential check against items; a deleted category simply leaves its
//! items with a dangling reference.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use clover_core::{CategoryId, ItemId, Price};

use super::RepositoryError;
use crate::models::catalog::{Category, Item, NewItem};

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: ItemId,
    title: String,
    body: Option<String>,
    feature_image: Option<String>,
    price: Price,
    published: bool,
    category: Option<CategoryId>,
    post_date: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            body: row.body,
            feature_image: row.feature_image,
            price: row.price,
            published: row.published,
            category: row.category,
            post_date: row.post_date,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

const ITEM_COLUMNS: &str = "id, title, body, feature_image, price, published, category, post_date";

/// Repository for catalog database operations.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// All items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items ORDER BY post_date DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Published items only.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_published(&self) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE published ORDER BY post_date DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// All items in a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE category = $1 ORDER BY post_date DESC, id DESC"
        ))
        .bind(category.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Published items in a category (both filters, intersected).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_published_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items
             WHERE published AND category = $1
             ORDER BY post_date DESC, id DESC"
        ))
        .bind(category.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Items posted at or after the given time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_since(
        &self,
        min_date: DateTime<Utc>,
    ) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE post_date >= $1 ORDER BY post_date DESC, id DESC"
        ))
        .bind(min_date)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// One item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ItemId) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    /// Create an item. `post_date` is stamped with the server's current time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, item: NewItem) -> Result<Item, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "INSERT INTO items (title, body, feature_image, price, published, category, post_date)
             VALUES ($1, $2, $3, $4, $5, $6, NOW())
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(&item.title)
        .bind(&item.body)
        .bind(&item.feature_image)
        .bind(item.price.amount())
        .bind(item.published)
        .bind(item.category.map(|c| c.as_i32()))
        .fetch_one(self.pool)
        .await?;

        Ok(Item::from(row))
    }

    /// Delete an item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no item has this ID.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// All categories, alphabetical.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name FROM categories ORDER BY name, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_category(&self, name: &str) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(Category::from(row))
    }

    /// Delete a category by ID.
    ///
    /// Items referencing the category are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no category has this ID.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
