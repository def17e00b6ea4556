//! Catalog domain types.

use chrono::{DateTime, Utc};

use clover_core::{CategoryId, ItemId, Price};

/// An item for sale.
#[derive(Debug, Clone)]
pub struct Item {
    /// Store-assigned stable identifier.
    pub id: ItemId,
    /// Short display title.
    pub title: String,
    /// Longer body text, absent when the form field was left empty.
    pub body: Option<String>,
    /// Path of the uploaded feature image under `/uploads`, if any.
    pub feature_image: Option<String>,
    /// Unit price, non-negative.
    pub price: Price,
    /// Whether the item appears on the public shop page.
    pub published: bool,
    /// Owning category. May dangle after a category is deleted; the shop
    /// page tolerates that and shows the item without a category label.
    pub category: Option<CategoryId>,
    /// Server-assigned creation time.
    pub post_date: DateTime<Utc>,
}

/// Fields for creating an [`Item`].
///
/// `post_date` is intentionally absent: the repository stamps it with the
/// server's current time.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub body: Option<String>,
    pub feature_image: Option<String>,
    pub price: Price,
    pub published: bool,
    pub category: Option<CategoryId>,
}

/// A catalog category.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
