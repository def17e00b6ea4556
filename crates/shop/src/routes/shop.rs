//! Public shop route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use clover_core::{CategoryId, ItemId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::catalog::{Category, Item};
use crate::state::AppState;

/// Item display data for templates.
#[derive(Clone)]
pub struct ItemView {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub price: String,
    pub price_value: String,
    pub feature_image: Option<String>,
    pub category: Option<String>,
}

impl ItemView {
    /// Build the view, resolving the category label from the loaded list.
    ///
    /// A dangling category reference (the category was deleted) resolves to
    /// no label rather than an error.
    fn from_item(item: &Item, categories: &[Category]) -> Self {
        let category = item.category.and_then(|id| {
            categories
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
        });

        Self {
            id: item.id.as_i32(),
            title: item.title.clone(),
            body: item.body.clone().unwrap_or_default(),
            price: item.price.display(),
            price_value: item.price.to_string(),
            feature_image: item.feature_image.clone(),
            category,
        }
    }
}

/// Category display data for the sidebar.
#[derive(Clone)]
pub struct CategoryView {
    pub id: i32,
    pub name: String,
    /// Whether this category is the active filter.
    pub active: bool,
}

impl CategoryView {
    fn from_category(category: &Category, active_filter: Option<CategoryId>) -> Self {
        Self {
            id: category.id.as_i32(),
            name: category.name.clone(),
            active: active_filter == Some(category.id),
        }
    }
}

/// Shop listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ShopQuery {
    pub category: Option<i32>,
}

/// Shop listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopIndexTemplate {
    pub items: Vec<ItemView>,
    pub categories: Vec<CategoryView>,
    pub logged_in: bool,
}

/// Single item page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/show.html")]
pub struct ShopShowTemplate {
    pub item: ItemView,
    pub related: Vec<ItemView>,
    pub logged_in: bool,
}

/// Display published items, optionally filtered by category.
///
/// The published and category filters compose: with `?category=N` only
/// published items in that category are listed.
pub async fn show_listing(
    state: &AppState,
    category: Option<CategoryId>,
    logged_in: bool,
) -> Result<ShopIndexTemplate> {
    let catalog = state.catalog();

    let items = match category {
        Some(id) => catalog.list_published_by_category(id).await?,
        None => catalog.list_published().await?,
    };
    let categories = catalog.list_categories().await?;

    Ok(ShopIndexTemplate {
        items: items
            .iter()
            .map(|item| ItemView::from_item(item, &categories))
            .collect(),
        categories: categories
            .iter()
            .map(|c| CategoryView::from_category(c, category))
            .collect(),
        logged_in,
    })
}

/// Display the shop page.
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<ShopQuery>,
) -> Result<impl IntoResponse> {
    show_listing(&state, query.category.map(CategoryId::new), user.is_some()).await
}

/// Display a single published item with the rest of the published list.
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let catalog = state.catalog();

    let item = catalog
        .get_by_id(ItemId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item {id}")))?;

    let categories = catalog.list_categories().await?;
    let related = catalog
        .list_published()
        .await?
        .into_iter()
        .filter(|other| other.id != item.id)
        .collect::<Vec<_>>();

    Ok(ShopShowTemplate {
        item: ItemView::from_item(&item, &categories),
        related: related
            .iter()
            .map(|other| ItemView::from_item(other, &categories))
            .collect(),
        logged_in: user.is_some(),
    })
}
