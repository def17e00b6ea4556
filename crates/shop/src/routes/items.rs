//! Item management route handlers (auth-gated).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::instrument;

use clover_core::{CategoryId, ItemId, Price};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::catalog::NewItem;
use crate::routes::categories::CategoryView;
use crate::state::AppState;

/// Item row display data for the management table.
#[derive(Clone)]
pub struct ItemRowView {
    pub id: i32,
    pub title: String,
    pub price: String,
    pub published: bool,
    pub category: Option<i32>,
    pub post_date: String,
}

/// Items listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ItemsQuery {
    /// Only items posted on or after this date (YYYY-MM-DD).
    #[serde(rename = "minDate")]
    pub min_date: Option<String>,
    /// Only items in this category.
    pub category: Option<String>,
}

/// Item management table template.
#[derive(Template, WebTemplate)]
#[template(path = "items/index.html")]
pub struct ItemsIndexTemplate {
    pub items: Vec<ItemRowView>,
    pub min_date: Option<String>,
}

/// New item form template.
#[derive(Template, WebTemplate)]
#[template(path = "items/add.html")]
pub struct AddItemTemplate {
    pub categories: Vec<CategoryView>,
    pub error: Option<String>,
}

/// Display all items, optionally filtered by category or minimum post date.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<ItemsQuery>,
) -> Result<impl IntoResponse> {
    let catalog = state.catalog();

    // Empty filter inputs submit as empty strings, which mean "no filter"
    let category = parse_optional_category(query.category.as_deref().unwrap_or(""))?;
    let min_date = query
        .min_date
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty());

    let items = if let Some(id) = category {
        catalog.list_by_category(id).await?
    } else if let Some(raw) = min_date {
        catalog.list_since(parse_min_date(raw)?).await?
    } else {
        catalog.list_all().await?
    };

    Ok(ItemsIndexTemplate {
        items: items
            .iter()
            .map(|item| ItemRowView {
                id: item.id.as_i32(),
                title: item.title.clone(),
                price: item.price.display(),
                published: item.published,
                category: item.category.map(|c| c.as_i32()),
                post_date: item.post_date.format("%Y-%m-%d").to_string(),
            })
            .collect(),
        min_date: query.min_date,
    })
}

/// Display the new item form.
pub async fn add_form(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<impl IntoResponse> {
    let categories = state.catalog().list_categories().await?;

    Ok(AddItemTemplate {
        categories: categories.iter().map(CategoryView::from).collect(),
        error: None,
    })
}

/// Collected new-item form fields before validation.
#[derive(Default)]
struct RawItemForm {
    title: String,
    body: String,
    price: String,
    published: bool,
    category: String,
    image_file_name: Option<String>,
    image_bytes: Vec<u8>,
}

/// Handle new item form submission (multipart, optional feature image).
///
/// Field coercion is explicit here: empty optional fields become `None`, the
/// price string must parse as a non-negative decimal, and the published
/// checkbox maps presence to `true`.
#[instrument(skip(state, multipart))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    multipart: Multipart,
) -> Result<Response> {
    let form = read_item_form(multipart).await?;

    let price = match Price::parse(&form.price) {
        Ok(price) => price,
        Err(e) => {
            // Re-render the form with the validation message inline
            let categories = state.catalog().list_categories().await?;
            return Ok(AddItemTemplate {
                categories: categories.iter().map(CategoryView::from).collect(),
                error: Some(format!("Invalid price: {e}")),
            }
            .into_response());
        }
    };

    if form.title.trim().is_empty() {
        let categories = state.catalog().list_categories().await?;
        return Ok(AddItemTemplate {
            categories: categories.iter().map(CategoryView::from).collect(),
            error: Some("Title is required".to_string()),
        }
        .into_response());
    }

    let category = parse_optional_category(&form.category)?;

    let feature_image = match form.image_file_name {
        Some(original_name) if !form.image_bytes.is_empty() => Some(
            store_feature_image(&state, &original_name, &form.image_bytes).await?,
        ),
        _ => None,
    };

    let new_item = NewItem {
        title: form.title.trim().to_owned(),
        body: none_if_empty(&form.body),
        feature_image,
        price,
        published: form.published,
        category,
    };

    state.catalog().create(new_item).await?;

    Ok(Redirect::to("/items").into_response())
}

/// Delete an item by ID.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    state.catalog().delete(ItemId::new(id)).await?;

    Ok(Redirect::to("/items"))
}

// =============================================================================
// Helpers
// =============================================================================

/// Drain the multipart stream into the raw form fields.
async fn read_item_form(mut multipart: Multipart) -> Result<RawItemForm> {
    let mut form = RawItemForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed form: {e}")))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        match name.as_str() {
            "featureImage" => {
                form.image_file_name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .map(ToOwned::to_owned);
                form.image_bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Upload(format!("reading upload: {e}")))?
                    .to_vec();
            }
            other => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("malformed form: {e}")))?;
                match other {
                    "title" => form.title = value,
                    "body" => form.body = value,
                    "price" => form.price = value,
                    // Checkbox: any submitted value means checked
                    "published" => form.published = true,
                    "category" => form.category = value,
                    _ => {}
                }
            }
        }
    }

    Ok(form)
}

/// Empty form input becomes `None`.
fn none_if_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Parse the category select value; empty means no category.
fn parse_optional_category(raw: &str) -> Result<Option<CategoryId>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<CategoryId>()
        .map(Some)
        .map_err(|_| AppError::Validation(format!("invalid category id: {trimmed}")))
}

/// Parse a `YYYY-MM-DD` filter value into the start of that day, UTC.
fn parse_min_date(raw: &str) -> Result<DateTime<Utc>> {
    let date = raw
        .parse::<NaiveDate>()
        .map_err(|_| AppError::Validation(format!("invalid minDate: {raw}")))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::Validation(format!("invalid minDate: {raw}")))?;
    Ok(midnight.and_utc())
}

/// Write an uploaded feature image under the upload directory.
///
/// The stored name is a fresh UUID with the original extension; the returned
/// path is what browsers request, served by the `/uploads` static route.
async fn store_feature_image(
    state: &AppState,
    original_name: &str,
    bytes: &[u8],
) -> Result<String> {
    let extension = std::path::Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");
    let file_name = format!("{}.{extension}", uuid::Uuid::new_v4());

    let upload_dir = std::path::Path::new(&state.config().upload_dir);
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::Upload(format!("creating upload dir: {e}")))?;
    tokio::fs::write(upload_dir.join(&file_name), bytes)
        .await
        .map_err(|e| AppError::Upload(format!("writing upload: {e}")))?;

    Ok(format!("/uploads/{file_name}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_none_if_empty() {
        assert_eq!(none_if_empty(""), None);
        assert_eq!(none_if_empty("   "), None);
        assert_eq!(none_if_empty(" text "), Some("text".to_owned()));
    }

    #[test]
    fn test_parse_optional_category() {
        assert_eq!(parse_optional_category("").unwrap(), None);
        assert_eq!(
            parse_optional_category("3").unwrap(),
            Some(CategoryId::new(3))
        );
        assert!(parse_optional_category("shoes").is_err());
    }

    #[test]
    fn test_parse_min_date() {
        let parsed = parse_min_date("2024-10-09").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-10-09 00:00:00");
        assert!(parse_min_date("last tuesday").is_err());
    }
}
