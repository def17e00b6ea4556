//! Category management route handlers (auth-gated).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use clover_core::CategoryId;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::catalog::Category;
use crate::state::AppState;

/// Category display data for templates.
#[derive(Clone)]
pub struct CategoryView {
    pub id: i32,
    pub name: String,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.as_i32(),
            name: category.name.clone(),
        }
    }
}

/// New category form data.
#[derive(Debug, Deserialize)]
pub struct AddCategoryForm {
    pub name: String,
}

/// Category management table template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub categories: Vec<CategoryView>,
}

/// New category form template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/add.html")]
pub struct AddCategoryTemplate {
    pub error: Option<String>,
}

/// Display all categories.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<impl IntoResponse> {
    let categories = state.catalog().list_categories().await?;

    Ok(CategoriesIndexTemplate {
        categories: categories.iter().map(CategoryView::from).collect(),
    })
}

/// Display the new category form.
pub async fn add_form(RequireAuth(_user): RequireAuth) -> impl IntoResponse {
    AddCategoryTemplate { error: None }
}

/// Handle new category form submission.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<AddCategoryForm>,
) -> Result<Response> {
    let name = form.name.trim();
    if name.is_empty() {
        return Ok(AddCategoryTemplate {
            error: Some("Category name is required".to_string()),
        }
        .into_response());
    }

    state.catalog().create_category(name).await?;

    Ok(Redirect::to("/categories").into_response())
}

/// Delete a category by ID.
///
/// No referential check: items keep their category value and the shop page
/// renders them without a category label.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    state.catalog().delete_category(CategoryId::new(id)).await?;

    Ok(Redirect::to("/categories"))
}
