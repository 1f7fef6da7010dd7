//! Category endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CreateCategory, UpdateCategory},
};

use super::{AuthenticatedUser, ValidatedJson};

/// List all categories ordered by name
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of categories", body = Vec<Category>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.categories.get_all().await?;
    Ok(Json(categories))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Category>> {
    let category = state
        .services
        .categories
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;
    Ok(Json(category))
}

/// Search categories by name
#[utoipa::path(
    get,
    path = "/categories/search/{name}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Part of the category name, any case")),
    responses(
        (status = 200, description = "Matching categories", body = Vec<Category>),
        (status = 404, description = "No category was found")
    )
)]
pub async fn search_categories(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.categories.search(&name).await?;
    if categories.is_empty() {
        return Err(AppError::NotFound("No category was found".to_string()));
    }
    Ok(Json(categories))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid input or duplicate name")
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let created = state.services.categories.add(data.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing category
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, description = "Invalid input, id mismatch or duplicate name"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateCategory>,
) -> AppResult<Json<Category>> {
    if id != data.id {
        return Err(AppError::BadRequest(format!(
            "Path id {} does not match body id {}",
            id, data.id
        )));
    }

    let updated = state.services.categories.update(data.into()).await?;
    Ok(Json(updated))
}

/// Delete a category that no book references
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 400, description = "Category still has books"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let category = state
        .services
        .categories
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

    state.services.categories.remove(&category).await?;
    Ok(StatusCode::OK)
}
