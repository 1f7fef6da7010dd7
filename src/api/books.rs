//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

use super::{AuthenticatedUser, ValidatedJson};

fn non_empty(books: Vec<Book>) -> AppResult<Json<Vec<Book>>> {
    if books.is_empty() {
        return Err(AppError::NotFound("No book was found".to_string()));
    }
    Ok(Json(books))
}

/// List all books ordered by name
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.get_all().await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state
        .services
        .books
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;
    Ok(Json(book))
}

/// List the books of a category
#[utoipa::path(
    get,
    path = "/books/category/{category_id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("category_id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Books in the category", body = Vec<Book>),
        (status = 404, description = "No book in this category")
    )
)]
pub async fn get_books_by_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(category_id): Path<i32>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.get_books_by_category(category_id).await?;
    non_empty(books)
}

/// Search books by name
#[utoipa::path(
    get,
    path = "/books/search/{name}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Part of the book name, any case")),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 404, description = "No book was found")
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.search(&name).await?;
    non_empty(books)
}

/// Search books by name, author, description or category name
#[utoipa::path(
    get,
    path = "/books/search-with-category/{text}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("text" = String, Path, description = "Text to look for, any case")),
    responses(
        (status = 200, description = "Matching books with their category", body = Vec<Book>),
        (status = 404, description = "No book was found")
    )
)]
pub async fn search_books_with_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(text): Path<String>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.search_book_with_category(&text).await?;
    non_empty(books)
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input, duplicate name or unknown category")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.books.add(data.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input, id mismatch or duplicate name"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateBook>,
) -> AppResult<Json<Book>> {
    if id != data.id {
        return Err(AppError::BadRequest(format!(
            "Path id {} does not match body id {}",
            id, data.id
        )));
    }

    let updated = state.services.books.update(data.into()).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let book = state
        .services
        .books
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

    state.services.books.remove(&book).await?;
    Ok(StatusCode::OK)
}
