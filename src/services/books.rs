//! Book catalog service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
    repository::{BookRepository, Filter},
};

#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    /// Add a book; its name must not be used by any other book
    pub async fn add(&self, book: Book) -> AppResult<Book> {
        let same_name = self
            .books
            .search(&Filter::new().eq("name", book.name.as_str()))
            .await?;
        if !same_name.is_empty() {
            tracing::info!("Rejected book add: name '{}' already exists", book.name);
            return Err(AppError::Duplicate(format!(
                "A book named '{}' already exists",
                book.name
            )));
        }

        let created = self.books.add(&book).await?;
        tracing::info!("Book created: id={} name='{}'", created.id, created.name);
        Ok(created)
    }

    /// Update a book; another book (different id) must not hold the new name.
    /// Returns the book as stored.
    pub async fn update(&self, book: Book) -> AppResult<Book> {
        let same_name = self
            .books
            .search(&Filter::new().eq("name", book.name.as_str()).ne("id", book.id))
            .await?;
        if !same_name.is_empty() {
            tracing::info!("Rejected book update id={}: name '{}' already exists", book.id, book.name);
            return Err(AppError::Duplicate(format!(
                "A book named '{}' already exists",
                book.name
            )));
        }

        if self.books.update(&book).await? == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", book.id)));
        }
        self.books
            .get_by_id(book.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book.id)))
    }

    pub async fn remove(&self, book: &Book) -> AppResult<()> {
        self.books.remove(book).await?;
        tracing::info!("Book removed: id={}", book.id);
        Ok(())
    }

    pub async fn get_all(&self) -> AppResult<Vec<Book>> {
        self.books.get_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        self.books.get_by_id(id).await
    }

    pub async fn get_books_by_category(&self, category_id: i32) -> AppResult<Vec<Book>> {
        self.books.get_books_by_category(category_id).await
    }

    /// Case-insensitive substring search on the book name
    pub async fn search(&self, name: &str) -> AppResult<Vec<Book>> {
        self.books.search(&Filter::new().contains("name", name)).await
    }

    pub async fn search_book_with_category(&self, text: &str) -> AppResult<Vec<Book>> {
        self.books.search_book_with_category(text).await
    }
}
