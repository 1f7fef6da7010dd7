//! Book repository: generic store plus category-aware queries

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, Pool, Postgres};

use super::{filter::like_pattern, BookRepository, Filter, PgStore, Repository};
use crate::{
    error::AppResult,
    models::{book::Book, category::Category},
};

const SELECT_WITH_CATEGORY: &str = r#"
    SELECT b.id, b.name, b.author, b.description, b.price, b.publish_date, b.category_id,
           c.name AS category_name
    FROM books b
    JOIN categories c ON c.id = b.category_id
"#;

/// Internal row structure for book + category joins
#[derive(Debug, FromRow)]
struct BookCategoryRow {
    id: i32,
    name: String,
    author: String,
    description: String,
    price: Decimal,
    publish_date: NaiveDate,
    category_id: i32,
    category_name: String,
}

impl From<BookCategoryRow> for Book {
    fn from(row: BookCategoryRow) -> Self {
        Book {
            id: row.id,
            name: row.name,
            author: row.author,
            description: row.description,
            price: row.price,
            publish_date: row.publish_date,
            category_id: row.category_id,
            category: Some(Category {
                id: row.category_id,
                name: row.category_name,
            }),
        }
    }
}

#[derive(Clone)]
pub struct PgBookRepository {
    store: PgStore<Book>,
}

impl PgBookRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            store: PgStore::new(pool),
        }
    }
}

#[async_trait]
impl Repository<Book> for PgBookRepository {
    async fn add(&self, entity: &Book) -> AppResult<Book> {
        self.store.add(entity).await
    }

    async fn update(&self, entity: &Book) -> AppResult<u64> {
        self.store.update(entity).await
    }

    async fn remove(&self, entity: &Book) -> AppResult<u64> {
        self.store.remove(entity).await
    }

    /// All books with their category, ordered by name
    async fn get_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookCategoryRow>(&format!(
            "{} ORDER BY b.name",
            SELECT_WITH_CATEGORY
        ))
        .fetch_all(self.store.pool())
        .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookCategoryRow>(&format!(
            "{} WHERE b.id = $1",
            SELECT_WITH_CATEGORY
        ))
        .bind(id)
        .fetch_optional(self.store.pool())
        .await?;
        Ok(row.map(Book::from))
    }

    async fn search(&self, filter: &Filter) -> AppResult<Vec<Book>> {
        self.store.search(filter).await
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn get_books_by_category(&self, category_id: i32) -> AppResult<Vec<Book>> {
        self.store
            .search(&Filter::new().eq("category_id", category_id))
            .await
    }

    async fn search_book_with_category(&self, text: &str) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookCategoryRow>(&format!(
            r#"{}
            WHERE b.name ILIKE $1
               OR b.author ILIKE $1
               OR b.description ILIKE $1
               OR c.name ILIKE $1
            ORDER BY b.name"#,
            SELECT_WITH_CATEGORY
        ))
        .bind(like_pattern(text))
        .fetch_all(self.store.pool())
        .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }
}
