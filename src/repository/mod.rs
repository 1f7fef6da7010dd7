//! Repository layer for database operations

pub mod books;
pub mod categories;
pub mod entity;
pub mod filter;
#[cfg(test)]
pub mod mock;
pub mod store;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{book::Book, category::Category, user::{NewUser, User}},
};

pub use entity::{Entity, Value};
pub use filter::{Filter, Operator};
pub use store::PgStore;

/// Basic persistence operations for one entity type.
///
/// Mutations commit before returning and report the number of rows the
/// commit affected.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert and return the stored record with its assigned id
    async fn add(&self, entity: &T) -> AppResult<T>;
    async fn update(&self, entity: &T) -> AppResult<u64>;
    async fn remove(&self, entity: &T) -> AppResult<u64>;
    async fn get_all(&self) -> AppResult<Vec<T>>;
    async fn get_by_id(&self, id: i32) -> AppResult<Option<T>>;
    async fn search(&self, filter: &Filter) -> AppResult<Vec<T>>;
}

/// Book persistence with category-aware queries.
///
/// `get_all` and `get_by_id` return books with their category loaded.
#[async_trait]
pub trait BookRepository: Repository<Book> {
    async fn get_books_by_category(&self, category_id: i32) -> AppResult<Vec<Book>>;

    /// Books whose name, author, description or category name contain `text`
    /// (case-insensitive)
    async fn search_book_with_category(&self, text: &str) -> AppResult<Vec<Book>>;
}

pub trait CategoryRepository: Repository<Category> {}

/// Identity store: users, roles and their assignments
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Case-insensitive lookup by user name
    async fn find_by_name(&self, user_name: &str) -> AppResult<Option<User>>;
    async fn user_name_exists(&self, user_name: &str) -> AppResult<bool>;
    async fn email_exists(&self, email: &str) -> AppResult<bool>;
    async fn role_exists(&self, role: &str) -> AppResult<bool>;
    /// Insert the user and assign the given roles in one transaction
    async fn create(&self, user: &NewUser, roles: &[String]) -> AppResult<User>;
    async fn roles_of(&self, user_id: i32) -> AppResult<Vec<String>>;
}

/// All repositories used by the services
#[derive(Clone)]
pub struct Repositories {
    pub books: Arc<dyn BookRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub users: Arc<dyn UserRepository>,
    pool: Option<Pool<Postgres>>,
}

impl Repositories {
    /// Create the PostgreSQL-backed repositories on the given pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::PgBookRepository::new(pool.clone())),
            categories: Arc::new(PgStore::<Category>::new(pool.clone())),
            users: Arc::new(users::PgUserRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Assemble from arbitrary implementations (no database to ping)
    pub fn from_parts(
        books: Arc<dyn BookRepository>,
        categories: Arc<dyn CategoryRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            books,
            categories,
            users,
            pool: None,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}
