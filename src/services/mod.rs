//! Business logic services

pub mod auth;
pub mod books;
pub mod categories;

use crate::{config::AuthConfig, error::AppResult, repository::Repositories};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub books: books::BookService,
    pub categories: categories::CategoryService,
    repositories: Repositories,
}

impl Services {
    /// Create all services with the given repositories
    pub fn new(repositories: Repositories, auth_config: AuthConfig) -> Self {
        let books = books::BookService::new(repositories.books.clone());
        Self {
            auth: auth::AuthService::new(repositories.users.clone(), auth_config),
            categories: categories::CategoryService::new(repositories.categories.clone(), books.clone()),
            books,
            repositories,
        }
    }

    /// Check that the backing store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.repositories.ping().await
    }
}
