//! mockall doubles for the entity repositories

use async_trait::async_trait;
use mockall::mock;

use super::{BookRepository, CategoryRepository, Filter, Repository};
use crate::{
    error::AppResult,
    models::{book::Book, category::Category},
};

mock! {
    pub Books {}

    #[async_trait]
    impl Repository<Book> for Books {
        async fn add(&self, entity: &Book) -> AppResult<Book>;
        async fn update(&self, entity: &Book) -> AppResult<u64>;
        async fn remove(&self, entity: &Book) -> AppResult<u64>;
        async fn get_all(&self) -> AppResult<Vec<Book>>;
        async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;
        async fn search(&self, filter: &Filter) -> AppResult<Vec<Book>>;
    }

    #[async_trait]
    impl BookRepository for Books {
        async fn get_books_by_category(&self, category_id: i32) -> AppResult<Vec<Book>>;
        async fn search_book_with_category(&self, text: &str) -> AppResult<Vec<Book>>;
    }
}

mock! {
    pub Categories {}

    #[async_trait]
    impl Repository<Category> for Categories {
        async fn add(&self, entity: &Category) -> AppResult<Category>;
        async fn update(&self, entity: &Category) -> AppResult<u64>;
        async fn remove(&self, entity: &Category) -> AppResult<u64>;
        async fn get_all(&self) -> AppResult<Vec<Category>>;
        async fn get_by_id(&self, id: i32) -> AppResult<Option<Category>>;
        async fn search(&self, filter: &Filter) -> AppResult<Vec<Category>>;
    }

    impl CategoryRepository for Categories {}
}
