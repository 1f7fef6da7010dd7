//! Category service

use std::sync::Arc;

use super::books::BookService;
use crate::{
    error::{AppError, AppResult},
    models::category::Category,
    repository::{CategoryRepository, Filter},
};

/// Category rules. Dependent books are looked up through [`BookService`],
/// never through book storage.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    books: BookService,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, books: BookService) -> Self {
        Self { categories, books }
    }

    pub async fn add(&self, category: Category) -> AppResult<Category> {
        let same_name = self
            .categories
            .search(&Filter::new().eq("name", category.name.as_str()))
            .await?;
        if !same_name.is_empty() {
            tracing::info!("Rejected category add: name '{}' already exists", category.name);
            return Err(AppError::Duplicate(format!(
                "A category named '{}' already exists",
                category.name
            )));
        }

        let created = self.categories.add(&category).await?;
        tracing::info!("Category created: id={} name='{}'", created.id, created.name);
        Ok(created)
    }

    pub async fn update(&self, category: Category) -> AppResult<Category> {
        let same_name = self
            .categories
            .search(
                &Filter::new()
                    .eq("name", category.name.as_str())
                    .ne("id", category.id),
            )
            .await?;
        if !same_name.is_empty() {
            return Err(AppError::Duplicate(format!(
                "A category named '{}' already exists",
                category.name
            )));
        }

        if self.categories.update(&category).await? == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", category.id)));
        }
        Ok(category)
    }

    /// Remove a category that no book references
    pub async fn remove(&self, category: &Category) -> AppResult<()> {
        let dependents = self.books.get_books_by_category(category.id).await?;
        if !dependents.is_empty() {
            tracing::warn!(
                "Rejected category removal id={}: {} book(s) still reference it",
                category.id,
                dependents.len()
            );
            return Err(AppError::BusinessRule(format!(
                "Category '{}' still has {} book(s)",
                category.name,
                dependents.len()
            )));
        }

        self.categories.remove(category).await?;
        tracing::info!("Category removed: id={}", category.id);
        Ok(())
    }

    pub async fn get_all(&self) -> AppResult<Vec<Category>> {
        self.categories.get_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        self.categories.get_by_id(id).await
    }

    /// Case-insensitive substring search on the category name
    pub async fn search(&self, name: &str) -> AppResult<Vec<Category>> {
        self.categories.search(&Filter::new().contains("name", name)).await
    }
}
