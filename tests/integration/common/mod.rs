//! In-memory repositories and request helpers for router-level tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use bookstore_server::{
    api,
    config::AppConfig,
    error::{AppError, AppResult},
    models::{
        book::Book,
        category::Category,
        user::{NewUser, User},
    },
    repository::{
        BookRepository, CategoryRepository, Filter, Repositories, Repository, UserRepository,
    },
    services::Services,
    AppState,
};

#[derive(Default)]
struct Tables {
    next_id: i32,
    books: Vec<Book>,
    categories: Vec<Category>,
    users: Vec<User>,
    roles: Vec<String>,
    user_roles: Vec<(i32, String)>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn with_category(&self, book: &Book) -> Book {
        let mut book = book.clone();
        book.category = self
            .categories
            .iter()
            .find(|c| c.id == book.category_id)
            .cloned();
        book
    }
}

/// Shared in-memory tables behind every repository double
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn with_roles(roles: &[&str]) -> Self {
        let store = Self::default();
        store.tables.lock().unwrap().roles = roles.iter().map(|r| r.to_string()).collect();
        store
    }
}

pub struct MemoryBooks(pub MemoryStore);
pub struct MemoryCategories(pub MemoryStore);
pub struct MemoryUsers(pub MemoryStore);

#[async_trait]
impl Repository<Book> for MemoryBooks {
    async fn add(&self, entity: &Book) -> AppResult<Book> {
        let mut tables = self.0.tables.lock().unwrap();
        if !tables.categories.iter().any(|c| c.id == entity.category_id) {
            return Err(AppError::BadRequest("Category does not exist".to_string()));
        }
        let mut book = entity.clone();
        book.id = tables.next_id();
        book.category = None;
        tables.books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, entity: &Book) -> AppResult<u64> {
        let mut tables = self.0.tables.lock().unwrap();
        match tables.books.iter_mut().find(|b| b.id == entity.id) {
            Some(book) => {
                *book = entity.clone();
                book.category = None;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn remove(&self, entity: &Book) -> AppResult<u64> {
        let mut tables = self.0.tables.lock().unwrap();
        let before = tables.books.len();
        tables.books.retain(|b| b.id != entity.id);
        Ok((before - tables.books.len()) as u64)
    }

    async fn get_all(&self) -> AppResult<Vec<Book>> {
        let tables = self.0.tables.lock().unwrap();
        let mut books: Vec<Book> = tables.books.iter().map(|b| tables.with_category(b)).collect();
        books.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(books)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let tables = self.0.tables.lock().unwrap();
        Ok(tables
            .books
            .iter()
            .find(|b| b.id == id)
            .map(|b| tables.with_category(b)))
    }

    async fn search(&self, filter: &Filter) -> AppResult<Vec<Book>> {
        let tables = self.0.tables.lock().unwrap();
        let mut books: Vec<Book> = tables
            .books
            .iter()
            .filter(|b| filter.matches(*b))
            .cloned()
            .collect();
        books.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(books)
    }
}

#[async_trait]
impl BookRepository for MemoryBooks {
    async fn get_books_by_category(&self, category_id: i32) -> AppResult<Vec<Book>> {
        self.search(&Filter::new().eq("category_id", category_id)).await
    }

    async fn search_book_with_category(&self, text: &str) -> AppResult<Vec<Book>> {
        let needle = text.to_lowercase();
        let tables = self.0.tables.lock().unwrap();
        let mut books: Vec<Book> = tables
            .books
            .iter()
            .map(|b| tables.with_category(b))
            .filter(|b| {
                let category_name = b.category.as_ref().map(|c| c.name.as_str()).unwrap_or("");
                [b.name.as_str(), b.author.as_str(), b.description.as_str(), category_name]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect();
        books.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(books)
    }
}

#[async_trait]
impl Repository<Category> for MemoryCategories {
    async fn add(&self, entity: &Category) -> AppResult<Category> {
        let mut tables = self.0.tables.lock().unwrap();
        let category = Category {
            id: tables.next_id(),
            name: entity.name.clone(),
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, entity: &Category) -> AppResult<u64> {
        let mut tables = self.0.tables.lock().unwrap();
        match tables.categories.iter_mut().find(|c| c.id == entity.id) {
            Some(category) => {
                *category = entity.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn remove(&self, entity: &Category) -> AppResult<u64> {
        let mut tables = self.0.tables.lock().unwrap();
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != entity.id);
        Ok((before - tables.categories.len()) as u64)
    }

    async fn get_all(&self) -> AppResult<Vec<Category>> {
        let mut categories = self.0.tables.lock().unwrap().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        let tables = self.0.tables.lock().unwrap();
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn search(&self, filter: &Filter) -> AppResult<Vec<Category>> {
        let tables = self.0.tables.lock().unwrap();
        let mut categories: Vec<Category> = tables
            .categories
            .iter()
            .filter(|c| filter.matches(*c))
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

impl CategoryRepository for MemoryCategories {}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_name(&self, user_name: &str) -> AppResult<Option<User>> {
        let tables = self.0.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|u| u.user_name.eq_ignore_ascii_case(user_name))
            .cloned())
    }

    async fn user_name_exists(&self, user_name: &str) -> AppResult<bool> {
        Ok(self.find_by_name(user_name).await?.is_some())
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let tables = self.0.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .any(|u| u.email.as_deref().is_some_and(|e| e.eq_ignore_ascii_case(email))))
    }

    async fn role_exists(&self, role: &str) -> AppResult<bool> {
        let tables = self.0.tables.lock().unwrap();
        Ok(tables.roles.iter().any(|r| r.eq_ignore_ascii_case(role)))
    }

    async fn create(&self, user: &NewUser, roles: &[String]) -> AppResult<User> {
        let mut tables = self.0.tables.lock().unwrap();
        let created = User {
            id: tables.next_id(),
            user_name: user.user_name.clone(),
            password_hash: user.password_hash.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        };
        tables.users.push(created.clone());
        for role in roles {
            let canonical = tables
                .roles
                .iter()
                .find(|r| r.eq_ignore_ascii_case(role))
                .cloned()
                .unwrap_or_else(|| role.clone());
            let assignment = (created.id, canonical);
            if !tables.user_roles.contains(&assignment) {
                tables.user_roles.push(assignment);
            }
        }
        Ok(created)
    }

    async fn roles_of(&self, user_id: i32) -> AppResult<Vec<String>> {
        let tables = self.0.tables.lock().unwrap();
        let mut roles: Vec<String> = tables
            .user_roles
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, role)| role.clone())
            .collect();
        roles.sort();
        Ok(roles)
    }
}

/// Router over fresh in-memory repositories, plus its state
pub fn app() -> (Router, AppState) {
    let store = MemoryStore::with_roles(&["User", "Administrator"]);
    let repositories = Repositories::from_parts(
        Arc::new(MemoryBooks(store.clone())),
        Arc::new(MemoryCategories(store.clone())),
        Arc::new(MemoryUsers(store)),
    );

    let config = AppConfig::default();
    let services = Services::new(repositories, config.auth.clone());
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    (api::router(state.clone()), state)
}

/// Send one request and return the status with the JSON body (`Null` if empty)
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method(method)
        .uri(format!("/api/v1{}", uri));
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Register a user with the given roles and return a bearer token for it
pub async fn token_for(app: &Router, user_name: &str, roles: &[&str]) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/authentication/register",
        None,
        Some(serde_json::json!({
            "user_name": user_name,
            "password": "Passw0rdX",
            "email": format!("{}@example.org", user_name),
            "roles": roles,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        Method::POST,
        "/authentication/auth",
        None,
        Some(serde_json::json!({ "user_name": user_name, "password": "Passw0rdX" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}
