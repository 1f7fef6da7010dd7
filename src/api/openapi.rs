//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authentication, books, categories, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookstore API",
        version = "1.0.0",
        description = "Book and category catalog REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Authentication
        authentication::register,
        authentication::authenticate,
        // Books
        books::list_books,
        books::get_book,
        books::get_books_by_category,
        books::search_books,
        books::search_books_with_category,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::search_categories,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
    ),
    components(
        schemas(
            // Authentication
            crate::models::user::RegisterUser,
            crate::models::user::AuthenticateUser,
            crate::models::user::UserInfo,
            crate::models::user::TokenResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Categories
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "authentication", description = "Registration and token issuance"),
        (name = "books", description = "Book catalog"),
        (name = "categories", description = "Book categories")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
