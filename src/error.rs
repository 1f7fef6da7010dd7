//! Error types for the bookstore server

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Field name to the list of messages attached to it
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Stable error codes exposed in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchData = 4,
    Duplicate = 5,
    BadValue = 6,
    HasDependents = 7,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0:?}")]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("The field {} is invalid ({})", field, e.code),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        AppError::Validation(fields)
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut fields = None;
        let (status, code, message) = match self {
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg),
            AppError::Validation(errors) => {
                fields = Some(errors);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::BadValue,
                    "One or more validation errors occurred".to_string(),
                )
            }
            AppError::Database(e) => database_error_parts(&e),
            AppError::Duplicate(msg) => (StatusCode::BAD_REQUEST, ErrorCode::Duplicate, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::BusinessRule(msg) => (StatusCode::BAD_REQUEST, ErrorCode::HasDependents, msg),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
            fields,
        });

        (status, body).into_response()
    }
}

/// Constraint violations are caller mistakes racing past the service pre-checks.
fn database_error_parts(e: &sqlx::Error) -> (StatusCode, ErrorCode, String) {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => {
            tracing::warn!("Unique constraint violated: {}", db.message());
            (
                StatusCode::BAD_REQUEST,
                ErrorCode::Duplicate,
                "A record with the same name already exists".to_string(),
            )
        }
        Some(db) if db.is_foreign_key_violation() => {
            tracing::warn!("Foreign key constraint violated: {}", db.message());
            (
                StatusCode::BAD_REQUEST,
                ErrorCode::BadValue,
                "The referenced record does not exist or is still in use".to_string(),
            )
        }
        _ => {
            tracing::error!("Database error: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DbFailure,
                "Database error".to_string(),
            )
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
