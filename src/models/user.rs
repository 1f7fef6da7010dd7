//! User model, registration/authentication requests and token claims

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Full user model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub user_name: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// User ready to be persisted, password already hashed
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub user_name: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(length(min = 1, max = 256, message = "User name must be between 1 and 256 characters"))]
    pub user_name: String,
    #[validate(length(min = 1, message = "The field password is required"))]
    pub password: String,
    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: Option<String>,
    #[validate(
        email(message = "Email is invalid"),
        length(max = 256, message = "Email must be at most 256 characters")
    )]
    pub email: String,
    #[validate(length(max = 64, message = "Phone number must be at most 64 characters"))]
    pub phone_number: Option<String>,
    /// Names of existing roles to assign
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Authentication request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AuthenticateUser {
    #[validate(length(min = 1, message = "The field user_name is required"))]
    pub user_name: String,
    #[validate(length(min = 1, message = "The field password is required"))]
    pub password: String,
}

/// Registered user as returned to the client
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserInfo {
    pub id: i32,
    pub user_name: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub roles: Vec<String>,
}

impl UserInfo {
    pub fn new(user: User, roles: Vec<String>) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            roles,
        }
    }
}

/// Issued bearer token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User name
    pub sub: String,
    /// Assigned role names
    #[serde(rename = "role", default)]
    pub roles: Vec<String>,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}
