//! Authentication manager: registration, credential checks and bearer tokens

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult, FieldErrors},
    models::user::{NewUser, RegisterUser, TokenClaims, User},
    repository::UserRepository,
};

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Register a user with the requested roles.
    ///
    /// Every role must already exist; password policy and identity
    /// uniqueness failures are reported per field.
    pub async fn register(&self, request: RegisterUser) -> AppResult<User> {
        for role in &request.roles {
            if !self.users.role_exists(role).await? {
                return Err(AppError::NotFound(format!("Role '{}' not found", role)));
            }
        }

        let mut errors = password_policy_errors(&request.password);
        if self.users.user_name_exists(&request.user_name).await? {
            errors.insert(
                "DuplicateUserName".to_string(),
                vec![format!("User name '{}' is already taken.", request.user_name)],
            );
        }
        if self.users.email_exists(&request.email).await? {
            errors.insert(
                "DuplicateEmail".to_string(),
                vec![format!("Email '{}' is already taken.", request.email)],
            );
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let user = NewUser {
            user_name: request.user_name,
            password_hash: self.hash_password(&request.password)?,
            email: Some(request.email),
            phone_number: request.phone_number,
            first_name: request.first_name,
            last_name: request.last_name,
        };

        let created = self.users.create(&user, &request.roles).await?;
        tracing::info!("User registered: id={} user_name='{}'", created.id, created.user_name);
        Ok(created)
    }

    /// The user matching these credentials, if any
    pub async fn validate_user(&self, user_name: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = self.users.find_by_name(user_name).await? else {
            return Ok(None);
        };

        if self.verify_password(&user, password)? {
            Ok(Some(user))
        } else {
            tracing::info!("Failed authentication for user '{}'", user_name);
            Ok(None)
        }
    }

    /// Role names assigned to the user, as stored
    pub async fn roles_of(&self, user: &User) -> AppResult<Vec<String>> {
        self.users.roles_of(user.id).await
    }

    /// Sign a token carrying the user name and every assigned role
    pub async fn create_token(&self, user: &User) -> AppResult<String> {
        let roles = self.roles_of(user).await?;

        let now = Utc::now();
        let exp = now + Duration::days(i64::from(self.config.expire_days));

        let claims = TokenClaims {
            sub: user.user_name.clone(),
            roles,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Check signature, expiry, issuer and audience of a bearer token
    pub fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);

        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AppError::Authentication(e.to_string()))?;
        Ok(data.claims)
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}

/// At least 8 characters with a digit, a lowercase and an uppercase letter
fn password_policy_errors(password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let mut fail = |code: &str, message: &str| {
        errors.insert(code.to_string(), vec![message.to_string()]);
    };

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        fail(
            "PasswordTooShort",
            "Passwords must be at least 8 characters.",
        );
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        fail(
            "PasswordRequiresDigit",
            "Passwords must have at least one digit ('0'-'9').",
        );
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        fail(
            "PasswordRequiresLower",
            "Passwords must have at least one lowercase ('a'-'z').",
        );
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        fail(
            "PasswordRequiresUpper",
            "Passwords must have at least one uppercase ('A'-'Z').",
        );
    }
    errors
}
