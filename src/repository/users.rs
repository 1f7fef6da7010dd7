//! Users repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::UserRepository;
use crate::{
    error::AppResult,
    models::user::{NewUser, User},
};

#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_name(&self, user_name: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(user_name) = LOWER($1)",
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn user_name_exists(&self, user_name: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(user_name) = LOWER($1))",
        )
        .bind(user_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn role_exists(&self, role: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM roles WHERE LOWER(name) = LOWER($1))",
        )
        .bind(role)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn create(&self, user: &NewUser, roles: &[String]) -> AppResult<User> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_name, password_hash, email, phone_number, first_name, last_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&user.user_name)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&mut *tx)
        .await?;

        for role in roles {
            sqlx::query(
                r#"
                INSERT INTO user_roles (user_id, role_id)
                SELECT $1, id FROM roles WHERE LOWER(name) = LOWER($2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(created.id)
            .bind(role)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn roles_of(&self, user_id: i32) -> AppResult<Vec<String>> {
        let roles: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT r.name FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }
}
