use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// User model - SQL persistence layer
///
/// Accounts are immutable after registration except for the verified flag,
/// and are never deleted.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String, // 'donor', 'ngo', 'admin'
    pub organization: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub organization: Option<String>,
    pub verified: bool,
}

impl User {
    /// Find user by email (case-insensitive)
    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE lower(email) = lower($1)")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Check if an email is already registered (case-insensitive)
    pub async fn email_exists(email: &str, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE lower(email) = lower($1))",
        )
        .bind(email)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert a new account
    pub async fn create(new_user: NewUser, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO users (name, email, password_hash, role, organization, verified)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.role)
        .bind(&new_user.organization)
        .bind(new_user.verified)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
