//! User data access.

use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::{User, UserCreate};
use crate::security::{hash_password, verify_password};

/// Insert a new user, hashing the supplied password for storage.
pub async fn create_user(pool: &PgPool, user_create: &UserCreate) -> Result<User, ApiError> {
    let hashed = hash_password(&user_create.password)?;
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, hashed_password) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&user_create.username)
    .bind(&user_create.email)
    .bind(&hashed)
    .fetch_one(pool)
    .await?;
    tracing::debug!(user_id = user.id, "created user");
    Ok(user)
}

pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn get_user_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn get_user_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// List users with optional exact-match filters, AND-combined, paginated.
pub async fn list_users(
    pool: &PgPool,
    username: Option<&str>,
    email: Option<&str>,
    skip: i64,
    limit: i64,
) -> Result<Vec<User>, ApiError> {
    let users = sqlx::query_as::<_, User>(
        "SELECT * FROM users \
         WHERE ($1::text IS NULL OR username = $1) \
           AND ($2::text IS NULL OR email = $2) \
         ORDER BY id \
         OFFSET $3 LIMIT $4",
    )
    .bind(username)
    .bind(email)
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(users)
}

/// Verify a password against the user found by email (preferred) or username.
pub async fn authenticate(
    pool: &PgPool,
    email: Option<&str>,
    username: Option<&str>,
    password: &str,
) -> Result<Option<User>, ApiError> {
    let user = match (email, username) {
        (Some(email), _) => get_user_by_email(pool, email).await?,
        (None, Some(username)) => get_user_by_username(pool, username).await?,
        (None, None) => None,
    };
    Ok(user.filter(|u| verify_password(password, &u.hashed_password)))
}

pub async fn change_username(pool: &PgPool, id: i64, username: &str) -> Result<User, ApiError> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET username = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(username)
    .fetch_one(pool)
    .await?;
    Ok(user)
}

pub async fn change_password(pool: &PgPool, id: i64, password: &str) -> Result<User, ApiError> {
    let hashed = hash_password(password)?;
    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET hashed_password = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&hashed)
    .fetch_one(pool)
    .await?;
    Ok(user)
}

/// Remove one user row. Callers already hold a valid record.
pub async fn delete_user(pool: &PgPool, id: i64) -> Result<(), ApiError> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    tracing::debug!(user_id = id, "deleted user");
    Ok(())
}
