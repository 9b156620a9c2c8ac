//! User endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::require_user;
use crate::crud;
use crate::error::ApiError;
use crate::models::{UserCreate, UserPublic, UserUpdate};
use crate::response::Collection;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    pub username: Option<String>,
    pub email: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UserListQuery>,
) -> Result<Json<Collection<UserPublic>>, ApiError> {
    let users = crud::users::list_users(
        &state.pool,
        params.username.as_deref(),
        params.email.as_deref(),
        params.skip.unwrap_or(0).max(0),
        params.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(0),
    )
    .await?;
    let data: Vec<UserPublic> = users.into_iter().map(UserPublic::from).collect();
    Ok(Json(data.into()))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(user_in): Json<UserCreate>,
) -> Result<Json<UserPublic>, ApiError> {
    user_in.validate()?;
    if crud::users::get_user_by_email(&state.pool, &user_in.email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "The user with this email already exists in the system.".into(),
        ));
    }
    if crud::users::get_user_by_username(&state.pool, &user_in.username)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "The user with this username already exists in the system.".into(),
        ));
    }
    let user = crud::users::create_user(&state.pool, &user_in).await?;
    Ok(Json(user.into()))
}

#[derive(Debug, Default, Deserialize)]
pub struct UserLookupQuery {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Single-user lookup by username and/or email. When both are given the email
/// wins the lookup and the username must agree with the stored record.
pub async fn lookup_user(
    State(state): State<AppState>,
    Query(params): Query<UserLookupQuery>,
) -> Result<Json<UserPublic>, ApiError> {
    let user = match (&params.email, &params.username) {
        (None, None) => {
            return Err(ApiError::Validation(
                "No username or email address provided to get user.".into(),
            ));
        }
        (Some(email), username) => {
            let user = crud::users::get_user_by_email(&state.pool, email)
                .await?
                .ok_or_else(|| ApiError::NotFound("No user exists with these details.".into()))?;
            if let Some(username) = username {
                if &user.username != username {
                    return Err(ApiError::Validation(
                        "Username provided doesn't match username for email provided.".into(),
                    ));
                }
            }
            user
        }
        (None, Some(username)) => crud::users::get_user_by_username(&state.pool, username)
            .await?
            .ok_or_else(|| ApiError::NotFound("No user exists with these details.".into()))?,
    };
    Ok(Json(user.into()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserPublic>, ApiError> {
    let user = require_user(&state.pool, user_id).await?;
    Ok(Json(user.into()))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<UserPublic>, ApiError> {
    let mut user = require_user(&state.pool, user_id).await?;
    update.validate()?;
    if let Some(username) = &update.username {
        if let Some(existing) = crud::users::get_user_by_username(&state.pool, username).await? {
            if existing.id != user.id {
                return Err(ApiError::Conflict(
                    "The user with this username already exists in the system.".into(),
                ));
            }
        }
        user = crud::users::change_username(&state.pool, user.id, username).await?;
    }
    if let Some(password) = &update.password {
        user = crud::users::change_password(&state.pool, user.id, password).await?;
    }
    Ok(Json(user.into()))
}

/// Delete a user and everything it owns. The cascade is explicit here: orders,
/// then the portfolio with its trades and assets, then the summary, then the
/// user row itself.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserPublic>, ApiError> {
    let user = require_user(&state.pool, user_id).await?;
    crud::orders::delete_orders_by_user(&state.pool, user_id).await?;
    if let Some(portfolio) = crud::portfolios::get_portfolio_by_user(&state.pool, user_id).await? {
        crud::trades::delete_trades_by_portfolio(&state.pool, portfolio.id).await?;
        crud::assets::delete_assets_by_portfolio(&state.pool, portfolio.id).await?;
        crud::portfolios::delete_portfolio(&state.pool, portfolio.id).await?;
    }
    crud::summaries::delete_summary_by_user(&state.pool, user_id).await?;
    crud::users::delete_user(&state.pool, user_id).await?;
    Ok(Json(user.into()))
}
