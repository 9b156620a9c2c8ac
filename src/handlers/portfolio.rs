//! Portfolio endpoints, nested under `/users/{user_id}/portfolio`.

use axum::{
    extract::{Path, State},
    Json,
};

use super::require_user;
use crate::crud;
use crate::error::ApiError;
use crate::models::Portfolio;
use crate::state::AppState;

pub async fn get_portfolio(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Portfolio>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let portfolio = crud::portfolios::get_portfolio_by_user(&state.pool, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No portfolio associated with the user.".into()))?;
    Ok(Json(portfolio))
}

pub async fn create_portfolio(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Portfolio>, ApiError> {
    require_user(&state.pool, user_id).await?;
    if crud::portfolios::get_portfolio_by_user(&state.pool, user_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("User already has a portfolio.".into()));
    }
    let portfolio = crud::portfolios::create_portfolio(&state.pool, user_id).await?;
    Ok(Json(portfolio))
}

/// Delete the user's portfolio together with its trades and assets, returning
/// the removed portfolio.
pub async fn delete_portfolio(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Portfolio>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let portfolio = crud::portfolios::get_portfolio_by_user(&state.pool, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No portfolio associated with the user.".into()))?;
    crud::trades::delete_trades_by_portfolio(&state.pool, portfolio.id).await?;
    crud::assets::delete_assets_by_portfolio(&state.pool, portfolio.id).await?;
    crud::portfolios::delete_portfolio(&state.pool, portfolio.id).await?;
    Ok(Json(portfolio))
}
