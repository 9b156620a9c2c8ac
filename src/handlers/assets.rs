//! Asset endpoints, nested under `/users/{user_id}/portfolio/assets`.

use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::PgPool;

use super::require_user;
use crate::crud;
use crate::error::ApiError;
use crate::models::{Asset, AssetCreate, AssetUpdate, Portfolio};
use crate::response::Collection;
use crate::state::AppState;

/// Assets live under a portfolio; a user without one cannot hold positions.
pub(crate) async fn require_portfolio(pool: &PgPool, user_id: i64) -> Result<Portfolio, ApiError> {
    crud::portfolios::get_portfolio_by_user(pool, user_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(
                "User does not have a portfolio, please create a portfolio first.".into(),
            )
        })
}

pub async fn list_assets(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Collection<Asset>>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let portfolio = require_portfolio(&state.pool, user_id).await?;
    let assets = crud::assets::list_assets_by_portfolio(&state.pool, portfolio.id).await?;
    Ok(Json(assets.into()))
}

pub async fn create_asset(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(asset_in): Json<AssetCreate>,
) -> Result<Json<Asset>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let portfolio = require_portfolio(&state.pool, user_id).await?;
    let instrument = crud::instruments::get_instrument_by_id(&state.pool, asset_in.instrument_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invalid instrument id entered.".into()))?;
    let asset = crud::assets::create_asset(&state.pool, portfolio.id, &instrument, &asset_in).await?;
    Ok(Json(asset))
}

/// Delete every asset in the user's portfolio, returning the removed rows.
pub async fn delete_assets(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Collection<Asset>>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let portfolio = require_portfolio(&state.pool, user_id).await?;
    let assets = crud::assets::delete_assets_by_portfolio(&state.pool, portfolio.id).await?;
    Ok(Json(assets.into()))
}

pub async fn get_asset(
    State(state): State<AppState>,
    Path((user_id, asset_id)): Path<(i64, i64)>,
) -> Result<Json<Asset>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let portfolio = require_portfolio(&state.pool, user_id).await?;
    let asset = find_asset_in_portfolio(&state, &portfolio, asset_id).await?;
    Ok(Json(asset))
}

pub async fn update_asset(
    State(state): State<AppState>,
    Path((user_id, asset_id)): Path<(i64, i64)>,
    Json(update): Json<AssetUpdate>,
) -> Result<Json<Asset>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let portfolio = require_portfolio(&state.pool, user_id).await?;
    let asset = find_asset_in_portfolio(&state, &portfolio, asset_id).await?;
    update.validate()?;
    let asset = crud::assets::update_asset(&state.pool, asset.id, &update).await?;
    Ok(Json(asset))
}

async fn find_asset_in_portfolio(
    state: &AppState,
    portfolio: &Portfolio,
    asset_id: i64,
) -> Result<Asset, ApiError> {
    crud::assets::get_asset_by_id(&state.pool, asset_id)
        .await?
        .filter(|asset| asset.portfolio_id == portfolio.id)
        .ok_or_else(|| ApiError::NotFound("No asset found with this id in the portfolio.".into()))
}
