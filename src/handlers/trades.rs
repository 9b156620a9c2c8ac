//! Trade endpoints, nested under `/users/{user_id}/portfolio/trades`.

use axum::{
    extract::{Path, State},
    Json,
};

use super::assets::require_portfolio;
use super::require_user;
use crate::crud;
use crate::error::ApiError;
use crate::models::{Trade, TradeCreate};
use crate::response::Collection;
use crate::state::AppState;

pub async fn list_trades(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Collection<Trade>>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let portfolio = require_portfolio(&state.pool, user_id).await?;
    let trades = crud::trades::list_trades_by_portfolio(&state.pool, portfolio.id).await?;
    Ok(Json(trades.into()))
}

/// Close an asset into a trade: the asset supplies the instrument/portfolio
/// linkage and buy side, the payload supplies the sale.
pub async fn create_trade(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(trade_in): Json<TradeCreate>,
) -> Result<Json<Trade>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let portfolio = require_portfolio(&state.pool, user_id).await?;
    let asset = crud::assets::get_asset_by_id(&state.pool, trade_in.asset_id)
        .await?
        .filter(|asset| asset.portfolio_id == portfolio.id)
        .ok_or_else(|| ApiError::NotFound("No asset with asset id.".into()))?;
    let trade =
        crud::trades::create_trade(&state.pool, &asset, trade_in.sell_date, trade_in.sell_price)
            .await?;
    Ok(Json(trade))
}
