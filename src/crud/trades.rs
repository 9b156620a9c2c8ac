//! Trade data access.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::{Asset, Trade};

/// Close a position: record a trade carrying the asset's linkage plus the sale.
/// The originating asset is left in place; removing it is the caller's explicit
/// follow-up.
pub async fn create_trade(
    pool: &PgPool,
    asset: &Asset,
    sell_date: NaiveDate,
    sell_price: f64,
) -> Result<Trade, ApiError> {
    let trade = sqlx::query_as::<_, Trade>(
        "INSERT INTO trades \
            (portfolio_id, instrument_id, buy_date, buy_price, sell_date, sell_price, volume, currency) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(asset.portfolio_id)
    .bind(asset.instrument_id)
    .bind(asset.buy_date)
    .bind(asset.buy_price)
    .bind(sell_date)
    .bind(sell_price)
    .bind(asset.volume)
    .bind(&asset.currency)
    .fetch_one(pool)
    .await?;
    tracing::debug!(trade_id = trade.id, asset_id = asset.id, "created trade");
    Ok(trade)
}

pub async fn list_trades_by_portfolio(
    pool: &PgPool,
    portfolio_id: i64,
) -> Result<Vec<Trade>, ApiError> {
    let trades =
        sqlx::query_as::<_, Trade>("SELECT * FROM trades WHERE portfolio_id = $1 ORDER BY id")
            .bind(portfolio_id)
            .fetch_all(pool)
            .await?;
    Ok(trades)
}

/// Remove all trades in a portfolio. Used by the portfolio/user delete flows.
pub async fn delete_trades_by_portfolio(
    pool: &PgPool,
    portfolio_id: i64,
) -> Result<(), ApiError> {
    sqlx::query("DELETE FROM trades WHERE portfolio_id = $1")
        .bind(portfolio_id)
        .execute(pool)
        .await?;
    Ok(())
}
