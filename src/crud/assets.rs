//! Asset data access.

use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::{Asset, AssetCreate, AssetUpdate, Instrument};

/// Insert an open position. The currency is copied from the instrument at
/// creation time and never follows later instrument updates.
pub async fn create_asset(
    pool: &PgPool,
    portfolio_id: i64,
    instrument: &Instrument,
    asset_create: &AssetCreate,
) -> Result<Asset, ApiError> {
    let asset = sqlx::query_as::<_, Asset>(
        "INSERT INTO assets (portfolio_id, instrument_id, buy_date, buy_price, volume, currency) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(portfolio_id)
    .bind(instrument.id)
    .bind(asset_create.buy_date)
    .bind(asset_create.buy_price)
    .bind(asset_create.volume)
    .bind(&instrument.currency)
    .fetch_one(pool)
    .await?;
    tracing::debug!(asset_id = asset.id, portfolio_id, "created asset");
    Ok(asset)
}

pub async fn list_assets_by_portfolio(
    pool: &PgPool,
    portfolio_id: i64,
) -> Result<Vec<Asset>, ApiError> {
    let assets =
        sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE portfolio_id = $1 ORDER BY id")
            .bind(portfolio_id)
            .fetch_all(pool)
            .await?;
    Ok(assets)
}

pub async fn get_asset_by_id(pool: &PgPool, asset_id: i64) -> Result<Option<Asset>, ApiError> {
    let asset = sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1")
        .bind(asset_id)
        .fetch_optional(pool)
        .await?;
    Ok(asset)
}

/// Patch an asset: absent fields keep their stored value.
pub async fn update_asset(
    pool: &PgPool,
    asset_id: i64,
    update: &AssetUpdate,
) -> Result<Asset, ApiError> {
    let asset = sqlx::query_as::<_, Asset>(
        "UPDATE assets SET \
            buy_price = COALESCE($2::double precision, buy_price), \
            volume = COALESCE($3::double precision, volume) \
         WHERE id = $1 RETURNING *",
    )
    .bind(asset_id)
    .bind(update.buy_price)
    .bind(update.volume)
    .fetch_one(pool)
    .await?;
    Ok(asset)
}

/// Remove all assets in a portfolio, returning the deleted rows.
pub async fn delete_assets_by_portfolio(
    pool: &PgPool,
    portfolio_id: i64,
) -> Result<Vec<Asset>, ApiError> {
    let assets =
        sqlx::query_as::<_, Asset>("DELETE FROM assets WHERE portfolio_id = $1 RETURNING *")
            .bind(portfolio_id)
            .fetch_all(pool)
            .await?;
    tracing::debug!(portfolio_id, count = assets.len(), "deleted assets");
    Ok(assets)
}

/// Remove one asset row. Callers already hold a valid record.
pub async fn delete_asset(pool: &PgPool, id: i64) -> Result<(), ApiError> {
    sqlx::query("DELETE FROM assets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
