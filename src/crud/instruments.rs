//! Instrument data access.

use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::{Instrument, InstrumentCreate, InstrumentFilter};

pub async fn create_instrument(
    pool: &PgPool,
    instrument_create: &InstrumentCreate,
) -> Result<Instrument, ApiError> {
    let instrument = sqlx::query_as::<_, Instrument>(
        "INSERT INTO instruments (name, exchange, symbol, currency) \
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(&instrument_create.name)
    .bind(&instrument_create.exchange)
    .bind(&instrument_create.symbol)
    .bind(&instrument_create.currency)
    .fetch_one(pool)
    .await?;
    tracing::debug!(instrument_id = instrument.id, symbol = %instrument.symbol, "created instrument");
    Ok(instrument)
}

pub async fn get_instrument_by_symbol(
    pool: &PgPool,
    symbol: &str,
) -> Result<Option<Instrument>, ApiError> {
    let instrument = sqlx::query_as::<_, Instrument>("SELECT * FROM instruments WHERE symbol = $1")
        .bind(symbol)
        .fetch_optional(pool)
        .await?;
    Ok(instrument)
}

pub async fn get_instrument_by_id(pool: &PgPool, id: i64) -> Result<Option<Instrument>, ApiError> {
    let instrument = sqlx::query_as::<_, Instrument>("SELECT * FROM instruments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(instrument)
}

/// List instruments; all supplied filters are exact matches, AND-combined.
pub async fn list_instruments(
    pool: &PgPool,
    filter: &InstrumentFilter,
) -> Result<Vec<Instrument>, ApiError> {
    let instruments = sqlx::query_as::<_, Instrument>(
        "SELECT * FROM instruments \
         WHERE ($1::text IS NULL OR name = $1) \
           AND ($2::text IS NULL OR exchange = $2) \
           AND ($3::text IS NULL OR symbol = $3) \
           AND ($4::text IS NULL OR currency = $4) \
         ORDER BY id",
    )
    .bind(filter.name.as_deref())
    .bind(filter.exchange.as_deref())
    .bind(filter.symbol.as_deref())
    .bind(filter.currency.as_deref())
    .fetch_all(pool)
    .await?;
    Ok(instruments)
}

/// Replace the OHLC quartet in one statement.
pub async fn update_instrument_prices(
    pool: &PgPool,
    id: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
) -> Result<Instrument, ApiError> {
    let instrument = sqlx::query_as::<_, Instrument>(
        "UPDATE instruments SET open = $2, high = $3, low = $4, close = $5 \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(open)
    .bind(high)
    .bind(low)
    .bind(close)
    .fetch_one(pool)
    .await?;
    Ok(instrument)
}

pub async fn update_instrument_currency(
    pool: &PgPool,
    id: i64,
    currency: &str,
) -> Result<Instrument, ApiError> {
    let instrument = sqlx::query_as::<_, Instrument>(
        "UPDATE instruments SET currency = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(currency)
    .fetch_one(pool)
    .await?;
    Ok(instrument)
}

/// Remove one instrument row. Referenced instruments are protected by the
/// foreign keys on orders/assets/trades.
pub async fn delete_instrument(pool: &PgPool, id: i64) -> Result<(), ApiError> {
    sqlx::query("DELETE FROM instruments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
