//! Database bootstrap: database creation, table DDL and teardown.

use crate::error::ApiError;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Table DDL in foreign-key dependency order. Idempotent (IF NOT EXISTS).
const TABLE_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username VARCHAR(255) NOT NULL UNIQUE,
        email VARCHAR(255) NOT NULL UNIQUE,
        hashed_password TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS instruments (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        exchange VARCHAR(255) NOT NULL,
        symbol VARCHAR(255) NOT NULL UNIQUE,
        currency VARCHAR(5) NOT NULL,
        open DOUBLE PRECISION,
        high DOUBLE PRECISION,
        low DOUBLE PRECISION,
        close DOUBLE PRECISION
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS portfolios (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL UNIQUE REFERENCES users(id),
        type VARCHAR(255) NOT NULL DEFAULT 'Overview'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS assets (
        id BIGSERIAL PRIMARY KEY,
        portfolio_id BIGINT NOT NULL REFERENCES portfolios(id),
        instrument_id BIGINT NOT NULL REFERENCES instruments(id),
        buy_date DATE NOT NULL,
        buy_price DOUBLE PRECISION NOT NULL,
        volume DOUBLE PRECISION NOT NULL,
        currency VARCHAR(5) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS trades (
        id BIGSERIAL PRIMARY KEY,
        portfolio_id BIGINT NOT NULL REFERENCES portfolios(id),
        instrument_id BIGINT NOT NULL REFERENCES instruments(id),
        buy_date DATE NOT NULL,
        buy_price DOUBLE PRECISION NOT NULL,
        sell_date DATE NOT NULL,
        sell_price DOUBLE PRECISION NOT NULL,
        volume DOUBLE PRECISION NOT NULL,
        currency VARCHAR(5) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(id),
        instrument_id BIGINT NOT NULL REFERENCES instruments(id),
        date DATE NOT NULL,
        volume DOUBLE PRECISION NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        type VARCHAR(32) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS summaries (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL UNIQUE REFERENCES users(id),
        ending_market_value DOUBLE PRECISION,
        beginning_market_value DOUBLE PRECISION,
        profit_loss DOUBLE PRECISION
    )
    "#,
];

const INDEX_DDL: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS orders_user_id_idx ON orders (user_id)",
    "CREATE INDEX IF NOT EXISTS orders_instrument_id_idx ON orders (instrument_id)",
    "CREATE INDEX IF NOT EXISTS assets_portfolio_id_idx ON assets (portfolio_id)",
];

/// Drop order is the reverse of creation so foreign keys never dangle.
const TABLE_NAMES: &[&str] = &[
    "summaries",
    "orders",
    "trades",
    "assets",
    "portfolios",
    "instruments",
    "users",
];

/// Create all tables and indexes if they do not exist.
pub async fn create_tables(pool: &PgPool) -> Result<(), ApiError> {
    for ddl in TABLE_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    for ddl in INDEX_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Drop all tables. Test teardown only.
pub async fn drop_tables(pool: &PgPool) -> Result<(), ApiError> {
    for table in TABLE_NAMES {
        sqlx::query(&format!("DROP TABLE IF EXISTS {} CASCADE", table))
            .execute(pool)
            .await?;
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), ApiError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ApiError::Validation(format!("invalid database URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(ApiError::Db)?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await
            .map_err(ApiError::Db)?;
    if !exists.0 {
        let quoted = quote_ident(&db_name);
        sqlx::query(&format!("CREATE DATABASE {}", quoted))
            .execute(&mut conn)
            .await
            .map_err(ApiError::Db)?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ApiError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| ApiError::Validation("database URL has no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}
