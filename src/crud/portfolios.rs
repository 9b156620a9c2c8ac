//! Portfolio data access.

use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::Portfolio;

/// Insert a portfolio for a user. The `type` label takes its column default.
pub async fn create_portfolio(pool: &PgPool, user_id: i64) -> Result<Portfolio, ApiError> {
    let portfolio = sqlx::query_as::<_, Portfolio>(
        "INSERT INTO portfolios (user_id) VALUES ($1) RETURNING *",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    tracing::debug!(portfolio_id = portfolio.id, user_id, "created portfolio");
    Ok(portfolio)
}

pub async fn get_portfolio_by_user(
    pool: &PgPool,
    user_id: i64,
) -> Result<Option<Portfolio>, ApiError> {
    let portfolio = sqlx::query_as::<_, Portfolio>("SELECT * FROM portfolios WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(portfolio)
}

/// Remove one portfolio row. Owned assets and trades are deleted by the route
/// layer first; there is no data-layer cascade.
pub async fn delete_portfolio(pool: &PgPool, id: i64) -> Result<(), ApiError> {
    sqlx::query("DELETE FROM portfolios WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    tracing::debug!(portfolio_id = id, "deleted portfolio");
    Ok(())
}
