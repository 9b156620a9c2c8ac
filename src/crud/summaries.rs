//! Summary data access.

use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::{Summary, SummaryUpdate};

/// Insert an empty summary for a user; all figures start null.
pub async fn create_summary(pool: &PgPool, user_id: i64) -> Result<Summary, ApiError> {
    let summary =
        sqlx::query_as::<_, Summary>("INSERT INTO summaries (user_id) VALUES ($1) RETURNING *")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
    tracing::debug!(summary_id = summary.id, user_id, "created summary");
    Ok(summary)
}

pub async fn get_summary_by_user(pool: &PgPool, user_id: i64) -> Result<Option<Summary>, ApiError> {
    let summary = sqlx::query_as::<_, Summary>("SELECT * FROM summaries WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(summary)
}

/// Patch a summary: absent fields keep their stored value.
pub async fn update_summary(
    pool: &PgPool,
    id: i64,
    update: &SummaryUpdate,
) -> Result<Summary, ApiError> {
    let summary = sqlx::query_as::<_, Summary>(
        "UPDATE summaries SET \
            ending_market_value = COALESCE($2::double precision, ending_market_value), \
            beginning_market_value = COALESCE($3::double precision, beginning_market_value), \
            profit_loss = COALESCE($4::double precision, profit_loss) \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(update.ending_market_value)
    .bind(update.beginning_market_value)
    .bind(update.profit_loss)
    .fetch_one(pool)
    .await?;
    Ok(summary)
}

/// Remove a user's summary if one exists. Used by the user delete flow.
pub async fn delete_summary_by_user(pool: &PgPool, user_id: i64) -> Result<(), ApiError> {
    sqlx::query("DELETE FROM summaries WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
