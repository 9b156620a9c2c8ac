//! Summary endpoints, nested under `/users/{user_id}/summary`.

use axum::{
    extract::{Path, State},
    Json,
};

use super::require_user;
use crate::crud;
use crate::error::ApiError;
use crate::models::{Summary, SummaryUpdate};
use crate::state::AppState;

pub async fn get_summary(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Summary>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let summary = crud::summaries::get_summary_by_user(&state.pool, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No summary found with user.".into()))?;
    Ok(Json(summary))
}

pub async fn create_summary(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Summary>, ApiError> {
    require_user(&state.pool, user_id).await?;
    if crud::summaries::get_summary_by_user(&state.pool, user_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("User already has a summary.".into()));
    }
    let summary = crud::summaries::create_summary(&state.pool, user_id).await?;
    Ok(Json(summary))
}

pub async fn update_summary(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(update): Json<SummaryUpdate>,
) -> Result<Json<Summary>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let summary = crud::summaries::get_summary_by_user(&state.pool, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No summary found with user.".into()))?;
    update.validate()?;
    let summary = crud::summaries::update_summary(&state.pool, summary.id, &update).await?;
    Ok(Json(summary))
}
