//! Login endpoint: verify a password against the stored hash. No session or
//! token is issued; a successful login simply returns the public user record.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::crud;
use crate::error::ApiError;
use crate::models::UserPublic;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserPublic>, ApiError> {
    if request.email.is_none() && request.username.is_none() {
        return Err(ApiError::Validation(
            "No username or email address provided to authenticate user.".into(),
        ));
    }
    let user = crud::users::authenticate(
        &state.pool,
        request.email.as_deref(),
        request.username.as_deref(),
        &request.password,
    )
    .await?
    .ok_or_else(|| ApiError::Validation("Incorrect username, email or password.".into()))?;
    Ok(Json(user.into()))
}
