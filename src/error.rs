//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("password hashing failed")]
    Hash,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // The API contract collapses not-found, conflict and invalid-input into one
        // client-error status; only infrastructure failures are 5xx.
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::BAD_REQUEST, "not_found"),
            ApiError::Conflict(_) => (StatusCode::BAD_REQUEST, "conflict"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            ApiError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            ApiError::Hash => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn client_failures_collapse_to_bad_request() {
        assert_eq!(status_of(ApiError::NotFound("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ApiError::Conflict("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ApiError::Validation("x".into())), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_failures_are_server_errors() {
        assert_eq!(
            status_of(ApiError::Db(sqlx::Error::RowNotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_of(ApiError::Hash), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
