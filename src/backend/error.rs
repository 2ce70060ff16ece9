use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Handler-boundary error taxonomy. Raw driver errors never reach the
/// client; they are logged here and surfaced as a fixed message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid email or password")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Username or email already exists")]
    Conflict,

    /// A write to one of the ordered stores failed. The message names the
    /// store so a partial dual-store write is at least attributable.
    #[error("Failed to update {0}")]
    StoreWrite(&'static str),

    #[error("Internal server error")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Hash(#[from] bcrypt::BcryptError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::StoreWrite(_) | ApiError::Database(_) | ApiError::Hash(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database(e) => error!(error = %e, "database error"),
            ApiError::Hash(e) => error!(error = %e, "hashing error"),
            _ => {}
        }
        let body = json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
