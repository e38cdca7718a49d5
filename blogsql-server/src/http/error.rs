//! API error types with IntoResponse
//!
//! Every error renders as a failure envelope with the matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::envelope::Envelope;
use crate::db::DbError;
use crate::models::ValidationError;

pub type ApiResult<T> = Result<T, ApiError>;

/// API error type with automatic HTTP status mapping
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing input (400)
    #[error("{0}")]
    InvalidArgument(#[from] ValidationError),

    /// Referenced row or route absent (404)
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// Unique constraint violated (409)
    #[error("{message}")]
    Conflict { message: String },

    /// Anything else (500); the message is the underlying description
    #[error("{message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal { message } => tracing::error!("Internal error: {}", message),
            Self::Conflict { message } => tracing::warn!("Conflict: {}", message),
            _ => tracing::debug!(status = status.as_u16(), "Request rejected: {}", self),
        }

        (status, Json(Envelope::<()>::failure(self.to_string()))).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::UniqueViolation { message, .. } => Self::Conflict { message },
            other => Self::Internal {
                message: other.description(),
            },
        }
    }
}
