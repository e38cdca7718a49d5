//! Route handlers organized by resource

pub mod root;
pub mod health;
pub mod users;
pub mod posts;
pub mod search;
pub mod relations;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::envelope::Envelope;

/// Fallback for unmatched paths and methods
pub async fn route_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::<()>::failure("Route not found")),
    )
        .into_response()
}
