//! Service description at `/`

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::http::server::AppState;

/// GET / - static API overview
async fn index() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the blogsql practice API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Raw PostgreSQL queries over a users/posts/comments schema",
        "exercises": {
            "1-3": "/users - Basic SELECT, single record, INSERT",
            "4-5": "/posts - UPDATE, DELETE",
            "6-7": "/search - Range filters, text search",
            "8-10": "/relations - JOINs and complex nested queries",
        },
    }))
}

/// Root routes
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
