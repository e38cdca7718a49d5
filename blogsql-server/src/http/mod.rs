//! HTTP server layer
//!
//! Axum server with:
//! - Envelope responses for every endpoint, success or failure
//! - Validation in extractors, before any store call
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown

pub mod envelope;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use envelope::{Envelope, Reply};
pub use error::{ApiError, ApiResult};
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
