//! blogsql-server: HTTP API over raw, parameterized PostgreSQL queries
//!
//! Ten endpoints against a users/posts/comments schema, each validating
//! its input, issuing one statement through a shared pool, and replying
//! with the `{success, data, message}` envelope.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, BlogStore, DatabaseSettings, DbError, PgStore};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};

/// Create the target database if needed, connect, and apply the schema.
///
/// Returns the ready pool.
pub async fn init_database(settings: &DatabaseSettings) -> Result<sqlx::PgPool, DbError> {
    tracing::info!(target_db = %settings.describe(), "Initializing database");
    db::schema::ensure_database(settings).await?;

    let pool = create_pool(settings).await?;
    db::schema::apply_schema(&pool).await?;
    Ok(pool)
}
