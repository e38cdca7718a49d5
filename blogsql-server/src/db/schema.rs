//! Database bootstrap: create the target database and the blog tables
//!
//! Errors are classified by SQLSTATE code, never by message text.

use sqlx::{Connection, PgConnection, PgPool};

use super::pool::DatabaseSettings;
use super::repos::DbError;

/// `duplicate_table`
const DUPLICATE_TABLE: &str = "42P07";
/// `duplicate_object` (indexes, constraints)
const DUPLICATE_OBJECT: &str = "42710";
/// `duplicate_database`
const DUPLICATE_DATABASE: &str = "42P04";

/// Advisory lock key held while the schema is applied
const SCHEMA_LOCK_KEY: i64 = 0x626c_6f67_7371_6c;

const IGNORABLE_CODES: &[&str] = &[DUPLICATE_TABLE, DUPLICATE_OBJECT, DUPLICATE_DATABASE];

/// Schema statements, applied in order.
pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        age INTEGER,
        status TEXT NOT NULL DEFAULT 'active',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        content TEXT,
        views INTEGER NOT NULL DEFAULT 0,
        published BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        id SERIAL PRIMARY KEY,
        post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        content TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_users_status ON users(status)",
    "CREATE INDEX IF NOT EXISTS idx_posts_user_id ON posts(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments(post_id)",
    "CREATE INDEX IF NOT EXISTS idx_comments_user_id ON comments(user_id)",
];

/// Whether a bootstrap error means "already there" and can be skipped.
pub fn is_ignorable(err: &DbError) -> bool {
    err.code()
        .is_some_and(|code| IGNORABLE_CODES.contains(&code.as_str()))
}

/// Create the target database if it does not exist yet.
///
/// No-op for the admin database and for URL-based settings.
pub async fn ensure_database(settings: &DatabaseSettings) -> Result<(), DbError> {
    if !settings.creates_database() {
        return Ok(());
    }

    let mut conn = PgConnection::connect_with(&settings.admin_options()).await?;

    let exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM pg_database WHERE datname = $1")
        .bind(&settings.name)
        .fetch_optional(&mut conn)
        .await?;

    if exists.is_some() {
        tracing::info!(database = %settings.name, "Database already exists");
    } else {
        tracing::info!(database = %settings.name, "Creating database");
        let statement = format!("CREATE DATABASE {}", quote_ident(&settings.name));
        if let Err(err) = sqlx::raw_sql(&statement).execute(&mut conn).await {
            let err = DbError::from(err);
            if !is_ignorable(&err) {
                return Err(err);
            }
            tracing::debug!(database = %settings.name, "Database created concurrently");
        }
    }

    conn.close().await?;
    Ok(())
}

/// Apply [`SCHEMA`] statement by statement.
///
/// Runs under a session advisory lock so concurrent bootstraps do not race
/// on `CREATE ... IF NOT EXISTS`.
pub async fn apply_schema(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Applying blog schema...");

    let mut conn = pool.acquire().await?;
    sqlx::query("SELECT pg_advisory_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *conn)
        .await?;

    let mut outcome: Result<(), DbError> = Ok(());
    for statement in SCHEMA {
        if let Err(err) = sqlx::query(statement).execute(&mut *conn).await {
            let err = DbError::from(err);
            if !is_ignorable(&err) {
                tracing::error!(statement = %summarize(statement), "Schema statement failed: {}", err);
                outcome = Err(err);
                break;
            }
            tracing::debug!(code = ?err.code(), "Skipping existing schema object");
        }
    }

    let unlocked = sqlx::query("SELECT pg_advisory_unlock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *conn)
        .await
        .map(|_| ())
        .map_err(DbError::from);

    settle(outcome, unlocked)?;
    tracing::info!("Database initialized");
    Ok(())
}

/// Combine the schema result with the unlock result. A statement failure
/// wins; an unlock failure after it is only logged.
fn settle(outcome: Result<(), DbError>, unlocked: Result<(), DbError>) -> Result<(), DbError> {
    match (outcome, unlocked) {
        (Err(err), Err(unlock_err)) => {
            tracing::warn!("Failed to release schema lock: {}", unlock_err);
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), unlocked) => unlocked,
    }
}

/// Quote an identifier for DDL that cannot take bind parameters.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn summarize(statement: &str) -> String {
    let flat = statement.split_whitespace().collect::<Vec<_>>().join(" ");
    flat.chars().take(100).collect()
}
