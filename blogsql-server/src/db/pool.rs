//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. Connection settings
//! come either from a full URL or from discrete host/port/user/password/
//! database values.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Database that always exists on a Postgres server; used for admin work.
pub const ADMIN_DATABASE: &str = "postgres";

/// Where and how to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Full connection URL; takes precedence over the discrete fields.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 54322,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            name: ADMIN_DATABASE.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseSettings {
    /// Connect options for the target database.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.url {
            Some(url) => PgConnectOptions::from_str(url),
            None => Ok(self.discrete_options().database(&self.name)),
        }
    }

    /// Connect options for the admin database on the same server.
    pub fn admin_options(&self) -> PgConnectOptions {
        self.discrete_options().database(ADMIN_DATABASE)
    }

    /// Whether the target database may need to be created first.
    ///
    /// Only applies to discrete settings; a URL is taken as pointing at an
    /// existing database.
    pub fn creates_database(&self) -> bool {
        self.url.is_none() && self.name != ADMIN_DATABASE
    }

    /// Human-readable target, without the password.
    pub fn describe(&self) -> String {
        match &self.url {
            Some(_) => "DATABASE_URL".to_string(),
            None => format!("{}@{}:{}/{}", self.user, self.host, self.port, self.name),
        }
    }

    fn discrete_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
    }
}

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DatabaseSettings::default()).await?;
/// ```
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(settings.connect_options()?)
        .await
}
