//! Database connection arguments shared by `serve` and `init-db`

use blogsql_server::DatabaseSettings;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Full connection URL; wins over the --db-* settings
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 54322)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "postgres", hide_env_values = true)]
    pub db_password: String,

    /// Database name (created on startup if missing)
    #[arg(long, env = "DB_NAME", default_value = "postgres")]
    pub db_name: String,

    /// Maximum pooled connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,
}

impl From<DatabaseArgs> for DatabaseSettings {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            // an empty DATABASE_URL in .env means "unset"
            url: args.database_url.filter(|url| !url.trim().is_empty()),
            host: args.db_host,
            port: args.db_port,
            user: args.db_user,
            password: args.db_password,
            name: args.db_name,
            max_connections: args.max_connections,
        }
    }
}
