//! HTTP server command for the blog API
//!
//! Bootstraps the database (unless `--skip-init`) and serves every route.

use std::net::{SocketAddr, ToSocketAddrs};

use anyhow::{Context, Result};
use clap::Parser;

use blogsql_server::{create_pool, init_database, run_server, DatabaseSettings, ServerConfig};

use crate::config::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Skip database/schema bootstrap and connect directly
    #[arg(long)]
    pub skip_init: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

impl ServeArgs {
    fn bind_addr(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))?
            .next()
            .with_context(|| format!("{} did not resolve to an address", self.host))
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let bind_addr = args.bind_addr()?;
    let config = ServerConfig {
        bind_addr,
        cors_permissive: args.cors_permissive,
    };
    let skip_init = args.skip_init;
    let settings = DatabaseSettings::from(args.db);

    tracing::info!("Starting blogsql server on {}", bind_addr);

    let pool = if skip_init {
        create_pool(&settings)
            .await
            .context("Failed to create database pool")?
    } else {
        init_database(&settings)
            .await
            .context("Failed to initialize database")?
    };

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
