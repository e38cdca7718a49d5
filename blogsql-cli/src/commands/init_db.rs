//! Create the database and blog schema, then exit

use anyhow::{Context, Result};
use clap::Parser;

use blogsql_server::{init_database, DatabaseSettings};

use crate::config::DatabaseArgs;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let settings = DatabaseSettings::from(args.db);
    let target = settings.describe();

    let pool = init_database(&settings)
        .await
        .with_context(|| format!("Failed to initialize database at {}", target))?;
    pool.close().await;

    tracing::info!(target_db = %target, "Schema is up to date");
    Ok(())
}
