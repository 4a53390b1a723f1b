//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use twitter95_server::db::{create_pool, migrations};
use twitter95_server::DatabaseConfig;

use super::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Create the schema and exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let db_config = DatabaseConfig::from(args.db);
    tracing::info!(host = %db_config.host, database = %db_config.database, "Connecting to database");

    let pool = create_pool(&db_config)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to apply schema")?;

    pool.close().await;
    Ok(())
}
