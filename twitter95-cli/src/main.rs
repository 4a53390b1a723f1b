//! twitter95 CLI - runs the simulated 1995 Twitter API
//!
//! - `serve`: apply the schema and run the HTTP API
//! - `migrate`: apply the schema only
//!
//! Database credentials come from PGHOST, PGPORT, PGUSER, PGPASSWORD and
//! PGDATABASE (or matching flags); a `.env` file in the working directory is
//! loaded first.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "twitter95",
    author,
    version,
    about = "What if Twitter was made in 1995?",
    long_about = "Backend API for a simulated 1995-era Twitter: timelines and posts filtered \
                  by fake time, profiles, and user/tweet creation."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create missing tables and indexes, then exit
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await?,
        Commands::Migrate(args) => commands::migrate::run_migrate(args).await?,
    }

    Ok(())
}
