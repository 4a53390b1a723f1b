//! HTTP server command for the twitter95 API
//!
//! Applies the schema, then serves every route until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use twitter95_server::db::{create_pool, migrations};
use twitter95_server::{run_server, DatabaseConfig, ServerConfig};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "TWITTER95_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Only accept localhost origins (default: any origin)
    #[arg(long)]
    pub localhost_cors: bool,

    /// Skip creating missing tables on startup
    #[arg(long)]
    pub skip_migrations: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: !self.localhost_cors,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    let skip_migrations = args.skip_migrations;
    let db_config = DatabaseConfig::from(args.db);

    tracing::info!(
        host = %db_config.host,
        port = db_config.port,
        database = %db_config.database,
        max_connections = db_config.max_connections,
        "Connecting to database"
    );

    let pool = create_pool(&db_config)
        .await
        .context("Failed to create database pool")?;

    if !skip_migrations {
        migrations::run(&pool)
            .await
            .context("Failed to apply schema")?;
    }

    tracing::info!("Starting twitter95 server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> ServeArgs {
        let mut argv = vec![
            "serve",
            "--pg-host",
            "localhost",
            "--pg-user",
            "bot",
            "--pg-database",
            "twitter95",
        ];
        argv.extend_from_slice(extra);
        ServeArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_to_permissive_cors() {
        let args = parse(&[]);
        let config = args.server_config();
        assert!(config.cors_permissive);
        assert_eq!(config.bind_addr.port(), 3030);
    }

    #[test]
    fn localhost_cors_flag() {
        let args = parse(&["--localhost-cors", "--bind", "0.0.0.0:8080"]);
        let config = args.server_config();
        assert!(!config.cors_permissive);
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn database_flags_map_to_config() {
        let args = parse(&["--pg-port", "6543", "--max-connections", "4", "--log-statements"]);
        let config = DatabaseConfig::from(args.db);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 6543);
        assert_eq!(config.max_connections, 4);
        assert!(config.log_statements);
    }
}
