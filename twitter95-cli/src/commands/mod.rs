//! Subcommand implementations

pub mod migrate;
pub mod serve;

use std::time::Duration;

use clap::Args;
use twitter95_server::config::{DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS, DEFAULT_PG_PORT};
use twitter95_server::DatabaseConfig;

/// Postgres connection flags, each backed by its libpq environment variable
#[derive(Args, Debug)]
pub struct DatabaseArgs {
    /// Database host
    #[arg(long = "pg-host", env = "PGHOST")]
    pub host: String,

    /// Database port
    #[arg(long = "pg-port", env = "PGPORT", default_value_t = DEFAULT_PG_PORT)]
    pub port: u16,

    /// Database user
    #[arg(long = "pg-user", env = "PGUSER")]
    pub user: String,

    /// Database password
    #[arg(long = "pg-password", env = "PGPASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Database name
    #[arg(long = "pg-database", env = "PGDATABASE")]
    pub database: String,

    /// Maximum pooled connections
    #[arg(long, env = "TWITTER95_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Seconds to wait for a free pooled connection
    #[arg(long, default_value_t = DEFAULT_ACQUIRE_TIMEOUT.as_secs())]
    pub acquire_timeout_secs: u64,

    /// Log every SQL statement at info level
    #[arg(long)]
    pub log_statements: bool,
}

impl From<DatabaseArgs> for DatabaseConfig {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            user: args.user,
            password: args.password,
            database: args.database,
            max_connections: args.max_connections,
            acquire_timeout: Duration::from_secs(args.acquire_timeout_secs),
            log_statements: args.log_statements,
        }
    }
}
