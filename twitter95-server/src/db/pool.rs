//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. Each new connection is
//! pinned to READ COMMITTED, the lowest isolation level Postgres offers.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Executor, PgPool};

use crate::config::{DatabaseConfig, DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};

const SET_ISOLATION: &str =
    "SET SESSION CHARACTERISTICS AS TRANSACTION ISOLATION LEVEL READ COMMITTED";

fn pool_options(max_connections: u32, acquire_timeout: Duration) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute(SET_ISOLATION).await?;
                Ok(())
            })
        })
}

/// Create a PostgreSQL connection pool from libpq-style settings.
///
/// # Errors
///
/// Returns an error if the first connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DatabaseConfig::from(args.db)).await?;
/// ```
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    pool_options(config.max_connections, config.acquire_timeout)
        .connect_with(config.connect_options())
        .await
}

/// Create a pool from a `postgres://` URL with default limits.
pub async fn create_pool_from_url(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(database_url)?;
    pool_options(DEFAULT_MAX_CONNECTIONS, DEFAULT_ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
}
