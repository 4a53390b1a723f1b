//! twitter95-server: HTTP API over a simulated 1995-era Twitter dataset
//!
//! Serves timelines and posts filtered by "fake time", user profiles and
//! user/tweet creation to a bot client and a frontend. All state lives in
//! Postgres; the only shared in-process resource is the connection pool.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use config::{DatabaseConfig, ServerConfig};
pub use error::{Error, Result};
pub use http::{build_router, run_server, AppState};
