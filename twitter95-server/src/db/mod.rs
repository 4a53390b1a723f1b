//! Database layer - connection pool, schema and repositories
//!
//! - One pool per process, passed to handlers through `AppState`
//! - Every session runs at READ COMMITTED
//! - Multi-step writes (the user cascade) run in a single transaction

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_from_url};
pub use repos::*;
