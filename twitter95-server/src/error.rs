//! Error types for twitter95-server startup and lifecycle
//!
//! Request-level failures use [`crate::http::ApiError`]; this type covers
//! pool creation, migrations and the listener.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
