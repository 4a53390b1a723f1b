//! Repository implementations for database access
//!
//! Each repository borrows the pool and issues plain SQL:
//! - Reads are single queries (subselects, no N+1)
//! - Idempotent writes use ON CONFLICT instead of check-then-insert
//! - The user cascade runs in one transaction

pub mod users;
pub mod tweets;
pub mod bios;
pub mod follows;

pub use users::{UserRepo, User, NewUser, DeletedUser};
pub use tweets::{TweetRepo, Tweet, NewTweet};
pub use bios::{BioRepo, Bio, NewBio};
pub use follows::{FollowRepo, FollowEdge};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} {id}")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn user_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            resource: "User",
            id: id.to_string(),
        }
    }
}
