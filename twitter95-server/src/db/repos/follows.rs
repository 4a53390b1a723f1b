//! Follower edge repository

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::DbError;

/// Directed edge: `follower_id` follows `followed_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize)]
pub struct FollowEdge {
    pub follower_id: i64,
    pub followed_id: i64,
}

/// Follower edge repository
pub struct FollowRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> FollowRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add an edge (idempotent).
    ///
    /// Returns true when the edge was created, false when it already existed.
    /// Unknown user ids surface as a foreign-key `Sqlx` error.
    pub async fn follow(&self, edge: FollowEdge) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO followers (follower_id, followed_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(edge.follower_id)
        .bind(edge.followed_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Remove an edge.
    pub async fn unfollow(&self, edge: FollowEdge) -> Result<(), DbError> {
        let result =
            sqlx::query("DELETE FROM followers WHERE follower_id = $1 AND followed_id = $2")
                .bind(edge.follower_id)
                .bind(edge.followed_id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "Follow",
                id: format!("{} -> {}", edge.follower_id, edge.followed_id),
            });
        }

        Ok(())
    }

    /// Ids of everyone `user_id` follows, ascending.
    pub async fn followed_ids(&self, user_id: i64) -> Result<Vec<i64>, DbError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT followed_id FROM followers WHERE follower_id = $1 ORDER BY followed_id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }
}
