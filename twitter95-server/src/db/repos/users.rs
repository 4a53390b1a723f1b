//! User repository
//!
//! Lookups by id and name, creation, listing, and the cascading delete that
//! removes a user together with everything that references them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::models::SortOrder;
use super::DbError;

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub user_id: i64,
    pub user_name: String,
    pub profile_name: String,
    pub created_at: DateTime<Utc>,
    pub fake_joined: Option<DateTime<Utc>>,
}

/// Fields for a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub profile_name: String,
    pub fake_joined: Option<DateTime<Utc>>,
}

/// Rows removed by a cascading user delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletedUser {
    pub user_id: i64,
    pub tweets: u64,
    /// Edges where the user was the follower
    pub following: u64,
    /// Edges where the user was followed
    pub followers: u64,
    pub bios: u64,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user, returning the row with its generated id and defaults.
    ///
    /// A duplicate `user_name` surfaces as a unique-violation `Sqlx` error.
    pub async fn create(&self, user: NewUser) -> Result<User, DbError> {
        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (user_name, profile_name, fake_joined)
            VALUES ($1, $2, $3)
            RETURNING user_id, user_name, profile_name, created_at, fake_joined
            "#,
        )
        .bind(&user.user_name)
        .bind(&user.profile_name)
        .bind(user.fake_joined)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// List users ordered by id.
    pub async fn list(&self, order: SortOrder, limit: u32) -> Result<Vec<User>, DbError> {
        let sql = format!(
            r#"
            SELECT user_id, user_name, profile_name, created_at, fake_joined
            FROM users
            ORDER BY user_id {}
            LIMIT $1
            "#,
            order.as_sql()
        );

        let users = sqlx::query_as::<_, User>(&sql)
            .bind(i64::from(limit))
            .fetch_all(self.pool)
            .await?;

        Ok(users)
    }

    /// Get a single user by id.
    pub async fn get(&self, user_id: i64) -> Result<User, DbError> {
        sqlx::query_as(
            r#"
            SELECT user_id, user_name, profile_name, created_at, fake_joined
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::user_not_found(user_id))
    }

    /// Get a single user by their unique user name.
    pub async fn get_by_name(&self, user_name: &str) -> Result<User, DbError> {
        sqlx::query_as(
            r#"
            SELECT user_id, user_name, profile_name, created_at, fake_joined
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::user_not_found(user_name))
    }

    /// Check whether a user exists.
    pub async fn exists(&self, user_id: i64) -> Result<bool, DbError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
                .bind(user_id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists.0)
    }

    /// Delete a user and every row that references them (atomic).
    ///
    /// The user row is locked first so concurrent writers cannot attach new
    /// tweets or edges mid-cascade. Tweets, both directions of follower
    /// edges, the bio and finally the user are deleted in one transaction;
    /// an error at any step drops the transaction, which rolls back.
    pub async fn delete_cascade(&self, user_id: i64) -> Result<DeletedUser, DbError> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<i64> =
            sqlx::query_scalar("SELECT user_id FROM users WHERE user_id = $1 FOR UPDATE")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;

        if locked.is_none() {
            return Err(DbError::user_not_found(user_id));
        }

        let tweets = sqlx::query("DELETE FROM tweets WHERE author_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let following = sqlx::query("DELETE FROM followers WHERE follower_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let followers = sqlx::query("DELETE FROM followers WHERE followed_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let bios = sqlx::query("DELETE FROM bios WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(DeletedUser {
            user_id,
            tweets,
            following,
            followers,
            bios,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleted_user_serializes_counts() {
        let summary = DeletedUser {
            user_id: 3,
            tweets: 12,
            following: 2,
            followers: 5,
            bios: 1,
        };

        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["user_id"], 3);
        assert_eq!(json["tweets"], 12);
        assert_eq!(json["following"], 2);
        assert_eq!(json["followers"], 5);
        assert_eq!(json["bios"], 1);
    }
}
