//! Tweet repository
//!
//! Every tweet listing orders by `(fake_time, tweet_id)` in one direction.
//! Postgres places NULL fake times above every timestamp, so undated tweets
//! come first in descending listings and last in ascending ones.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::{FakeTime, SortOrder};
use super::DbError;

/// Tweet record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Tweet {
    pub tweet_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub fake_time: Option<DateTime<Utc>>,
}

/// Fields for a new tweet
#[derive(Debug, Clone)]
pub struct NewTweet {
    pub author_id: i64,
    pub text: String,
    pub fake_time: Option<DateTime<Utc>>,
}

const TWEET_COLUMNS: &str = "tweet_id, author_id, text, created_at, fake_time";

/// Visible at a cutoff: posted at or before it, or undated.
const VISIBLE_AT_CUTOFF: &str = "(fake_time <= $2 OR fake_time IS NULL)";

fn order_clause(order: SortOrder) -> String {
    format!(
        "ORDER BY fake_time {dir}, tweet_id {dir}",
        dir = order.as_sql()
    )
}

/// Tweet repository
pub struct TweetRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TweetRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a tweet, returning the row with its generated id and defaults.
    ///
    /// An unknown `author_id` surfaces as a foreign-key `Sqlx` error.
    pub async fn create(&self, tweet: NewTweet) -> Result<Tweet, DbError> {
        let sql = format!(
            r#"
            INSERT INTO tweets (author_id, text, fake_time)
            VALUES ($1, $2, $3)
            RETURNING {TWEET_COLUMNS}
            "#
        );

        let tweet = sqlx::query_as::<_, Tweet>(&sql)
            .bind(tweet.author_id)
            .bind(&tweet.text)
            .bind(tweet.fake_time)
            .fetch_one(self.pool)
            .await?;

        Ok(tweet)
    }

    /// Tweets by everyone `user_id` follows, visible at `cutoff`.
    ///
    /// A user who follows nobody, or does not exist, gets an empty list.
    pub async fn timeline(
        &self,
        user_id: i64,
        cutoff: FakeTime,
        order: SortOrder,
        limit: u32,
    ) -> Result<Vec<Tweet>, DbError> {
        let sql = format!(
            r#"
            SELECT {TWEET_COLUMNS}
            FROM tweets
            WHERE author_id IN (
                SELECT followed_id FROM followers WHERE follower_id = $1
            )
            AND {VISIBLE_AT_CUTOFF}
            {order}
            LIMIT $3
            "#,
            order = order_clause(order)
        );

        let tweets = sqlx::query_as::<_, Tweet>(&sql)
            .bind(user_id)
            .bind(cutoff.as_datetime())
            .bind(i64::from(limit))
            .fetch_all(self.pool)
            .await?;

        Ok(tweets)
    }

    /// Tweets authored by `user_id`, visible at `cutoff`.
    pub async fn posts(
        &self,
        user_id: i64,
        cutoff: FakeTime,
        order: SortOrder,
        limit: u32,
    ) -> Result<Vec<Tweet>, DbError> {
        let sql = format!(
            r#"
            SELECT {TWEET_COLUMNS}
            FROM tweets
            WHERE author_id = $1
            AND {VISIBLE_AT_CUTOFF}
            {order}
            LIMIT $3
            "#,
            order = order_clause(order)
        );

        let tweets = sqlx::query_as::<_, Tweet>(&sql)
            .bind(user_id)
            .bind(cutoff.as_datetime())
            .bind(i64::from(limit))
            .fetch_all(self.pool)
            .await?;

        Ok(tweets)
    }

    /// All tweets by `user_id` regardless of fake time, newest first.
    pub async fn by_author(&self, user_id: i64, limit: u32) -> Result<Vec<Tweet>, DbError> {
        let sql = format!(
            r#"
            SELECT {TWEET_COLUMNS}
            FROM tweets
            WHERE author_id = $1
            {order}
            LIMIT $2
            "#,
            order = order_clause(SortOrder::Descending)
        );

        let tweets = sqlx::query_as::<_, Tweet>(&sql)
            .bind(user_id)
            .bind(i64::from(limit))
            .fetch_all(self.pool)
            .await?;

        Ok(tweets)
    }

    /// Unfiltered listing.
    pub async fn list(&self, order: SortOrder, limit: u32) -> Result<Vec<Tweet>, DbError> {
        let sql = format!(
            r#"
            SELECT {TWEET_COLUMNS}
            FROM tweets
            {order}
            LIMIT $1
            "#,
            order = order_clause(order)
        );

        let tweets = sqlx::query_as::<_, Tweet>(&sql)
            .bind(i64::from(limit))
            .fetch_all(self.pool)
            .await?;

        Ok(tweets)
    }
}
