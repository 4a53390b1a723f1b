//! Schema bootstrap
//!
//! Foreign keys carry no ON DELETE CASCADE. Dependents of a user are removed
//! explicitly by `UserRepo::delete_cascade`.

use sqlx::PgPool;

use crate::Result;

/// Create all tables and indexes if they do not exist.
pub async fn run(pool: &PgPool) -> Result<()> {
    tracing::info!("Running schema migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id BIGSERIAL PRIMARY KEY,
            user_name TEXT NOT NULL UNIQUE,
            profile_name TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            fake_joined TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bios (
            user_id BIGINT PRIMARY KEY REFERENCES users(user_id),
            location TEXT,
            website TEXT,
            description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tweets (
            tweet_id BIGSERIAL PRIMARY KEY,
            author_id BIGINT NOT NULL REFERENCES users(user_id),
            text TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            fake_time TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS followers (
            follower_id BIGINT NOT NULL REFERENCES users(user_id),
            followed_id BIGINT NOT NULL REFERENCES users(user_id),
            PRIMARY KEY (follower_id, followed_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Schema migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<()> {
    // Timeline and posts filter by author then order by fake time
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_tweets_author_fake_time ON tweets(author_id, fake_time)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_tweets_fake_time ON tweets(fake_time, tweet_id)")
        .execute(pool)
        .await?;

    // Reverse lookup for the "followed" half of the cascade
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_followers_followed ON followers(followed_id)")
        .execute(pool)
        .await?;

    Ok(())
}
