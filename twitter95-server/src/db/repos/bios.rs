//! Bio repository

use sqlx::{FromRow, PgPool};

use super::DbError;

/// Bio record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Bio {
    pub user_id: i64,
    pub location: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

impl Bio {
    /// Stand-in for a user without a bio: keyed by user, every field empty.
    pub fn placeholder(user_id: i64) -> Self {
        Self {
            user_id,
            location: None,
            website: None,
            description: None,
        }
    }
}

/// Fields for creating or replacing a bio
#[derive(Debug, Clone)]
pub struct NewBio {
    pub user_id: i64,
    pub location: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

/// Bio repository
pub struct BioRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BioRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's bio, if they have one.
    pub async fn find(&self, user_id: i64) -> Result<Option<Bio>, DbError> {
        let bio: Option<Bio> = sqlx::query_as(
            r#"
            SELECT user_id, location, website, description
            FROM bios
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(bio)
    }

    /// Create or replace a user's bio.
    pub async fn upsert(&self, bio: NewBio) -> Result<Bio, DbError> {
        let bio: Bio = sqlx::query_as(
            r#"
            INSERT INTO bios (user_id, location, website, description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                location = EXCLUDED.location,
                website = EXCLUDED.website,
                description = EXCLUDED.description
            RETURNING user_id, location, website, description
            "#,
        )
        .bind(bio.user_id)
        .bind(bio.location.as_deref())
        .bind(bio.website.as_deref())
        .bind(bio.description.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(bio)
    }
}
