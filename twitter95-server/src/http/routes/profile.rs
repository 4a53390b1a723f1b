//! Profile endpoints - a user together with their bio

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::users::UserResponse;
use super::RouterExt;
use crate::db::repos::{Bio, BioRepo, NewBio, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiPath};
use crate::http::server::AppState;

/// Bio response
#[derive(Debug, Serialize)]
pub struct BioResponse {
    pub user_id: i64,
    pub location: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

impl From<Bio> for BioResponse {
    fn from(b: Bio) -> Self {
        Self {
            user_id: b.user_id,
            location: b.location,
            website: b.website,
            description: b.description,
        }
    }
}

/// Profile response
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub bio: BioResponse,
}

/// Create or replace bio request
#[derive(Debug, Deserialize)]
pub struct UpsertBioRequest {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpsertBioRequest {
    fn into_new_bio(self, user_id: i64) -> NewBio {
        NewBio {
            user_id,
            location: self.location,
            website: self.website,
            description: self.description,
        }
    }
}

/// GET /profile/{user_id}/ - user plus bio, placeholder bio when none exists
async fn read_profile(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = UserRepo::new(&state.pool).get(user_id).await?;
    let bio = BioRepo::new(&state.pool)
        .find(user_id)
        .await?
        .unwrap_or_else(|| Bio::placeholder(user_id));

    Ok(Json(ProfileResponse {
        user: UserResponse::from(user),
        bio: BioResponse::from(bio),
    }))
}

/// PUT /users/{user_id}/bio/ - create or replace a user's bio
#[instrument(skip(state, req))]
async fn upsert_bio(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpsertBioRequest>,
) -> Result<Json<BioResponse>, ApiError> {
    // 404 for unknown users rather than a foreign-key 500
    UserRepo::new(&state.pool).get(user_id).await?;

    let bio = BioRepo::new(&state.pool)
        .upsert(req.into_new_bio(user_id))
        .await?;

    tracing::info!(user_id, "bio saved");
    Ok(Json(BioResponse::from(bio)))
}

/// Profile routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route_slash_tolerant("/profile/{user_id}/", get(read_profile))
        .route_slash_tolerant("/users/{user_id}/bio/", put(upsert_bio))
}
