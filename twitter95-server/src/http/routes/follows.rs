//! Follower edge endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::RouterExt;
use crate::db::repos::{FollowEdge, FollowRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiPath};
use crate::http::server::AppState;

/// Follow / unfollow request
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FollowRequest {
    pub follower_id: i64,
    pub followed_id: i64,
}

impl From<FollowRequest> for FollowEdge {
    fn from(req: FollowRequest) -> Self {
        Self {
            follower_id: req.follower_id,
            followed_id: req.followed_id,
        }
    }
}

/// POST /follows/ - add an edge; 201 when new, 200 when it already existed
#[instrument(skip(state))]
async fn follow(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<FollowRequest>,
) -> Result<(StatusCode, Json<FollowEdge>), ApiError> {
    let edge = FollowEdge::from(req);
    let created = FollowRepo::new(&state.pool).follow(edge).await?;

    let status = if created {
        tracing::info!(
            follower_id = edge.follower_id,
            followed_id = edge.followed_id,
            "follow created"
        );
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(edge)))
}

/// DELETE /follows/ - remove an edge
#[instrument(skip(state))]
async fn unfollow(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<FollowRequest>,
) -> Result<StatusCode, ApiError> {
    FollowRepo::new(&state.pool).unfollow(req.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/{user_id}/following/ - ids the user follows
async fn list_following(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<Vec<i64>>, ApiError> {
    let ids = FollowRepo::new(&state.pool).followed_ids(user_id).await?;
    Ok(Json(ids))
}

/// Follow routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route_slash_tolerant("/follows/", post(follow).delete(unfollow))
        .route_slash_tolerant("/users/{user_id}/following/", get(list_following))
}
