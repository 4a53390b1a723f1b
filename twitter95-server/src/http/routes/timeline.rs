//! Fake-time filtered reads
//!
//! `/timeline/` shows what a user would see from the accounts they follow at
//! a given simulated moment; `/posts/` shows one user's own tweets at that
//! moment. Neither checks that the user exists: unknown ids read as empty.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use super::tweets::{into_responses, TweetResponse};
use super::RouterExt;
use crate::db::repos::TweetRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ApiQuery;
use crate::http::server::AppState;
use crate::models::TimelineParams;

/// GET /timeline/ - tweets from followed users visible at `fake_time`
async fn read_timeline(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<TimelineParams>,
) -> Result<Json<Vec<TweetResponse>>, ApiError> {
    let tweets = TweetRepo::new(&state.pool)
        .timeline(params.user_id, params.fake_time, params.order(), params.limit)
        .await?;

    tracing::debug!(user_id = params.user_id, count = tweets.len(), "timeline read");
    Ok(into_responses(tweets))
}

/// GET /posts/ - one user's tweets visible at `fake_time`
async fn read_posts(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<TimelineParams>,
) -> Result<Json<Vec<TweetResponse>>, ApiError> {
    let tweets = TweetRepo::new(&state.pool)
        .posts(params.user_id, params.fake_time, params.order(), params.limit)
        .await?;

    Ok(into_responses(tweets))
}

/// Timeline routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route_slash_tolerant("/timeline/", get(read_timeline))
        .route_slash_tolerant("/posts/", get(read_posts))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::http::server::tests::{offline_router, send};

    #[tokio::test]
    async fn timeline_requires_fake_time() {
        let (status, body) =
            send(offline_router(), Method::GET, "/timeline/?user_id=1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn timeline_rejects_unparseable_fake_time() {
        let (status, body) = send(
            offline_router(),
            Method::GET,
            "/timeline/?user_id=1&fake_time=next-tuesday",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("fake_time"));
    }

    #[tokio::test]
    async fn timeline_rejects_cutoff_before_postgres_range() {
        let (status, body) = send(
            offline_router(),
            Method::GET,
            "/timeline/?user_id=1&fake_time=-300000000000000",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn routes_match_without_trailing_slash() {
        // Reaching validation proves the bare path is routed
        for uri in ["/timeline?user_id=1", "/posts?user_id=1"] {
            let (status, body) = send(offline_router(), Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], "validation_error");
        }
    }

    #[tokio::test]
    async fn posts_requires_user_id() {
        let (status, _) = send(
            offline_router(),
            Method::GET,
            "/posts/?fake_time=1995-06-01T12:00:00Z",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
