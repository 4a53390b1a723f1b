//! Tweet endpoints
//!
//! Creation plus the unfiltered and per-author listings. The fake-time
//! filtered reads live in `timeline`.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::RouterExt;
use crate::db::repos::{NewTweet, Tweet, TweetRepo, UserRepo};
use crate::db::DbError;
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::http::server::AppState;
use crate::models::{FakeTime, LimitParams, ListingParams};

/// Create tweet request
#[derive(Debug, Deserialize)]
pub struct CreateTweetRequest {
    pub author_id: i64,
    pub text: String,
    #[serde(default)]
    pub fake_time: Option<FakeTime>,
}

impl From<CreateTweetRequest> for NewTweet {
    fn from(req: CreateTweetRequest) -> Self {
        Self {
            author_id: req.author_id,
            text: req.text,
            fake_time: req.fake_time.map(Into::into),
        }
    }
}

/// Tweet response
#[derive(Debug, Serialize)]
pub struct TweetResponse {
    pub tweet_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created_at: String,
    pub fake_time: Option<String>,
}

impl From<Tweet> for TweetResponse {
    fn from(t: Tweet) -> Self {
        Self {
            tweet_id: t.tweet_id,
            author_id: t.author_id,
            text: t.text,
            created_at: t.created_at.to_rfc3339(),
            fake_time: t.fake_time.map(|ft| ft.to_rfc3339()),
        }
    }
}

pub(crate) fn into_responses(tweets: Vec<Tweet>) -> Json<Vec<TweetResponse>> {
    Json(tweets.into_iter().map(TweetResponse::from).collect())
}

/// GET /tweets/ - unfiltered listing
async fn list_tweets(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListingParams>,
) -> Result<Json<Vec<TweetResponse>>, ApiError> {
    let tweets = TweetRepo::new(&state.pool)
        .list(params.order(), params.limit)
        .await?;

    Ok(into_responses(tweets))
}

/// POST /tweet/ - create a tweet
#[instrument(skip(state, req), fields(author_id = req.author_id))]
async fn create_tweet(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateTweetRequest>,
) -> Result<Json<TweetResponse>, ApiError> {
    let tweet = TweetRepo::new(&state.pool).create(req.into()).await?;

    tracing::info!(tweet_id = tweet.tweet_id, "tweet created");

    Ok(Json(TweetResponse::from(tweet)))
}

/// GET /users/{user_id}/tweets/ - all tweets by one user, newest first
async fn list_user_tweets(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<LimitParams>,
) -> Result<Json<Vec<TweetResponse>>, ApiError> {
    if !UserRepo::new(&state.pool).exists(user_id).await? {
        return Err(DbError::user_not_found(user_id).into());
    }

    let tweets = TweetRepo::new(&state.pool)
        .by_author(user_id, params.limit)
        .await?;

    Ok(into_responses(tweets))
}

/// Tweet routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route_slash_tolerant("/tweets/", get(list_tweets))
        .route_slash_tolerant("/tweet/", post(create_tweet))
        .route_slash_tolerant("/users/{user_id}/tweets/", get(list_user_tweets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, StatusCode};
    use chrono::{TimeZone, Utc};

    use crate::http::server::tests::{offline_router, send};

    #[test]
    fn request_maps_field_by_field() {
        let req: CreateTweetRequest = serde_json::from_str(
            r#"{"author_id": 4, "text": "just got a modem", "fake_time": "1995-06-01T12:00:00Z"}"#,
        )
        .unwrap();

        let new: NewTweet = req.into();
        assert_eq!(new.author_id, 4);
        assert_eq!(new.text, "just got a modem");
        assert_eq!(
            new.fake_time,
            Some(Utc.with_ymd_and_hms(1995, 6, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn fake_time_is_optional() {
        let req: CreateTweetRequest =
            serde_json::from_str(r#"{"author_id": 4, "text": "undated"}"#).unwrap();
        assert!(req.fake_time.is_none());
    }

    #[test]
    fn response_renders_nullable_fake_time() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let response = TweetResponse::from(Tweet {
            tweet_id: 1,
            author_id: 2,
            text: "hello".into(),
            created_at: created,
            fake_time: None,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["fake_time"], serde_json::Value::Null);
        assert_eq!(json["created_at"], created.to_rfc3339());
    }

    #[tokio::test]
    async fn create_rejects_missing_author() {
        let (status, body) = send(
            offline_router(),
            Method::POST,
            "/tweet/",
            Some(r#"{"text": "who wrote this"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn listing_rejects_negative_limit() {
        let (status, _) = send(offline_router(), Method::GET, "/tweets/?limit=-5", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn user_tweets_rejects_non_integer_id() {
        let (status, body) =
            send(offline_router(), Method::GET, "/users/abc/tweets/", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }
}
