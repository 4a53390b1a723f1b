//! User endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::RouterExt;
use crate::db::repos::{DeletedUser, NewUser, User, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::http::server::AppState;
use crate::models::{FakeTime, ListingParams};

/// Create user request
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub user_name: String,
    pub profile_name: String,
    #[serde(default)]
    pub fake_joined: Option<FakeTime>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            user_name: req.user_name,
            profile_name: req.profile_name,
            fake_joined: req.fake_joined.map(DateTime::<Utc>::from),
        }
    }
}

/// User response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: i64,
    pub user_name: String,
    pub profile_name: String,
    pub created_at: String,
    pub fake_joined: Option<String>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            user_id: u.user_id,
            user_name: u.user_name,
            profile_name: u.profile_name,
            created_at: u.created_at.to_rfc3339(),
            fake_joined: u.fake_joined.map(|t| t.to_rfc3339()),
        }
    }
}

/// GET /users/ - list users by id
async fn list_users(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListingParams>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = UserRepo::new(&state.pool)
        .list(params.order(), params.limit)
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /users/ - create a user
#[instrument(skip(state, req), fields(user_name = %req.user_name))]
async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepo::new(&state.pool).create(req.into()).await?;

    tracing::info!(user_id = user.user_id, "user created");

    Ok(Json(UserResponse::from(user)))
}

/// GET /users/{user_id}/ - fetch one user
async fn get_user(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepo::new(&state.pool).get(user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/{user_id}/ - delete a user and everything referencing them
#[instrument(skip(state))]
async fn delete_user(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<DeletedUser>, ApiError> {
    let deleted = UserRepo::new(&state.pool).delete_cascade(user_id).await?;

    tracing::info!(
        user_id,
        tweets = deleted.tweets,
        following = deleted.following,
        followers = deleted.followers,
        bios = deleted.bios,
        "user deleted"
    );

    Ok(Json(deleted))
}

/// GET /names/{user_name}/ - fetch one user by name
async fn get_user_by_name(
    State(state): State<Arc<AppState>>,
    ApiPath(user_name): ApiPath<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepo::new(&state.pool).get_by_name(&user_name).await?;
    Ok(Json(UserResponse::from(user)))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route_slash_tolerant("/users/", get(list_users).post(create_user))
        .route_slash_tolerant("/users/{user_id}/", get(get_user).delete(delete_user))
        .route_slash_tolerant("/names/{user_name}/", get(get_user_by_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, StatusCode};
    use chrono::TimeZone;

    use crate::http::server::tests::{offline_router, send};

    #[test]
    fn request_maps_field_by_field() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"user_name": "webmaster", "profile_name": "The Webmaster", "fake_joined": "1995-03-14 09:00:00"}"#,
        )
        .unwrap();

        let new: NewUser = req.into();
        assert_eq!(new.user_name, "webmaster");
        assert_eq!(new.profile_name, "The Webmaster");
        assert_eq!(
            new.fake_joined,
            Some(Utc.with_ymd_and_hms(1995, 3, 14, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn response_shape() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let response = UserResponse::from(User {
            user_id: 11,
            user_name: "netscape_fan".into(),
            profile_name: "Navigator".into(),
            created_at: created,
            fake_joined: None,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["user_id"], 11);
        assert_eq!(json["user_name"], "netscape_fan");
        assert_eq!(json["fake_joined"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() {
        let (status, body) = send(
            offline_router(),
            Method::POST,
            "/users/",
            Some(r#"{"user_name": "lonely"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn delete_rejects_non_integer_id() {
        let (status, _) = send(offline_router(), Method::DELETE, "/users/bob/", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bare_paths_are_routed() {
        let (status, _) = send(
            offline_router(),
            Method::POST,
            "/users",
            Some(r#"{"user_name": "lonely"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(offline_router(), Method::DELETE, "/users/bob", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
