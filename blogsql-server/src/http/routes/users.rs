//! User endpoints: list active, get by id, create

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};

use crate::db::DbError;
use crate::http::envelope::Reply;
use crate::http::error::{ApiError, ApiResult};
use crate::http::extractors::{JsonBody, UserId};
use crate::http::server::AppState;
use crate::models::{CreateUserRequest, NewUser, User, UserSummary};

/// GET /users/active - active users, name ascending
async fn active_users(State(state): State<AppState>) -> ApiResult<Reply<Vec<UserSummary>>> {
    let users = state.store.active_users().await?;
    Ok(Reply::ok(users, "Active users retrieved successfully"))
}

/// GET /users/{id} - single user
async fn get_user(State(state): State<AppState>, UserId(id): UserId) -> ApiResult<Reply<User>> {
    let user = state
        .store
        .find_user(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "User" })?;

    Ok(Reply::ok(user, "User retrieved successfully"))
}

/// POST /users - create a user
async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> ApiResult<Reply<User>> {
    let new_user = NewUser::try_from(req)?;

    let user = state
        .store
        .insert_user(&new_user)
        .await
        .map_err(|e| match e {
            DbError::UniqueViolation { .. } => ApiError::Conflict {
                message: "User with this email already exists".into(),
            },
            other => other.into(),
        })?;

    tracing::info!(user_id = user.id, "User created");
    Ok(Reply::created(user, "User created successfully"))
}

/// User routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/active", get(active_users))
        .route("/users/{id}", get(get_user))
}
