//! Post endpoints: partial update, delete

use axum::{extract::State, routing::put, Router};

use crate::http::envelope::Reply;
use crate::http::error::{ApiError, ApiResult};
use crate::http::extractors::{JsonBody, PostId};
use crate::http::server::AppState;
use crate::models::{Post, PostChanges, PostUpdate};

/// PUT /posts/{id} - update the provided fields
async fn update_post(
    State(state): State<AppState>,
    PostId(id): PostId,
    JsonBody(changes): JsonBody<PostChanges>,
) -> ApiResult<Reply<Post>> {
    let update = PostUpdate::from_changes(changes)?;

    let post = state
        .store
        .update_post(id, &update)
        .await?
        .ok_or(ApiError::NotFound { resource: "Post" })?;

    Ok(Reply::ok(post, "Post updated successfully"))
}

/// DELETE /posts/{id} - delete after confirming the post exists
async fn delete_post(State(state): State<AppState>, PostId(id): PostId) -> ApiResult<Reply<()>> {
    if !state.store.post_exists(id).await? {
        return Err(ApiError::NotFound { resource: "Post" });
    }

    state.store.delete_post(id).await?;
    tracing::info!(post_id = id, "Post deleted");

    Ok(Reply::done("Post deleted successfully"))
}

/// Post routes
pub fn router() -> Router<AppState> {
    Router::new().route("/posts/{id}", put(update_post).delete(delete_post))
}
