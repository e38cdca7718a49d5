//! Relation endpoints: joins and nested aggregates

use axum::{extract::State, routing::get, Router};

use crate::http::envelope::Reply;
use crate::http::error::{ApiError, ApiResult};
use crate::http::extractors::{PostId, UserId};
use crate::http::server::AppState;
use crate::models::{PostDetails, PostWithAuthor, UserActivity};

/// GET /relations/posts - published posts with author name and email
async fn posts_with_author(State(state): State<AppState>) -> ApiResult<Reply<Vec<PostWithAuthor>>> {
    let posts = state.store.published_posts_with_author().await?;
    Ok(Reply::ok(
        posts,
        "Published posts with authors retrieved successfully",
    ))
}

/// GET /relations/users/{id} - user with all posts and comments
async fn user_with_posts_and_comments(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> ApiResult<Reply<UserActivity>> {
    let activity = state
        .store
        .user_activity(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "User" })?;

    Ok(Reply::ok(
        activity,
        "User with posts and comments retrieved successfully",
    ))
}

/// GET /relations/posts/{id} - post with author and comments, each with its author
async fn post_with_all_details(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> ApiResult<Reply<PostDetails>> {
    let details = state
        .store
        .post_details(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Post" })?;

    Ok(Reply::ok(
        details,
        "Post with all details retrieved successfully",
    ))
}

/// Relation routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/relations/posts", get(posts_with_author))
        .route("/relations/users/{id}", get(user_with_posts_and_comments))
        .route("/relations/posts/{id}", get(post_with_all_details))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use crate::db::memory::MemoryStore;
    use crate::http::routes::testing::{app, call};

    #[tokio::test]
    async fn published_posts_newest_first_with_author() {
        let store = Arc::new(MemoryStore::new());
        let alice = store.add_user("Alice", "alice@example.com", None, "active");
        let bob = store.add_user("Bob", "bob@example.com", None, "active");
        let older = store.add_post(alice.id, "Older", "a", 1, true);
        store.add_post(alice.id, "Draft", "b", 1, false);
        let newer = store.add_post(bob.id, "Newer", "c", 1, true);

        let (status, body) = call(&app(&store), "GET", "/relations/posts", None).await;

        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["id"], newer.id);
        assert_eq!(data[0]["author_name"], "Bob");
        assert_eq!(data[0]["author_email"], "bob@example.com");
        assert_eq!(data[1]["id"], older.id);
        assert_eq!(data[1]["author_name"], "Alice");
    }

    #[tokio::test]
    async fn user_without_activity_has_empty_collections() {
        let store = Arc::new(MemoryStore::new());
        let loner = store.add_user("Loner", "loner@example.com", Some(40), "active");

        let (status, body) = call(
            &app(&store),
            "GET",
            &format!("/relations/users/{}", loner.id),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["posts"], json!([]));
        assert_eq!(body["data"]["comments"], json!([]));
        assert_eq!(
            body["message"],
            "User with posts and comments retrieved successfully"
        );
    }

    #[tokio::test]
    async fn user_activity_lists_each_child_once() {
        let store = Arc::new(MemoryStore::new());
        let alice = store.add_user("Alice", "alice@example.com", None, "active");
        let bob = store.add_user("Bob", "bob@example.com", None, "active");
        let p1 = store.add_post(alice.id, "One", "x", 3, true);
        let p2 = store.add_post(alice.id, "Two", "y", 4, false);
        store.add_comment(p1.id, alice.id, "self reply");
        store.add_comment(p2.id, alice.id, "another");
        store.add_comment(p1.id, bob.id, "not alice");

        let (_, body) = call(
            &app(&store),
            "GET",
            &format!("/relations/users/{}", alice.id),
            None,
        )
        .await;

        let posts = body["data"]["posts"].as_array().unwrap();
        let comments = body["data"]["comments"].as_array().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(comments.len(), 2);
        assert_eq!(posts[1]["published"], false);
        assert!(comments.iter().all(|c| c["content"] != "not alice"));
    }

    #[tokio::test]
    async fn post_details_attribute_each_comment_to_its_author() {
        let store = Arc::new(MemoryStore::new());
        let alice = store.add_user("Alice", "alice@example.com", None, "active");
        let bob = store.add_user("Bob", "bob@example.com", None, "active");
        let cleo = store.add_user("Cleo", "cleo@example.com", None, "active");
        let post = store.add_post(alice.id, "Aggregates", "json_agg", 7, true);
        store.add_comment(post.id, bob.id, "from bob");
        store.add_comment(post.id, cleo.id, "from cleo");

        let (status, body) = call(
            &app(&store),
            "GET",
            &format!("/relations/posts/{}", post.id),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(
            data["author"],
            json!({ "id": alice.id, "name": "Alice", "email": "alice@example.com" })
        );

        let comments = data["comments"].as_array().unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0]["content"], "from bob");
        assert_eq!(comments[0]["author"], json!({ "id": bob.id, "name": "Bob" }));
        assert_eq!(comments[1]["content"], "from cleo");
        assert_eq!(comments[1]["author"], json!({ "id": cleo.id, "name": "Cleo" }));
    }

    #[tokio::test]
    async fn post_without_comments_has_empty_list() {
        let store = Arc::new(MemoryStore::new());
        let alice = store.add_user("Alice", "alice@example.com", None, "active");
        let post = store.add_post(alice.id, "Quiet", "no replies", 0, false);

        let (_, body) = call(
            &app(&store),
            "GET",
            &format!("/relations/posts/{}", post.id),
            None,
        )
        .await;

        assert_eq!(body["data"]["comments"], json!([]));
    }

    #[tokio::test]
    async fn missing_parents_are_404() {
        let store = Arc::new(MemoryStore::new());
        let app = app(&store);

        let (status, body) = call(&app, "GET", "/relations/users/41", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");

        let (status, body) = call(&app, "GET", "/relations/posts/41", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Post not found");
    }

    #[tokio::test]
    async fn non_integer_ids_are_400_without_store_access() {
        let store = Arc::new(MemoryStore::new());
        let app = app(&store);

        let (status, body) = call(&app, "GET", "/relations/users/x1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid user ID");

        let (status, body) = call(&app, "GET", "/relations/posts/1.5", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid post ID");

        assert_eq!(store.calls(), 0);
    }
}
