//! Search endpoints: age range filter, post text search

use axum::{extract::State, routing::get, Router};

use crate::http::envelope::Reply;
use crate::http::error::ApiResult;
use crate::http::extractors::QueryParams;
use crate::http::server::AppState;
use crate::models::{AgeRange, AgeRangeParams, PostMatch, SearchParams, SearchTerm, UserSummary};

/// GET /search/users/age?minAge=&maxAge= - users in an inclusive age range
async fn users_by_age(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<AgeRangeParams>,
) -> ApiResult<Reply<Vec<UserSummary>>> {
    let range = AgeRange::try_from(params)?;
    let users = state.store.users_by_age(range).await?;

    Ok(Reply::ok(
        users,
        format!(
            "Users aged between {} and {} retrieved successfully",
            range.min(),
            range.max()
        ),
    ))
}

/// GET /search/posts?search= - top posts by views matching title or content
async fn search_posts(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> ApiResult<Reply<Vec<PostMatch>>> {
    let term = SearchTerm::try_from(params)?;
    let posts = state.store.search_posts(&term).await?;

    let message = format!("Found {} posts matching \"{}\"", posts.len(), term.raw());
    Ok(Reply::ok(posts, message))
}

/// Search routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search/users/age", get(users_by_age))
        .route("/search/posts", get(search_posts))
}
