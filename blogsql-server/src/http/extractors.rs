//! Custom Axum extractors
//!
//! All rejections are converted to [`ApiError::InvalidArgument`] so clients
//! get the usual envelope instead of axum's plain-text bodies, and so
//! validation always finishes before a handler touches the store.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{parse_id, ValidationError};

async fn id_from_parts<S>(parts: &mut Parts, state: &S, resource: &'static str) -> Result<i32, ApiError>
where
    S: Send + Sync,
{
    let Path(raw): Path<String> = Path::from_request_parts(parts, state)
        .await
        .map_err(|_| ValidationError::InvalidId { resource })?;

    Ok(parse_id(&raw, resource)?)
}

/// Extract and validate a user id from path
pub struct UserId(pub i32);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        id_from_parts(parts, state, "user").await.map(Self)
    }
}

/// Extract and validate a post id from path
pub struct PostId(pub i32);

impl<S> FromRequestParts<S> for PostId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        id_from_parts(parts, state, "post").await.map(Self)
    }
}

/// JSON request body.
///
/// An empty body decodes as `{}` so that, for example, a bare `PUT`
/// reaches field validation instead of failing on content type.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ValidationError::MalformedBody(e.body_text()))?;

        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(raw)
            .map(Self)
            .map_err(|e| ValidationError::MalformedBody(e.to_string()).into())
    }
}

/// Query string parameters
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ValidationError::MalformedQuery(e.body_text()))?;

        Ok(Self(params))
    }
}
