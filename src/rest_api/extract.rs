//! # Request Extractors
//!
//! Extractors that validate a request before any handler runs. A failed
//! extraction short-circuits with an `ApiError` response.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::request::Parts;
use axum::Json;

use super::errors::ApiError;
use super::validation::parse_user_id;

/// A validated positive-integer user id from the `:id` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub u64);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidUserId)?;
        parse_user_id(&raw).map(UserId)
    }
}

/// JSON body whose rejections use the API error envelope
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
