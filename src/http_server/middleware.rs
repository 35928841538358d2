//! # Request Middleware
//!
//! Stamps each request with its arrival time and an id, and tags requests
//! under the versioned API prefix. Handlers read the result through the
//! `RequestContext` extractor.

use std::any::Any;
use std::convert::Infallible;

use axum::async_trait;
use axum::extract::{FromRequestParts, Request};
use axum::http::header::HeaderValue;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

use crate::rest_api::{format_timestamp, ApiError};

/// Version tag attached to every response under `/api/v1`
pub const API_VERSION: &str = "v1";

/// Response header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request metadata
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub request_time: DateTime<Utc>,
    pub api_version: Option<&'static str>,
}

impl RequestContext {
    /// Fresh context stamped with the current time
    pub fn now() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            request_time: Utc::now(),
            api_version: None,
        }
    }

    pub fn with_api_version(mut self, version: &'static str) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Request time as an RFC 3339 string with millisecond precision
    pub fn timestamp(&self) -> String {
        format_timestamp(self.request_time)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_else(RequestContext::now))
    }
}

/// Attach a `RequestContext` and echo its id in the response headers
pub async fn stamp_request(mut req: Request, next: Next) -> Response {
    let ctx = RequestContext::now();
    info!(
        request_id = %ctx.request_id,
        method = %req.method(),
        path = %req.uri().path(),
        "request received"
    );

    req.extensions_mut().insert(ctx.clone());
    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&ctx.request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Tag the request context with the API version
pub async fn tag_api_version(mut req: Request, next: Next) -> Response {
    let ctx = req
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_else(RequestContext::now)
        .with_api_version(API_VERSION);
    req.extensions_mut().insert(ctx);
    next.run(req).await
}

/// Turn a handler panic into a 500 response carrying the panic message
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Something went wrong!".to_string()
    };

    error!(panic = %message, "handler panicked");
    ApiError::Internal(message).into_response()
}
