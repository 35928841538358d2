//! # Response Formatting
//!
//! Standard envelopes for REST API responses.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::http_server::middleware::RequestContext;

/// RFC 3339 with millisecond precision and a `Z` suffix, the format every
/// response body timestamp uses
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Pagination metadata for list responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
}

impl Pagination {
    pub fn new(page: usize, limit: usize, total_items: usize) -> Self {
        Self {
            current_page: page,
            total_pages: total_items.div_ceil(limit),
            total_items,
            items_per_page: limit,
        }
    }
}

/// Success envelope
///
/// Every success body carries `data` plus the request timestamp and API
/// version stamped by the request middleware.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,

    pub data: T,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<&'static str>,

    pub timestamp: String,
}

impl<T: Serialize> Envelope<T> {
    /// Envelope carrying only data
    pub fn new(data: T, ctx: &RequestContext) -> Self {
        Self {
            message: None,
            data,
            pagination: None,
            api_version: ctx.api_version,
            timestamp: ctx.timestamp(),
        }
    }

    /// Envelope with a human-readable message
    pub fn with_message(message: &'static str, data: T, ctx: &RequestContext) -> Self {
        Self {
            message: Some(message),
            ..Self::new(data, ctx)
        }
    }

    /// Envelope for a page of a list
    pub fn paginated(data: T, pagination: Pagination, ctx: &RequestContext) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::new(data, ctx)
        }
    }
}
