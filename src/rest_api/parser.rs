//! # Query Parameter Parser
//!
//! Parses the list endpoint's query string into a structured query.

use std::collections::HashMap;

use super::validation::parse_leading_int;

/// Page size if not specified
pub const DEFAULT_LIMIT: usize = 10;

/// Page if not specified
pub const DEFAULT_PAGE: usize = 1;

/// Parsed list query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number
    pub page: usize,

    /// Records per page
    pub limit: usize,

    /// Substring matched against name or email
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
        }
    }
}

impl ListQuery {
    /// Parse query parameters from a HashMap.
    ///
    /// Never fails: a `page` or `limit` without a positive leading integer
    /// falls back to its default, and unknown keys are ignored.
    pub fn parse(params: &HashMap<String, String>) -> Self {
        let mut result = ListQuery::default();

        for (key, value) in params {
            match key.as_str() {
                "page" => result.page = positive_or(value, DEFAULT_PAGE),
                "limit" => result.limit = positive_or(value, DEFAULT_LIMIT),
                "search" if !value.is_empty() => result.search = Some(value.clone()),
                _ => {}
            }
        }

        result
    }

    /// Index of the first record on the requested page
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn positive_or(value: &str, default: usize) -> usize {
    parse_leading_int(value)
        .and_then(|n| usize::try_from(n).ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}
