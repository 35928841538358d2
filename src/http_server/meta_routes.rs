//! Service Metadata Routes
//!
//! The welcome page with the endpoint listing, and the health check.

use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::rest_api::{format_timestamp, route_not_found};

use super::middleware::RequestContext;
use super::state::SharedState;

/// Every route the service exposes, with a short description
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("GET /", "Service information"),
    ("GET /api/v1/users", "List users (page, limit, search)"),
    ("POST /api/v1/users", "Create a user"),
    ("GET /api/v1/users/:id", "Fetch a user"),
    ("PUT /api/v1/users/:id", "Update a user"),
    ("DELETE /api/v1/users/:id", "Delete a user"),
    ("GET /health", "Health check"),
];

/// Root response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub timestamp: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: f64,
}

/// Create the root and health routes
pub fn meta_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(index_handler).fallback(route_not_found))
        .route("/health", get(health_handler).fallback(route_not_found))
}

async fn index_handler(ctx: RequestContext) -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Welcome to the userdesk API".to_string(),
        timestamp: ctx.timestamp(),
        endpoints: ENDPOINTS.iter().copied().collect(),
    })
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: format_timestamp(Utc::now()),
        uptime: state.uptime_secs(),
    })
}
