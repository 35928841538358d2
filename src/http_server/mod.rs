//! # HTTP Server Module
//!
//! Axum server for the user API. Combines the metadata routes and the
//! versioned user routes behind the shared middleware stack.
//!
//! # Endpoints
//!
//! - `/` - Service information and endpoint listing
//! - `/health` - Health check
//! - `/api/v1/users` - User CRUD

pub mod config;
pub mod meta_routes;
pub mod middleware;
pub mod server;
pub mod state;

pub use config::{HttpServerConfig, LogFormat};
pub use middleware::{RequestContext, API_VERSION};
pub use server::{build_router, usage_text, HttpServer};
pub use state::{AppState, SharedState};
