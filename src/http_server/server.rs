//! # HTTP Server
//!
//! Main HTTP server combining the metadata routes and the versioned user
//! API behind the shared middleware stack.

use std::net::SocketAddr;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::middleware::from_fn;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::rest_api::{route_not_found, user_routes};

use super::config::HttpServerConfig;
use super::meta_routes::{meta_routes, ENDPOINTS};
use super::middleware::{panic_response, stamp_request, tag_api_version};
use super::state::{AppState, SharedState};

/// HTTP Server for the user API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration and seed data
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration and seed data
    pub fn with_config(config: HttpServerConfig) -> Self {
        Self::with_state(config, AppState::seeded().shared())
    }

    /// Create a new HTTP server over an existing state
    pub fn with_state(config: HttpServerConfig, state: SharedState) -> Self {
        let router = build_router(&config, state);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server and run until Ctrl-C or SIGTERM
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "userdesk listening");
        info!("API index: http://{}/", addr);
        info!("Health check: http://{}/health", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("server stopped");
        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the combined router with all endpoints and middleware
pub fn build_router(config: &HttpServerConfig, state: SharedState) -> Router {
    Router::new()
        .merge(meta_routes())
        .nest("/api/v1", user_routes().layer(from_fn(tag_api_version)))
        .fallback(route_not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(from_fn(stamp_request))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
}

/// CORS from config: listed origins with credentials, or any origin when empty
fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                warn!(origin = %s, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Resolve when the process receives Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}

/// Usage instructions printed by `userdesk routes`
pub fn usage_text(port: u16) -> String {
    let base = format!("http://localhost:{}", port);
    let mut out = String::from("Endpoints:\n");
    for (route, description) in ENDPOINTS {
        out.push_str(&format!("  {:<28} {}\n", route, description));
    }
    out.push_str("\nExamples:\n");
    out.push_str(&format!("  curl {}/api/v1/users\n", base));
    out.push_str(&format!(
        "  curl '{}/api/v1/users?page=1&limit=5&search=example'\n",
        base
    ));
    out.push_str(&format!(
        "  curl -X POST {}/api/v1/users -H 'Content-Type: application/json' \\\n       -d '{{\"name\": \"New User\", \"email\": \"new@example.com\", \"age\": 25}}'\n",
        base
    ));
    out.push_str(&format!("  curl {}/api/v1/users/1\n", base));
    out.push_str(&format!(
        "  curl -X PUT {}/api/v1/users/1 -H 'Content-Type: application/json' \\\n       -d '{{\"name\": \"Renamed\", \"age\": 30}}'\n",
        base
    ));
    out.push_str(&format!("  curl -X DELETE {}/api/v1/users/1\n", base));
    out
}
