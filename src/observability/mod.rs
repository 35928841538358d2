//! Observability for userdesk
//!
//! Structured logging through `tracing`. The subscriber is installed once
//! at startup; library code only emits events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. Logging failure never stops the server
//! 3. One log line = one event

mod logger;

pub use logger::{build_filter, init_logging, DEFAULT_DIRECTIVE};
