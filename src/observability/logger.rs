//! Log subscriber setup
//!
//! Pretty output for humans, or one JSON object per line. The level filter
//! comes from `RUST_LOG` when set, otherwise `info`.

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::http_server::LogFormat;

/// Filter used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_DIRECTIVE: &str = "info,tower_http=debug";

/// Build the level filter from `RUST_LOG`, falling back to the default
pub fn build_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber
///
/// An already installed subscriber (e.g. from a test harness) is kept and
/// noted at debug level through it.
pub fn init_logging(format: LogFormat) {
    let builder = tracing_subscriber::fmt().with_env_filter(build_filter());

    let result = match format {
        LogFormat::Pretty => builder.with_target(false).try_init(),
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
    };

    if let Err(e) = result {
        debug!(error = %e, "log subscriber already installed, keeping it");
    }
}
