//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the flipcheck tracing/logging system.
///
/// Reads the `FLIPCHECK_LOG` environment variable for per-crate log levels.
/// Format: `FLIPCHECK_LOG=flipcheck_storage=debug,flipcheck_analysis=warn`
///
/// Falls back to `info` for every flipcheck crate if `FLIPCHECK_LOG` is not
/// set or is invalid. Output goes to stderr so stdout stays usable for data.
///
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        // try_init: a host process may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .try_init();
    });
}
