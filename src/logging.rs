//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with command output. The default
//! level comes from the config file and `RUST_LOG` overrides it.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // try_init: a second call (e.g. from tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}
