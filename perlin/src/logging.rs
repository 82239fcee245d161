//! Log output setup for the preview tool.

use std::io;

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Installs the global subscriber. `log` records from the library crates are
/// forwarded to it.
///
/// `RUST_LOG` takes precedence over the configured level. Output goes to stderr
/// so the preview on stdout stays clean.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.color)
        .with_target(false)
        .with_writer(io::stderr);

    let result = if config.timestamp {
        builder.try_init()
    } else {
        builder.without_time().try_init()
    };
    result.map_err(|err| anyhow!("failed to install logger: {err}"))
}
