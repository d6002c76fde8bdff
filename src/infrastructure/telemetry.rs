//! # Telemetry
//!
//! Installs the global `tracing` subscriber for the binaries.
//!
//! `RUST_LOG` takes precedence over [`LoggingSettings::level`]. The library
//! itself never installs a subscriber.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::infrastructure::config::{LogFormat, LoggingSettings};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Builds the event filter from `RUST_LOG` or the configured level.
#[must_use]
pub fn env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level))
}

/// Installs the global subscriber.
///
/// Output goes to stderr so that result documents on stdout stay
/// machine readable.
///
/// # Errors
///
/// Returns `ApplicationError::Configuration` if a global subscriber is
/// already installed.
pub fn init_tracing(settings: &LoggingSettings) -> ApplicationResult<()> {
    let filter = env_filter(settings);
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(settings.structured)
        .with_thread_ids(settings.structured);

    let installed = match settings.format {
        LogFormat::Json => builder.json().with_env_filter(filter).try_init(),
        LogFormat::Pretty => builder.pretty().with_env_filter(filter).try_init(),
        LogFormat::Compact => builder.compact().with_env_filter(filter).try_init(),
    };
    installed.map_err(|e| ApplicationError::configuration(format!("tracing: {e}")))?;

    info!(
        level = %settings.level,
        format = ?settings.format,
        structured = settings.structured,
        "logging configured"
    );
    Ok(())
}
