//! Structured logging setup.

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, filter::ParseError, fmt};

/// Filter used when neither the configuration nor `RUST_LOG` sets one.
pub const DEFAULT_FILTER: &str = "taskflow=info";

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directives do not parse.
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    /// A global subscriber is already installed.
    #[error("logging already initialised: {0}")]
    Init(#[from] TryInitError),
}

/// Builds the log filter: `configured` when given, otherwise `RUST_LOG`,
/// otherwise [`DEFAULT_FILTER`].
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when `configured` does not parse.
pub fn filter(configured: Option<&str>) -> Result<EnvFilter, TelemetryError> {
    match configured {
        Some(directives) => Ok(EnvFilter::try_new(directives)?),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Installs a global `tracing` subscriber that writes to stderr.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or a subscriber is
/// already installed.
pub fn init(configured: Option<&str>) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(filter(configured)?)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}
