//! Tracing subscriber setup for hosts that embed the widget.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter \"{filter}\": {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: ParseError,
    },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Installs a fmt subscriber. `RUST_LOG` wins over `log_level` when set.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] if neither `RUST_LOG` nor
/// `log_level` is a valid filter, or [`TelemetryError::AlreadyInstalled`]
/// if a global subscriber exists.
pub fn init_tracing(log_level: &str) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|source| TelemetryError::InvalidFilter {
            filter: log_level.to_owned(),
            source,
        })?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .map_err(|_| TelemetryError::AlreadyInstalled)
}
