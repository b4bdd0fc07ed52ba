//! Process-wide `tracing` subscriber.

use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter {
        directive: String,
        source: ParseError,
    },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { directive, source } => {
                write!(f, "log filter '{directive}' is not valid: {source}")
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "could not install the log subscriber: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(err.as_ref()),
        }
    }
}

/// Installs compact, uncoloured logging. `RUST_LOG` wins over the configured level.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let directive = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = resolve_filter(directive.as_deref(), &config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

/// A usable override is taken as is; an unusable one falls back to the
/// configured level, which must itself parse.
fn resolve_filter(
    override_directive: Option<&str>,
    fallback: &str,
) -> Result<EnvFilter, TelemetryError> {
    if let Some(filter) = override_directive.and_then(|directive| EnvFilter::try_new(directive).ok())
    {
        return Ok(filter);
    }

    EnvFilter::try_new(fallback).map_err(|source| TelemetryError::InvalidFilter {
        directive: fallback.to_string(),
        source,
    })
}
