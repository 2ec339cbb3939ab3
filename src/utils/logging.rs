//! `tracing` subscriber bootstrap for hosts that do not install their own.

use thiserror::Error;
use tracing_subscriber::filter::{EnvFilter, ParseError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Filter used when neither the caller nor `RUST_LOG` supplies one.
pub const DEFAULT_FILTER: &str = "stark_verifier=info";

/// Why the subscriber could not be installed.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter `{directive}`: {source}")]
    Filter {
        directive: String,
        #[source]
        source: ParseError,
    },
    #[error("failed to install tracing subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Resolves the filter directive: the explicit one if non-blank, then
/// `RUST_LOG`, then [`DEFAULT_FILTER`].
pub fn env_filter(directive: Option<&str>) -> Result<EnvFilter, LoggingError> {
    let directive = match directive.map(str::trim) {
        Some(explicit) if !explicit.is_empty() => explicit.to_owned(),
        _ => std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| DEFAULT_FILTER.to_owned()),
    };
    EnvFilter::try_new(&directive).map_err(|source| LoggingError::Filter { directive, source })
}

/// Installs a compact formatter behind [`env_filter`] as the global
/// subscriber. Fails if the process already has one.
pub fn init_tracing(directive: Option<&str>) -> Result<(), LoggingError> {
    let filter = env_filter(directive)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact().with_target(true))
        .try_init()?;
    Ok(())
}
