//! Log output for the harness.
//!
//! Library code only emits `tracing` events; the subscriber is installed
//! explicitly by whoever owns the process (the `colloquy` binary).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{ColloquyError, Result};

/// Builds the filter: `RUST_LOG` wins, otherwise the configured level.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|err| {
            ColloquyError::Configuration(format!("invalid log level `{}`: {err}", config.level))
        })
}

/// Installs the global subscriber. Logs go to stderr so the conversation on
/// stdout stays readable.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(config)?);

    let installed = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
    };

    installed.map_err(|err| {
        ColloquyError::Configuration(format!("failed to install log subscriber: {err}"))
    })
}
