//! Structured logging.
//!
//! # Responsibilities
//! - Install the global `tracing` subscriber
//! - Select pretty or JSON output from configuration
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured level when set
//! - Installing twice is an error returned to the caller, not a panic

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::{LogFormat, ObservabilityConfig};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry.with(fmt::layer().json().flatten_event(true)).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer()).try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_falls_back_to_info() {
        let config = ObservabilityConfig {
            log_level: "signature_mvc=loud".into(),
            ..ObservabilityConfig::default()
        };
        assert_eq!(default_filter(&config).to_string(), "info");
    }

    #[test]
    fn test_directives_are_kept() {
        let config = ObservabilityConfig {
            log_level: "signature_mvc=debug".into(),
            ..ObservabilityConfig::default()
        };
        assert_eq!(default_filter(&config).to_string(), "signature_mvc=debug");
    }
}
