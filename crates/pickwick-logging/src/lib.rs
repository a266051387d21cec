// ABOUTME: Public API for pickwick logging infrastructure using tokio-tracing
// ABOUTME: Centralized configuration and initialization for structured logging

pub mod config;
pub mod subscriber;

// Re-export tracing macros for convenience
pub use tracing::{Level, Span, debug, error, info, instrument, span, trace, warn};

pub use config::{LogLevel, LoggingConfig};
pub use subscriber::init_subscriber;

use anyhow::Result;

/// Initialize logging with environment-derived configuration.
///
/// Reads `PICKWICK_LOG` / `RUST_LOG` and the other `PICKWICK_LOG_*`
/// overrides, then installs the global subscriber.
pub fn init_logging() -> Result<()> {
    init_subscriber(LoggingConfig::from_env()?)
}

/// Initialize logging with an explicit configuration.
pub fn init_logging_with_config(config: LoggingConfig) -> Result<()> {
    init_subscriber(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_tolerant_of_reinitialization() {
        // A second init fails with "already set"; neither call may panic.
        let _ = init_logging();
        let _ = init_logging();
    }

    #[test]
    fn macros_are_reexported() {
        info!("info through the facade");
        debug!(count = 2, "debug with a structured field");
    }
}
