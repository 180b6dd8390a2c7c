//! # Logging Setup
//!
//! The library logs through the `log` facade. Binaries pick a backend here:
//! `env_logger` for plain text, or a `tracing-subscriber` JSON formatter
//! (which picks up `log` records through its log bridge). Both write to
//! stderr and honor `RUST_LOG`.

use anyhow::{anyhow, Result};
use std::env;
use std::io;
use tracing_subscriber::EnvFilter;

pub const ENV_LOG_FORMAT: &str = "GROCERY_LOG_FORMAT";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Output format for log records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Format named by `GROCERY_LOG_FORMAT`, text unless it says `json`
    pub fn from_env() -> Self {
        Self::from_name(env::var(ENV_LOG_FORMAT).ok().as_deref())
    }

    fn from_name(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_lowercase()) {
            Some(n) if n == "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Install the global logger
pub fn init_logging(format: LogFormat) -> Result<()> {
    match format {
        LogFormat::Text => env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER),
        )
        .try_init()
        .map_err(|err| anyhow!("failed to initialize logger: {err}")),
        LogFormat::Json => {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init()
                .map_err(|err| anyhow!("failed to initialize JSON logger: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_names() {
        assert_eq!(LogFormat::from_name(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::from_name(Some(" JSON ")), LogFormat::Json);
        assert_eq!(LogFormat::from_name(Some("pretty")), LogFormat::Text);
        assert_eq!(LogFormat::from_name(None), LogFormat::Text);
    }
}
