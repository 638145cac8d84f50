//! Logging setup
//!
//! The library only emits `tracing` events. Applications embedding it can call
//! [`init_logging`] once to install a fmt subscriber filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

use formsync_core::{FormSyncError, FormSyncResult};

/// Log line format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is unset
    pub default_directive: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            format: LogFormat::Pretty,
            default_directive: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Decision-level logging for the sync crates
    pub fn verbose() -> Self {
        LoggingConfig {
            format: LogFormat::Pretty,
            default_directive: "info,formsync_runtime=debug,formsync_state=trace".to_string(),
        }
    }

    pub fn json() -> Self {
        LoggingConfig {
            format: LogFormat::Json,
            ..LoggingConfig::default()
        }
    }
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` when a global subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> FormSyncResult<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.default_directive)
            .map_err(|e| FormSyncError::Logging(e.to_string()))?,
    };

    let installed = match config.format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
    };

    Ok(installed.is_ok())
}
