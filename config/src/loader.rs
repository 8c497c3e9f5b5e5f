//! # Environment Variable Loader
//!
//! Loads fixture configuration from environment variables so CI jobs can
//! swap the emulator image or loosen the probe timeout without code changes.
//!
//! # Naming Convention
//! - `PUBSUB_FIXTURE_IMAGE`: Image reference
//! - `PUBSUB_FIXTURE_CMD`: Container arguments, whitespace separated
//! - `PUBSUB_FIXTURE_EXPOSED_PORT`: Container port
//! - `PUBSUB_FIXTURE_PROBE_TIMEOUT_MS`: Readiness probe timeout in milliseconds
//! - `PUBSUB_FIXTURE_CONFIG_FILE`: Optional config file, see
//!   [`load_layered`](crate::precedence::load_layered)

use crate::config::PubSubConfig;
use std::env;

pub const ENV_IMAGE: &str = "PUBSUB_FIXTURE_IMAGE";
pub const ENV_CMD: &str = "PUBSUB_FIXTURE_CMD";
pub const ENV_EXPOSED_PORT: &str = "PUBSUB_FIXTURE_EXPOSED_PORT";
pub const ENV_PROBE_TIMEOUT_MS: &str = "PUBSUB_FIXTURE_PROBE_TIMEOUT_MS";
pub const ENV_CONFIG_FILE: &str = "PUBSUB_FIXTURE_CONFIG_FILE";

/// Environment configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {variable}: {value:?} ({reason})")]
    InvalidValue {
        variable: String,
        value: String,
        reason: String
    },

    #[error("Failed to load config file {path}")]
    File {
        path: String,
        #[source]
        source: crate::file_loader::ConfigFileError
    }
}

/// Load configuration from environment variables.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Reads the `PUBSUB_FIXTURE_*` variables. A variable that is not set leaves
/// its field unset, so the default still applies after
/// [`PubSubConfig::resolve`].
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_env;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_from_env()?.resolve();
///     println!("Emulator image: {}", config.image);
///     Ok(())
/// }
/// ```
///
/// ## Errors
/// Returns [`ConfigError::InvalidValue`] if the timeout is not a number.
pub fn load_from_env() -> Result<PubSubConfig, ConfigError> {
    Ok(PubSubConfig {
        image: env::var(ENV_IMAGE).unwrap_or_default(),
        cmd: env::var(ENV_CMD)
            .map(|cmd| cmd.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default(),
        exposed_port: env::var(ENV_EXPOSED_PORT).unwrap_or_default(),
        probe_timeout_ms: parse_env(ENV_PROBE_TIMEOUT_MS)?.unwrap_or(0)
    })
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display
{
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map(Some)
                .map_err(|e: T::Err| ConfigError::InvalidValue {
                    variable: key.to_string(),
                    value,
                    reason: e.to_string()
                })
        }
        _ => Ok(None)
    }
}
