//! # Configuration Structures
//!
//! [`PubSubConfig`] is what callers fill in: any field may be left empty.
//! [`PubSubConfig::resolve`] applies the defaults and yields a
//! [`ResolvedPubSubConfig`] in which every field is set.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Image used when [`PubSubConfig::image`] is left empty.
pub const DEFAULT_IMAGE: &str = "storytel/google-cloud-pubsub-emulator";

/// Command used when [`PubSubConfig::cmd`] is left empty.
pub const DEFAULT_CMD: [&str; 2] = ["--host=0.0.0.0", "--port=8262"];

/// Container port used when [`PubSubConfig::exposed_port`] is left empty.
pub const DEFAULT_EXPOSED_PORT: &str = "8262";

/// Probe timeout used when [`PubSubConfig::probe_timeout_ms`] is zero.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for a Pub/Sub emulator container.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Describes the container to launch. Every field is optional: an empty
/// string, an empty list, or a zero timeout means "use the default".
///
/// ## Usage
/// ```rust
/// use config::PubSubConfig;
///
/// let resolved = PubSubConfig::default().resolve();
/// assert_eq!(resolved.exposed_port, "8262");
/// ```
///
/// ## Fields
/// - `image`: Image reference (default: `storytel/google-cloud-pubsub-emulator`)
/// - `cmd`: Arguments passed to the container (default:
///   `--host=0.0.0.0 --port=8262`)
/// - `exposed_port`: Container port to map to the host (default: `8262`)
/// - `probe_timeout_ms`: How long the readiness probe may take before
///   provisioning fails (default: 10 seconds)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PubSubConfig {
    /// Image reference, `name` or `name:tag`
    #[serde(default)]
    pub image: String,

    /// Arguments run in the container
    #[serde(default)]
    pub cmd: Vec<String>,

    /// Exposed container port, `PORT` or `PORT/PROTO`
    #[serde(default)]
    pub exposed_port: String,

    /// Readiness probe timeout in milliseconds, zero means unset
    #[serde(default)]
    pub probe_timeout_ms: u64
}

impl PubSubConfig {
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_cmd<I, S>(mut self, cmd: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        self.cmd = cmd.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exposed_port(mut self, port: impl Into<String>) -> Self {
        self.exposed_port = port.into();
        self
    }

    /// Sets the probe timeout. A non-zero timeout below one millisecond is
    /// rounded up to 1ms, since zero means unset.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_millis().max(u128::from(!timeout.is_zero()));
        self.probe_timeout_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    /// Replaces every unset field with its default.
    pub fn resolve(self) -> ResolvedPubSubConfig {
        let image = if self.image.is_empty() {
            DEFAULT_IMAGE.to_string()
        } else {
            self.image
        };

        let cmd = if self.cmd.is_empty() {
            DEFAULT_CMD.iter().map(|arg| (*arg).to_string()).collect()
        } else {
            self.cmd
        };

        let exposed_port = if self.exposed_port.is_empty() {
            DEFAULT_EXPOSED_PORT.to_string()
        } else {
            self.exposed_port
        };

        let probe_timeout = if self.probe_timeout_ms == 0 {
            DEFAULT_PROBE_TIMEOUT
        } else {
            Duration::from_millis(self.probe_timeout_ms)
        };

        ResolvedPubSubConfig {
            image,
            cmd,
            exposed_port,
            probe_timeout
        }
    }
}

/// A [`PubSubConfig`] with every default applied.
#[derive(Debug, Clone, Validate, PartialEq, Eq)]
pub struct ResolvedPubSubConfig {
    #[validate(length(min = 1, max = 255))]
    pub image: String,

    #[validate(length(min = 1))]
    pub cmd: Vec<String>,

    #[validate(custom(function = "validate_exposed_port"))]
    pub exposed_port: String,

    #[validate(custom(function = "validate_probe_timeout"))]
    pub probe_timeout: Duration
}

fn validate_exposed_port(value: &str) -> Result<(), validator::ValidationError> {
    initiator::parse_exposed_port(value)
        .map(|_| ())
        .map_err(|_| validator::ValidationError::new("Invalid exposed port"))
}

fn validate_probe_timeout(value: &Duration) -> Result<(), validator::ValidationError> {
    if value.is_zero() {
        return Err(validator::ValidationError::new("Probe timeout must be positive"));
    }
    Ok(())
}
