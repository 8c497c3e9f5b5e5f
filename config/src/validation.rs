//! # Configuration Validation
//!
//! Validates resolved fixture configuration using the `validator` crate.

use crate::config::ResolvedPubSubConfig;
use validator::Validate;

/// Validate a resolved configuration.
///
/// ## Validation Rules
/// - `image`: 1-255 characters
/// - `cmd`: at least one argument
/// - `exposed_port`: `PORT`, `PORT/tcp` or `PORT/udp` with PORT in 1-65535
/// - `probe_timeout`: greater than zero
pub fn validate(config: &ResolvedPubSubConfig) -> Result<(), validator::ValidationErrors> {
    config.validate()
}
