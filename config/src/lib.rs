//! # Fixture Configuration
//!
//! Configuration for the Pub/Sub emulator test fixture.
//!
//! This crate provides:
//! - The [`PubSubConfig`] structure and its resolved form
//! - Environment variable loading (`PUBSUB_FIXTURE_*`)
//! - Configuration file loading (TOML/YAML)
//! - Configuration precedence (explicit > env > file > defaults)
//! - Validation of the resolved configuration
//!
//! Every field is optional. Unset fields fall back to the documented
//! defaults when the configuration is resolved.

pub mod config;
pub mod file_loader;
pub mod loader;
pub mod precedence;
pub mod validation;

pub use config::{
    DEFAULT_CMD, DEFAULT_EXPOSED_PORT, DEFAULT_IMAGE, DEFAULT_PROBE_TIMEOUT, PubSubConfig,
    ResolvedPubSubConfig,
};
pub use file_loader::{ConfigFileError, load_from_file, load_from_toml, load_from_yaml};
pub use loader::{ConfigError, load_from_env};
pub use precedence::{load_layered, merge_configs};
pub use validation::validate;
