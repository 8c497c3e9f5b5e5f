//! Disposable Pub/Sub emulator for integration tests.
//!
//! [`pubsub`] starts a `storytel/google-cloud-pubsub-emulator` container,
//! waits until it answers HTTP and hands back a [`PubSubInstance`] with the
//! mapped `host:port` and a freshly generated project id. Client libraries
//! find the emulator through `PUBSUB_EMULATOR_HOST` and
//! `GOOGLE_CLOUD_PROJECT`, which [`PubSubInstance::export_environment`] sets.
//!
//! ```rust,no_run
//! use pubsub::{PubSubConfig, pubsub};
//!
//! # async fn run() -> Result<(), pubsub::FixtureError> {
//! let emulator = pubsub(PubSubConfig::default()).await?;
//! emulator.export_environment()?;
//! println!("emulator at {} for {}", emulator.host(), emulator.project());
//! # Ok(())
//! # }
//! ```
//!
//! Environment variables are process-wide. Tests that export them should be
//! marked `#[serial]`, or use [`PubSubInstance::scoped_environment`] to put
//! the previous values back afterwards.

mod env;
mod fixtures;
mod instance;
mod logging;
mod project;
mod provisioner;

pub use config::{PubSubConfig, ResolvedPubSubConfig};
pub use env::{EMULATOR_HOST_VAR, EnvExport, EnvGuard, PROJECT_VAR};
pub use errors::FixtureError;
pub use fixtures::shared_pubsub;
pub use instance::PubSubInstance;
pub use logging::init_tracing;
pub use project::{PROJECT_PREFIX, generate_project_id, is_project_id, unique_id};
pub use provisioner::{PubSubProvisioner, pubsub};
