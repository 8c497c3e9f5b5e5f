use crate::env::{self, EnvExport, EnvGuard};
use config::ResolvedPubSubConfig;
use errors::FixtureError;
use initiator::ContainerRef;

/// A running, ready Pub/Sub emulator.
///
/// Holds the container reference handed out by the initiator; dropping the
/// instance hands the container back to the initiator's cleanup (for Docker,
/// the container is removed).
#[derive(Debug)]
pub struct PubSubInstance<C> {
    container: C,
    project: String,
    config: ResolvedPubSubConfig
}

impl<C: ContainerRef> PubSubInstance<C> {
    pub(crate) fn new(container: C, project: String, config: ResolvedPubSubConfig) -> Self {
        Self {
            container,
            project,
            config
        }
    }

    /// `host:port` of the emulator, as expected in `PUBSUB_EMULATOR_HOST`.
    pub fn host(&self) -> &str {
        self.container.host_port()
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn config(&self) -> &ResolvedPubSubConfig {
        &self.config
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn emulator_url(&self) -> String {
        format!("http://{}", self.host())
    }

    /// Sets `PUBSUB_EMULATOR_HOST` and `GOOGLE_CLOUD_PROJECT` for the whole
    /// process. The variables are left in place afterwards.
    pub fn export_environment(&self) -> Result<(), FixtureError> {
        self.export_environment_to(&EnvExport::default())
    }

    /// Like [`export_environment`](Self::export_environment) with custom
    /// variable names.
    pub fn export_environment_to(&self, export: &EnvExport) -> Result<(), FixtureError> {
        env::export(export, self.host(), &self.project)
    }

    /// Exports the default variables and restores their previous values when
    /// the returned guard is dropped.
    pub fn scoped_environment(&self) -> Result<EnvGuard, FixtureError> {
        EnvGuard::export(&EnvExport::default(), self.host(), &self.project)
    }
}
