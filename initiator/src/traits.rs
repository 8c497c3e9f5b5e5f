use crate::container_spec::ContainerSpec;
use async_trait::async_trait;
use errors::InitiatorError;
use std::time::Duration;

/// A live container created by a [`ContainerInitiator`].
///
/// Teardown belongs to the initiator's implementation, not to holders of
/// this reference.
pub trait ContainerRef: Send + Sync {
    /// Runtime identifier of the container.
    fn id(&self) -> &str;

    /// `host:port` the exposed container port is reachable at.
    fn host_port(&self) -> &str;
}

/// Creates containers and probes them for readiness.
#[async_trait]
pub trait ContainerInitiator: Send + Sync {
    type Container: ContainerRef;

    async fn create_container(
        &self,
        spec: &ContainerSpec,
    ) -> Result<Self::Container, InitiatorError>;

    /// Resolves once the container answers, or fails when `timeout` elapses.
    async fn probe_ready(
        &self,
        container: &Self::Container,
        timeout: Duration,
    ) -> Result<(), InitiatorError>;
}
