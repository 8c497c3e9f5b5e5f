use crate::instance::PubSubInstance;
use crate::project::generate_project_id;
use config::{PubSubConfig, validate};
use errors::FixtureError;
use initiator::{ContainerInitiator, ContainerRef, ContainerSpec, DockerContainer, DockerInitiator};

/// Provisions Pub/Sub emulator containers through a [`ContainerInitiator`].
#[derive(Debug, Clone)]
pub struct PubSubProvisioner<I> {
    initiator: I
}

impl PubSubProvisioner<DockerInitiator> {
    /// Provisioner backed by the local Docker daemon.
    pub fn docker() -> Self {
        Self::new(DockerInitiator::new())
    }
}

impl<I: ContainerInitiator> PubSubProvisioner<I> {
    pub fn new(initiator: I) -> Self {
        Self { initiator }
    }

    pub fn initiator(&self) -> &I {
        &self.initiator
    }

    /// Starts an emulator container and waits until it is ready.
    ///
    /// Unset fields in `config` take their defaults. Either a ready instance
    /// is returned or nothing is: if the readiness probe fails, the container
    /// is dropped and the initiator's cleanup applies. The process
    /// environment is never touched here.
    ///
    /// An invalid configuration (for example an unparsable exposed port)
    /// fails with [`FixtureError::Configuration`] before the initiator is
    /// called, so no container is created for it.
    pub async fn provision(
        &self,
        config: PubSubConfig,
    ) -> Result<PubSubInstance<I::Container>, FixtureError> {
        let config = config.resolve();
        validate(&config).map_err(|e| FixtureError::Configuration {
            message: e.to_string()
        })?;

        let spec = ContainerSpec::new(
            config.image.clone(),
            config.cmd.clone(),
            config.exposed_port.clone(),
        );

        let container = self
            .initiator
            .create_container(&spec)
            .await
            .map_err(|source| FixtureError::Creation {
                image: config.image.clone(),
                source
            })?;

        let project = generate_project_id();

        if let Err(source) = self
            .initiator
            .probe_ready(&container, config.probe_timeout)
            .await
        {
            tracing::warn!(
                "Pub/Sub emulator {} at {} failed readiness probe: {}",
                container.id(),
                container.host_port(),
                source
            );
            return Err(FixtureError::Readiness {
                address: container.host_port().to_string(),
                timeout_ms: u64::try_from(config.probe_timeout.as_millis()).unwrap_or(u64::MAX),
                source
            });
        }

        tracing::info!(
            "Pub/Sub emulator ready at {} for project {}",
            container.host_port(),
            project
        );

        Ok(PubSubInstance::new(container, project, config))
    }
}

/// Starts a Pub/Sub emulator container on the local Docker daemon.
pub async fn pubsub(config: PubSubConfig) -> Result<PubSubInstance<DockerContainer>, FixtureError> {
    PubSubProvisioner::docker().provision(config).await
}
