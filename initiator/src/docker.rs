use crate::container_spec::{ContainerSpec, parse_exposed_port, split_image_reference};
use crate::probe::HttpProbe;
use crate::traits::{ContainerInitiator, ContainerRef};
use async_trait::async_trait;
use errors::InitiatorError;
use std::time::Duration;
use testcontainers::core::WaitFor;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

/// A container started through Docker.
///
/// The container is stopped and removed when this value is dropped.
pub struct DockerContainer {
    container: ContainerAsync<GenericImage>,
    host_port: String
}

impl std::fmt::Debug for DockerContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockerContainer")
            .field("id", &self.container.id())
            .field("host_port", &self.host_port)
            .finish()
    }
}

impl ContainerRef for DockerContainer {
    fn id(&self) -> &str {
        self.container.id()
    }

    fn host_port(&self) -> &str {
        &self.host_port
    }
}

/// [`ContainerInitiator`] backed by the local Docker daemon via
/// `testcontainers`, with readiness checked by an [`HttpProbe`].
#[derive(Debug, Clone, Default)]
pub struct DockerInitiator {
    probe: HttpProbe
}

impl DockerInitiator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_probe(mut self, probe: HttpProbe) -> Self {
        self.probe = probe;
        self
    }
}

#[async_trait]
impl ContainerInitiator for DockerInitiator {
    type Container = DockerContainer;

    async fn create_container(
        &self,
        spec: &ContainerSpec,
    ) -> Result<DockerContainer, InitiatorError> {
        let (name, tag) = split_image_reference(&spec.image)?;
        let port = parse_exposed_port(&spec.exposed_port)?;

        tracing::info!("Starting container from {}:{} exposing {}", name, tag, spec.exposed_port);

        let container = GenericImage::new(name, tag)
            .with_exposed_port(port)
            .with_wait_for(WaitFor::Nothing)
            .with_cmd(spec.cmd.clone())
            .start()
            .await
            .map_err(|e| InitiatorError::Runtime {
                image: spec.image.clone(),
                reason: e.to_string()
            })?;

        let port_mapping_error = |e: testcontainers::TestcontainersError| InitiatorError::PortMapping {
            port: spec.exposed_port.clone(),
            reason: e.to_string()
        };
        let host = container.get_host().await.map_err(port_mapping_error)?;
        let mapped = container
            .get_host_port_ipv4(port)
            .await
            .map_err(port_mapping_error)?;

        let host_port = format!("{}:{}", host, mapped);
        tracing::info!("Container {} reachable at {}", container.id(), host_port);

        Ok(DockerContainer {
            container,
            host_port
        })
    }

    async fn probe_ready(
        &self,
        container: &DockerContainer,
        timeout: Duration,
    ) -> Result<(), InitiatorError> {
        self.probe.probe(container.host_port(), timeout).await
    }
}
