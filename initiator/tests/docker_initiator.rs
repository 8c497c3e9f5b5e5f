//! Integration tests for the Docker-backed initiator.
//!
//! These need a running Docker daemon and pull the emulator image, so they
//! are ignored by default: `cargo test -p initiator -- --ignored`.

use initiator::{ContainerInitiator, ContainerRef, ContainerSpec, DockerInitiator, InitiatorError};
use std::time::Duration;

fn emulator_spec() -> ContainerSpec {
    ContainerSpec::new(
        "storytel/google-cloud-pubsub-emulator",
        vec!["--host=0.0.0.0".to_string(), "--port=8262".to_string()],
        "8262",
    )
}

#[tokio::test]
#[ignore]
async fn test_docker_initiator_starts_and_probes_emulator() {
    let initiator = DockerInitiator::new();

    let container = match initiator.create_container(&emulator_spec()).await {
        Ok(container) => container,
        Err(e) => {
            eprintln!("Skipping Docker test: {}", e);
            return;
        }
    };

    assert!(!container.id().is_empty());
    let (host, port) = container
        .host_port()
        .rsplit_once(':')
        .expect("host_port should be host:port");
    assert!(!host.is_empty());
    assert!(port.parse::<u16>().is_ok());

    initiator
        .probe_ready(&container, Duration::from_secs(30))
        .await
        .expect("emulator should answer within 30s");
}

#[tokio::test]
async fn test_docker_initiator_rejects_invalid_port_before_starting() {
    let spec = ContainerSpec::new("storytel/google-cloud-pubsub-emulator", vec![], "not-a-port");

    let result = DockerInitiator::new().create_container(&spec).await;
    assert!(matches!(result, Err(InitiatorError::InvalidSpec { .. })));
}
