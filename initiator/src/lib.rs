//! Container initiator for test fixtures.
//!
//! A fixture only needs three things from the container runtime: create a
//! container from an image, tell whether it is ready, and report the
//! `host:port` its exposed port is mapped to. [`ContainerInitiator`] and
//! [`ContainerRef`] capture exactly that, so fixtures can be exercised
//! against an in-memory initiator in unit tests and against Docker
//! ([`DockerInitiator`]) in integration tests.
//!
//! Containers started by [`DockerInitiator`] are removed when the returned
//! [`DockerContainer`] is dropped.

mod container_spec;
mod docker;
mod probe;
mod traits;

pub use container_spec::{ContainerSpec, parse_exposed_port, split_image_reference};
pub use docker::{DockerContainer, DockerInitiator};
pub use errors::InitiatorError;
pub use probe::HttpProbe;
pub use traits::{ContainerInitiator, ContainerRef};
