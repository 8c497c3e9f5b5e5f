//! # Fixture Errors
//!
//! Error handling for the Pub/Sub emulator test fixture.
//!
//! - Uses `thiserror` for structured error definitions
//! - Named fields carry the context needed to debug a failed container run
//! - Errors from the container initiator are kept as `#[source]` so callers
//!   can walk the full chain

use thiserror::Error;

/// Errors raised by a container initiator (the collaborator that talks to
/// the container runtime).
#[derive(Debug, Error)]
pub enum InitiatorError {
    #[error("Invalid container spec: {reason}")]
    InvalidSpec { reason: String },

    #[error("Container runtime error for {image}: {reason}")]
    Runtime { image: String, reason: String },

    #[error("Failed to resolve host mapping for port {port}: {reason}")]
    PortMapping { port: String, reason: String },

    #[error("Probe of {address} did not succeed within {timeout_ms}ms: {last_failure}")]
    ProbeTimeout {
        address: String,
        timeout_ms: u64,
        last_failure: String
    }
}

/// Errors raised while provisioning a fixture or exporting its environment.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Invalid fixture configuration: {message}")]
    Configuration { message: String },

    #[error("Failed to create container from {image}")]
    Creation {
        image: String,
        #[source]
        source: InitiatorError
    },

    #[error("Container at {address} not ready after {timeout_ms}ms")]
    Readiness {
        address: String,
        timeout_ms: u64,
        #[source]
        source: InitiatorError
    },

    #[error("Failed to set environment variable {variable:?}: {reason}")]
    Environment { variable: String, reason: String }
}

impl FixtureError {
    /// Short, stable name of the error kind, handy for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration",
            Self::Creation { .. } => "creation",
            Self::Readiness { .. } => "readiness",
            Self::Environment { .. } => "environment"
        }
    }
}
