use errors::InitiatorError;
use testcontainers::core::ContainerPort;

const DEFAULT_TAG: &str = "latest";

/// What to launch: image, command and the container port to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub image: String,
    pub cmd: Vec<String>,
    pub exposed_port: String
}

impl ContainerSpec {
    pub fn new(image: impl Into<String>, cmd: Vec<String>, exposed_port: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            cmd,
            exposed_port: exposed_port.into()
        }
    }
}

/// Splits `name[:tag]` into its name and tag, defaulting the tag to `latest`.
///
/// A colon before the last `/` belongs to a registry host
/// (`localhost:5000/emulator`), not to the tag.
pub fn split_image_reference(image: &str) -> Result<(&str, &str), InitiatorError> {
    if image.is_empty() {
        return Err(InitiatorError::InvalidSpec {
            reason: "image reference is empty".to_string()
        });
    }
    if image.contains('@') {
        return Err(InitiatorError::InvalidSpec {
            reason: format!("digest references are not supported: {}", image)
        });
    }

    let name_start = image.rfind('/').map_or(0, |i| i + 1);
    match image[name_start..].rfind(':') {
        Some(offset) => {
            let split = name_start + offset;
            let (name, tag) = (&image[..split], &image[split + 1..]);
            if name.is_empty() || tag.is_empty() {
                return Err(InitiatorError::InvalidSpec {
                    reason: format!("malformed image reference: {}", image)
                });
            }
            Ok((name, tag))
        }
        None => Ok((image, DEFAULT_TAG))
    }
}

/// Parses `PORT` or `PORT/PROTO` (tcp, udp) into a container port.
pub fn parse_exposed_port(port: &str) -> Result<ContainerPort, InitiatorError> {
    let invalid = || InitiatorError::InvalidSpec {
        reason: format!("invalid exposed port: {:?}", port)
    };

    let (number, protocol) = port.split_once('/').unwrap_or((port, "tcp"));
    let number: u16 = number.parse().map_err(|_| invalid())?;
    if number == 0 {
        return Err(invalid());
    }

    match protocol {
        "tcp" => Ok(ContainerPort::Tcp(number)),
        "udp" => Ok(ContainerPort::Udp(number)),
        _ => Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_image_without_tag() {
        let (name, tag) = split_image_reference("storytel/google-cloud-pubsub-emulator").unwrap();
        assert_eq!(name, "storytel/google-cloud-pubsub-emulator");
        assert_eq!(tag, "latest");
    }

    #[test]
    fn test_split_image_with_tag() {
        let (name, tag) =
            split_image_reference("gcr.io/google.com/cloudsdktool/cloud-sdk:emulators").unwrap();
        assert_eq!(name, "gcr.io/google.com/cloudsdktool/cloud-sdk");
        assert_eq!(tag, "emulators");
    }

    #[test]
    fn test_split_image_with_registry_port() {
        let (name, tag) = split_image_reference("localhost:5000/pubsub-emulator").unwrap();
        assert_eq!(name, "localhost:5000/pubsub-emulator");
        assert_eq!(tag, "latest");

        let (name, tag) = split_image_reference("localhost:5000/pubsub-emulator:v2").unwrap();
        assert_eq!(name, "localhost:5000/pubsub-emulator");
        assert_eq!(tag, "v2");
    }

    #[test]
    fn test_split_image_rejects_malformed() {
        assert!(split_image_reference("").is_err());
        assert!(split_image_reference("emulator:").is_err());
        assert!(split_image_reference("emulator@sha256:abcd").is_err());
    }

    #[test]
    fn test_parse_exposed_port() {
        assert_eq!(parse_exposed_port("8262").unwrap(), ContainerPort::Tcp(8262));
        assert_eq!(parse_exposed_port("8262/tcp").unwrap(), ContainerPort::Tcp(8262));
        assert_eq!(parse_exposed_port("53/udp").unwrap(), ContainerPort::Udp(53));
        assert!(parse_exposed_port("").is_err());
        assert!(parse_exposed_port("0").is_err());
        assert!(parse_exposed_port("65536").is_err());
        assert!(parse_exposed_port("8262/sctp").is_err());
    }
}
