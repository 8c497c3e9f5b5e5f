//! # Configuration Precedence
//!
//! Merges fixture configuration from multiple sources.
//!
//! # Precedence Order
//! 1. Explicit configuration passed by the test (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Built-in defaults, applied later by [`PubSubConfig::resolve`]

use crate::config::PubSubConfig;
use crate::file_loader::load_from_file;
use crate::loader::{ConfigError, ENV_CONFIG_FILE, load_from_env};
use std::path::Path;

/// Merge configuration sources with precedence.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Each later source overrides earlier ones field by field, but only where
/// the overriding field is set. Unset fields never clobber a value from a
/// lower-priority source.
///
/// ## Usage
/// ```rust,no_run
/// use config::{PubSubConfig, load_from_env, load_from_file, merge_configs};
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let from_file = load_from_file(Path::new("pubsub.toml"))?;
///     let from_env = load_from_env()?;
///
///     let config = merge_configs(
///         [
///             (from_file, "file"),
///             (from_env, "env"),
///             (PubSubConfig::default().with_exposed_port("8085"), "explicit"),
///         ],
///     );
///     println!("{:?}", config.resolve());
///     Ok(())
/// }
/// ```
pub fn merge_configs<'a, I>(sources: I) -> PubSubConfig
where
    I: IntoIterator<Item = (PubSubConfig, &'a str)>
{
    sources
        .into_iter()
        .fold(PubSubConfig::default(), |base, (config, source)| {
            merge_with_logging(base, config, source)
        })
}

/// Load every configuration source and merge them.
///
/// Reads the file named by `PUBSUB_FIXTURE_CONFIG_FILE` if that variable is
/// set, then the `PUBSUB_FIXTURE_*` variables, then applies `explicit` on
/// top. Defaults still apply to whatever is left unset after
/// [`PubSubConfig::resolve`].
pub fn load_layered(explicit: PubSubConfig) -> Result<PubSubConfig, ConfigError> {
    let from_file = match std::env::var(ENV_CONFIG_FILE) {
        Ok(path) if !path.trim().is_empty() => {
            load_from_file(Path::new(path.trim())).map_err(|source| ConfigError::File {
                path: path.clone(),
                source
            })?
        }
        _ => PubSubConfig::default()
    };
    let from_env = load_from_env()?;

    Ok(merge_configs([
        (from_file, "file"),
        (from_env, "env"),
        (explicit, "explicit"),
    ]))
}

fn merge_with_logging(
    mut base: PubSubConfig,
    override_config: PubSubConfig,
    source_name: &str,
) -> PubSubConfig {
    let mut changes = Vec::new();

    if !override_config.image.is_empty() && override_config.image != base.image {
        changes.push(format!("image = {}", override_config.image));
        base.image = override_config.image;
    }
    if !override_config.cmd.is_empty() && override_config.cmd != base.cmd {
        changes.push(format!("cmd = {:?}", override_config.cmd));
        base.cmd = override_config.cmd;
    }
    if !override_config.exposed_port.is_empty()
        && override_config.exposed_port != base.exposed_port
    {
        changes.push(format!("exposed_port = {}", override_config.exposed_port));
        base.exposed_port = override_config.exposed_port;
    }
    if override_config.probe_timeout_ms != 0
        && override_config.probe_timeout_ms != base.probe_timeout_ms
    {
        changes.push(format!(
            "probe_timeout_ms = {}",
            override_config.probe_timeout_ms
        ));
        base.probe_timeout_ms = override_config.probe_timeout_ms;
    }

    if !changes.is_empty() {
        tracing::info!("Fixture configuration from {}: {:?}", source_name, changes);
    }

    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{ENV_CMD, ENV_EXPOSED_PORT, ENV_IMAGE, ENV_PROBE_TIMEOUT_MS};
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    fn clear_fixture_env() {
        unsafe {
            env::remove_var(ENV_CONFIG_FILE);
            env::remove_var(ENV_IMAGE);
            env::remove_var(ENV_CMD);
            env::remove_var(ENV_EXPOSED_PORT);
            env::remove_var(ENV_PROBE_TIMEOUT_MS);
        }
    }

    #[test]
    fn test_merge_no_sources_is_unset() {
        let merged = merge_configs(Vec::<(PubSubConfig, &str)>::new());
        assert_eq!(merged, PubSubConfig::default());
    }

    #[test]
    fn test_later_source_wins() {
        let file = PubSubConfig::default()
            .with_image("file/image")
            .with_exposed_port("9000");
        let env = PubSubConfig::default().with_image("env/image");

        let merged = merge_configs([(file, "file"), (env, "env")]);

        assert_eq!(merged.image, "env/image");
        assert_eq!(merged.exposed_port, "9000");
    }

    #[test]
    fn test_unset_fields_do_not_override() {
        let file = PubSubConfig {
            image: "file/image".to_string(),
            cmd: vec!["--port=9000".to_string()],
            exposed_port: "9000".to_string(),
            probe_timeout_ms: 4000
        };

        let merged = merge_configs([(file.clone(), "file"), (PubSubConfig::default(), "env")]);
        assert_eq!(merged, file);
    }

    #[test]
    fn test_explicit_overrides_everything() {
        let file = PubSubConfig::default().with_cmd(["--port=1"]);
        let env = PubSubConfig::default().with_cmd(["--port=2"]);
        let explicit = PubSubConfig::default().with_cmd(["--port=3"]);

        let merged = merge_configs([(file, "file"), (env, "env"), (explicit, "explicit")]);
        assert_eq!(merged.cmd, vec!["--port=3"]);
    }

    #[test]
    #[serial]
    fn test_load_layered_file_then_env_then_explicit() {
        clear_fixture_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pubsub.toml");
        std::fs::write(
            &path,
            "image = \"file/image\"\nexposed_port = \"9000\"\nprobe_timeout_ms = 4000\n",
        )
        .unwrap();

        unsafe {
            env::set_var(ENV_CONFIG_FILE, &path);
            env::set_var(ENV_EXPOSED_PORT, "9001");
        }

        let merged = load_layered(PubSubConfig::default().with_probe_timeout(
            std::time::Duration::from_secs(2),
        ));
        clear_fixture_env();
        let merged = merged.unwrap();

        assert_eq!(merged.image, "file/image");
        assert_eq!(merged.exposed_port, "9001");
        assert_eq!(merged.probe_timeout_ms, 2000);
        assert!(merged.cmd.is_empty());
    }

    #[test]
    #[serial]
    fn test_load_layered_without_file() {
        clear_fixture_env();
        unsafe {
            env::set_var(ENV_IMAGE, "env/image");
        }

        let merged = load_layered(PubSubConfig::default());
        clear_fixture_env();

        assert_eq!(merged.unwrap().image, "env/image");
    }

    #[test]
    #[serial]
    fn test_load_layered_missing_file() {
        clear_fixture_env();
        unsafe {
            env::set_var(ENV_CONFIG_FILE, "/nonexistent/pubsub.toml");
        }

        let result = load_layered(PubSubConfig::default());
        clear_fixture_env();

        assert!(matches!(result, Err(ConfigError::File { .. })));
    }
}
