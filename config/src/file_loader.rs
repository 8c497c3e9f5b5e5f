//! # Configuration File Loading
//!
//! Loads fixture configuration from TOML, YAML or JSON files.
//!
//! The format is picked from the file extension. Fields missing from the
//! file stay unset.

use crate::config::PubSubConfig;
use std::path::Path;

/// Configuration file loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(String),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(String),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(String),

    #[error("Config file has no extension")]
    NoExtension,

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(String),
}

fn read(path: &Path) -> Result<String, ConfigFileError> {
    std::fs::read_to_string(path)
        .map_err(|_e| ConfigFileError::FileNotFound(path.display().to_string()))
}

/// Load configuration from a TOML file.
///
/// ```rust,no_run
/// use config::load_from_toml;
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_from_toml(Path::new("pubsub-fixture.toml"))?;
///     println!("Emulator image: {}", config.resolve().image);
///     Ok(())
/// }
/// ```
pub fn load_from_toml(path: &Path) -> Result<PubSubConfig, ConfigFileError> {
    let contents = read(path)?;
    toml::from_str(&contents).map_err(|e| ConfigFileError::TomlParse(e.to_string()))
}

/// Load configuration from a YAML file.
pub fn load_from_yaml(path: &Path) -> Result<PubSubConfig, ConfigFileError> {
    let contents = read(path)?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigFileError::YamlParse(e.to_string()))
}

fn load_from_json(path: &Path) -> Result<PubSubConfig, ConfigFileError> {
    let contents = read(path)?;
    serde_json::from_str(&contents).map_err(|e| ConfigFileError::JsonParse(e.to_string()))
}

/// Load configuration from file with auto-detection.
///
/// # M-CANONICAL-DOCS
///
/// ## Supported Formats
/// - `.toml`: TOML format
/// - `.yaml` / `.yml`: YAML format
/// - `.json`: JSON format
///
/// ## Error Handling
/// Returns `ConfigFileError` for:
/// - File not found
/// - Missing or unknown file extension
/// - Parse errors for the detected format
pub fn load_from_file(path: &Path) -> Result<PubSubConfig, ConfigFileError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or(ConfigFileError::NoExtension)?;

    match extension.to_lowercase().as_str() {
        "toml" => load_from_toml(path),
        "yaml" | "yml" => load_from_yaml(path),
        "json" => load_from_json(path),
        other => Err(ConfigFileError::UnsupportedFormat(other.to_string())),
    }
}
