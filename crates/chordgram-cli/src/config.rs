//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use chordgram::{ChordgramError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for ChordgramError {
    fn from(err: ConfigError) -> Self {
        ChordgramError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (chordgram/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or holds invalid values
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ChordgramError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:% = path.display(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("chordgram/config.toml");
    if local_config.exists() {
        info!(path:% = local_config.display(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "chordgram", "chordgram") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path:% = system_config.display(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path:% = system_config.display(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ChordgramError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    debug!(config:?; "Configuration loaded");
    Ok(config)
}

/// Parse configuration text and check the values the TOML types cannot express.
fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let scale = config.diagram().scale();
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "diagram.scale must be a positive number, got {scale}"
        )));
    }

    config.style().palette().map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use chordgram::chord::Hand;

    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r##"
            [diagram]
            scale = 1.5
            hand = "left"

            [style]
            ink_color = "navy"
            name_color = "#336699"
            "##,
        )
        .unwrap();

        assert_eq!(config.diagram().scale(), 1.5);
        assert_eq!(config.diagram().hand(), Hand::Left);
        assert!(config.style().ink_color().unwrap().is_some());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.diagram().scale(), 2.0);
        assert_eq!(config.diagram().hand(), Hand::Right);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            parse_config("[diagram]\nscale = 0.0\n"),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            parse_config("[style]\nink_color = \"nope\"\n"),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            parse_config("[diagram]\nhand = \"up\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ChordgramError::Config(msg) if msg.contains("absent.toml")));
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[diagram]\nscale = 3.0\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.diagram().scale(), 3.0);
    }
}
