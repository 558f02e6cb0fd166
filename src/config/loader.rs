//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::SiteConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: SiteConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load configuration from `path` when given, otherwise start from defaults.
/// Environment overrides apply either way.
pub fn load(path: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = SiteConfig::default();
            apply_env_overrides(&mut config, |key| std::env::var(key).ok());
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}

/// Apply the deployment environment on top of file values.
///
/// Recognized keys: `MEDIA_URL`, `MEDIA_ROOT`, `STATIC_URL`, `STATIC_ROOT`,
/// `DEBUG` and `BIND_ADDRESS`.
pub fn apply_env_overrides<F>(config: &mut SiteConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("MEDIA_URL") {
        config.media.url = v;
    }
    if let Some(v) = lookup("MEDIA_ROOT") {
        config.media.root = v;
    }
    if let Some(v) = lookup("STATIC_URL") {
        config.static_files.url = v;
    }
    if let Some(v) = lookup("STATIC_ROOT") {
        config.static_files.root = v;
    }
    if let Some(v) = lookup("BIND_ADDRESS") {
        config.listener.bind_address = v;
    }
    if let Some(v) = lookup("DEBUG") {
        config.debug = parse_flag(&v);
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
