//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges (timeouts > 0)
//! - Detect conflicting mounts (duplicate names or prefixes)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{FilesConfig, SiteConfig};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address `{0}`")]
    InvalidBindAddress(String),

    #[error("health path `{0}` must start with '/' and contain only literal segments")]
    InvalidHealthPath(String),

    #[error("invalid metrics address `{0}`")]
    InvalidMetricsAddress(String),

    #[error("timeout `{0}` must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("duplicate mount name `{0}`")]
    DuplicateMountName(String),

    #[error("duplicate mount prefix `{0}`")]
    DuplicatePrefix(String),

    #[error("mount prefix `{0}` must not start with '/' and must end with '/'")]
    InvalidPrefix(String),

    #[error("mount `{name}` has invalid upstream `{upstream}` (expected host:port)")]
    InvalidUpstream { name: String, upstream: String },

    #[error("{section} url `{url}` must end with '/'")]
    MissingTrailingSlash { section: &'static str, url: String },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Some(path) = &config.listener.health_path {
        if !is_valid_health_path(path) {
            errors.push(ValidationError::InvalidHealthPath(path.clone()));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }

    let mut names = HashSet::new();
    let mut prefixes = HashSet::new();
    for mount in &config.mounts {
        if !names.insert(mount.name.as_str()) {
            errors.push(ValidationError::DuplicateMountName(mount.name.clone()));
        }
        if !prefixes.insert(mount.prefix.as_str()) {
            errors.push(ValidationError::DuplicatePrefix(mount.prefix.clone()));
        }
        if !is_valid_prefix(&mount.prefix) {
            errors.push(ValidationError::InvalidPrefix(mount.prefix.clone()));
        }
        if !is_valid_upstream(&mount.upstream) {
            errors.push(ValidationError::InvalidUpstream {
                name: mount.name.clone(),
                upstream: mount.upstream.clone(),
            });
        }
    }

    check_files_url("media", &config.media, &mut errors);
    check_files_url("static_files", &config.static_files, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_prefix(prefix: &str) -> bool {
    prefix.is_empty() || (!prefix.starts_with('/') && prefix.ends_with('/'))
}

// Captures and wildcards would be parsed by the router.
fn is_valid_health_path(path: &str) -> bool {
    path.starts_with('/')
        && path
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"/-._~".contains(&b))
}

fn is_valid_upstream(upstream: &str) -> bool {
    let Some((host, port)) = upstream.rsplit_once(':') else {
        return false;
    };
    !host.is_empty() && port.parse::<u16>().is_ok() && url::Host::parse(host).is_ok()
}

// Emptiness is reported when the route table is built.
fn check_files_url(section: &'static str, files: &FilesConfig, errors: &mut Vec<ValidationError>) {
    if !files.url.is_empty() && !files.url.ends_with('/') {
        errors.push(ValidationError::MissingTrailingSlash {
            section,
            url: files.url.clone(),
        });
    }
}
