//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the site front door.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Development mode: this process serves media and static files itself.
    /// When off, a dedicated server is expected to serve them.
    pub debug: bool,

    /// Delegated namespaces, in declaration order.
    pub mounts: Vec<MountConfig>,

    /// User-uploaded media (`MEDIA_URL` / `MEDIA_ROOT`).
    pub media: FilesConfig,

    /// Collected static assets (`STATIC_URL` / `STATIC_ROOT`).
    pub static_files: FilesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    pub security: SecurityConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            debug: false,
            mounts: default_mounts(),
            media: FilesConfig {
                url: "/media/".to_string(),
                root: "media".to_string(),
            },
            static_files: FilesConfig {
                url: "/static/".to_string(),
                root: "staticfiles".to_string(),
            },
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

/// The site's standard namespaces: admin, rich-text editor, then the
/// application itself at the root.
pub fn default_mounts() -> Vec<MountConfig> {
    const APP_UPSTREAM: &str = "127.0.0.1:8000";
    vec![
        MountConfig::new("admin", "admin/", APP_UPSTREAM),
        MountConfig::new("ckeditor", "django_ckeditor_5/", APP_UPSTREAM),
        MountConfig::new("app", "", APP_UPSTREAM),
    ]
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Path answered locally with "OK" for liveness probes (e.g. "/-/alive").
    /// Unset by default so every path reaches the route table.
    pub health_path: Option<String>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            health_path: None,
        }
    }
}

/// A delegated namespace: every path under `prefix` is handed to `upstream`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MountConfig {
    /// Mount identifier for logging/metrics.
    pub name: String,

    /// Path prefix without a leading slash (e.g. "admin/"). Empty means root.
    #[serde(default)]
    pub prefix: String,

    /// Upstream service address (e.g., "127.0.0.1:8000").
    pub upstream: String,
}

impl MountConfig {
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        upstream: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            upstream: upstream.into(),
        }
    }
}

/// A URL prefix served from a directory on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilesConfig {
    /// URL prefix (e.g. "/media/"). May also be an absolute URL on another host.
    pub url: String,

    /// Filesystem directory the files live in.
    pub root: String,
}

/// Timeout configuration for upstream forwarding.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Compact,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum forwarded request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 10 * 1024 * 1024, // 10MB, media uploads go through admin
        }
    }
}
