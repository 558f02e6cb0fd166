//! Route lookup.
//!
//! # Responsibilities
//! - Build the ordered bindings from configuration
//! - Look up the binding for a request path
//! - Return matched binding (plus remainder) or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan (acceptable for typical route counts)
//! - Prefixed bindings are tried in declaration order, first match wins
//! - The root binding only receives paths no prefixed binding claims

use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::SiteConfig;
use crate::routing::binding::RouteBinding;
use crate::routing::matcher::route_path;
use crate::routing::statics::static_bindings;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("empty {0} url prefix is not permitted")]
    EmptyStaticPrefix(String),

    #[error("prefix `{0}` is bound more than once")]
    DuplicatePrefix(String),
}

/// A successful lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub binding: &'a RouteBinding,
    /// Path left after the binding's prefix.
    pub remainder: &'a str,
}

/// Ordered, immutable set of route bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    bindings: Vec<RouteBinding>,
}

impl RouteTable {
    /// Build the site's table: configured mounts in order, then media,
    /// then static assets.
    pub fn build(config: &SiteConfig) -> Result<Self, BuildError> {
        let mut bindings: Vec<RouteBinding> = config
            .mounts
            .iter()
            .map(|m| RouteBinding::upstream(&m.name, &m.prefix, &m.upstream))
            .collect();

        bindings.extend(static_bindings("media", &config.media, config.debug)?);
        bindings.extend(static_bindings("static", &config.static_files, config.debug)?);

        Self::from_bindings(bindings)
    }

    /// Create a table from explicit bindings, kept in the given order.
    pub fn from_bindings(bindings: Vec<RouteBinding>) -> Result<Self, BuildError> {
        let mut seen = HashSet::new();
        for binding in &bindings {
            if !seen.insert(binding.prefix.as_str()) {
                return Err(BuildError::DuplicatePrefix(binding.prefix.to_string()));
            }
        }
        Ok(Self { bindings })
    }

    /// Find the binding responsible for `request_path`.
    pub fn resolve<'a>(&'a self, request_path: &'a str) -> Option<Resolved<'a>> {
        let path = route_path(request_path);

        let prefixed = self.bindings.iter().filter(|b| !b.prefix.is_catch_all());
        let catch_all = self.bindings.iter().filter(|b| b.prefix.is_catch_all());

        prefixed.chain(catch_all).find_map(|binding| {
            binding
                .prefix
                .strip(path)
                .map(|remainder| Resolved { binding, remainder })
        })
    }

    pub fn bindings(&self) -> &[RouteBinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
