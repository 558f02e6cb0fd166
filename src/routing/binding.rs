//! Route bindings: a path prefix and the handler it is delegated to.

use serde::Serialize;
use std::path::PathBuf;

use crate::routing::matcher::PathPrefix;

/// Where a matched request goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    /// Opaque sub-system reached over HTTP at `address` (host:port).
    Upstream { address: String },

    /// Files under `root`, selected by the remainder of the path.
    Files { root: PathBuf },
}

/// A single entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteBinding {
    /// Binding identifier for logging/metrics.
    pub name: String,
    pub prefix: PathPrefix,
    pub target: Target,
}

impl RouteBinding {
    pub fn upstream(
        name: impl Into<String>,
        prefix: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: PathPrefix::new(prefix),
            target: Target::Upstream {
                address: address.into(),
            },
        }
    }

    pub fn files(
        name: impl Into<String>,
        prefix: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: PathPrefix::new(prefix),
            target: Target::Files { root: root.into() },
        }
    }
}

impl std::fmt::Display for RouteBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.target {
            Target::Upstream { address } => {
                write!(f, "/{} -> {} (upstream {})", self.prefix, self.name, address)
            }
            Target::Files { root } => {
                write!(f, "/{} -> {} (files {})", self.prefix, self.name, root.display())
            }
        }
    }
}
