//! Route matching logic.
//!
//! # Responsibilities
//! - Normalize the request path (single leading '/' removed)
//! - Match path prefix (case-sensitive)
//! - Hand back the unmatched remainder for the target handler
//!
//! # Design Decisions
//! - Prefixes are written without a leading slash ("admin/"), the way
//!   URL tables are usually declared
//! - Empty prefix = always matches (catch-all)
//! - No regex to guarantee O(n) matching

use serde::Serialize;

/// Strip the leading slash of a request path so it can be compared with
/// declared prefixes.
pub fn route_path(request_path: &str) -> &str {
    request_path.strip_prefix('/').unwrap_or(request_path)
}

/// Matches the request path prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PathPrefix {
    prefix: String,
}

impl PathPrefix {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// True for the root prefix, which matches every path.
    pub fn is_catch_all(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Returns the rest of `path` after the prefix, or `None` if the
    /// path does not start with it. `path` must already be normalized
    /// with [`route_path`].
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        path.strip_prefix(self.prefix.as_str())
    }
}

impl std::fmt::Display for PathPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix)
    }
}
