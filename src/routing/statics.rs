//! Generated bindings for directories served straight from disk.
//!
//! # Rules
//! ```text
//! url empty                     → BuildError::EmptyStaticPrefix
//! debug off                     → no bindings (dedicated server serves them)
//! url is absolute (has a host)  → no bindings (files live elsewhere)
//! otherwise                     → one Files binding, prefix = url without leading '/'
//! ```

use crate::config::schema::FilesConfig;
use crate::routing::binding::RouteBinding;
use crate::routing::table::BuildError;

/// Bindings that serve `files.root` under `files.url`.
pub fn static_bindings(
    name: &str,
    files: &FilesConfig,
    debug: bool,
) -> Result<Vec<RouteBinding>, BuildError> {
    if files.url.is_empty() {
        return Err(BuildError::EmptyStaticPrefix(name.to_string()));
    }

    if !debug {
        return Ok(Vec::new());
    }

    if is_remote(&files.url) {
        tracing::debug!(name, url = %files.url, "Files hosted elsewhere, not serving locally");
        return Ok(Vec::new());
    }

    let prefix = files.url.trim_start_matches('/');
    Ok(vec![RouteBinding::files(name, prefix, files.root.as_str())])
}

fn is_remote(url: &str) -> bool {
    if url.starts_with("//") {
        return true;
    }
    url::Url::parse(url)
        .map(|parsed| parsed.has_host())
        .unwrap_or(false)
}
