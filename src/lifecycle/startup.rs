//! Startup orchestration.
//!
//! # Order
//! 1. Build the route table (fails fast on misconfiguration)
//! 2. Start the metrics endpoint when enabled
//! 3. Bind the listener and begin accepting traffic
//!
//! Any startup error is fatal. Listeners start last so traffic only
//! arrives once the table exists.

use std::net::{AddrParseError, SocketAddr};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::SiteConfig;
use crate::http::SiteServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::observability::metrics;
use crate::routing::{BuildError, RouteTable, Target};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("route table: {0}")]
    Build(#[from] BuildError),

    #[error("invalid address: {0}")]
    Address(#[from] AddrParseError),

    #[error("metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Log every binding in resolution order.
pub fn log_route_table(table: &RouteTable, debug_mode: bool) {
    tracing::info!(bindings = table.len(), debug = debug_mode, "Route table built");
    for (position, binding) in table.bindings().iter().enumerate() {
        match &binding.target {
            Target::Upstream { address } => tracing::info!(
                position,
                binding = %binding.name,
                prefix = %format!("/{}", binding.prefix),
                upstream = %address,
                "Route bound"
            ),
            Target::Files { root } => tracing::info!(
                position,
                binding = %binding.name,
                prefix = %format!("/{}", binding.prefix),
                root = %root.display(),
                "Route bound"
            ),
        }
    }
}

/// Start the site and serve until `shutdown` fires.
pub async fn run(config: SiteConfig, shutdown: Shutdown) -> Result<(), StartupError> {
    let server = SiteServer::new(config.clone())?;
    log_route_table(server.table(), config.debug);

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
        metrics::record_table_size(server.table().len());
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, shutdown.signal()).await?;
    Ok(())
}
