//! Metrics collection and exposition.
//!
//! # Metrics
//! - `site_requests_total` (counter): requests by method, status, binding
//! - `site_request_duration_seconds` (histogram): latency distribution
//! - `site_route_bindings` (gauge): size of the route table at startup

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus scrape endpoint on `addr`. Needs a running tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record one dispatched request.
pub fn record_request(method: &str, status: u16, binding: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("binding", binding.to_string()),
    ];
    counter!("site_requests_total", &labels).increment(1);
    histogram!("site_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

pub fn record_table_size(bindings: usize) {
    gauge!("site_route_bindings").set(bindings as f64);
}
