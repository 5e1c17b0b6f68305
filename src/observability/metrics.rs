//! Metrics collection and exposition.
//!
//! # Metrics
//! - `layout_requests_total` (counter): resolutions by outcome
//! - `layout_resolve_duration_seconds` (histogram): resolution latency
//! - `layout_config_reloads_total` (counter): config reloads by result

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished resolution.
pub fn record_resolution(outcome: &'static str, started: Instant) {
    counter!("layout_requests_total", "outcome" => outcome).increment(1);
    histogram!("layout_resolve_duration_seconds").record(started.elapsed().as_secs_f64());
}

/// Record a config reload attempt ("ok" or "rejected").
pub fn record_config_reload(result: &'static str) {
    counter!("layout_config_reloads_total", "result" => result).increment(1);
}
