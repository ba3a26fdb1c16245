//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, status
//! - `gateway_request_duration_seconds` (histogram): latency distribution
//! - `gateway_resolutions_total` (counter): resolutions by mount shape
//! - `gateway_extra_segments_total` (counter): paths rejected as too deep
//!
//! # Design Decisions
//! - Without an installed recorder every call is a no-op
//! - Prometheus exporter serves its own HTTP listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished gateway request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record which mount shape resolved a request.
pub fn record_resolution(shape: &'static str, has_extra_path_segments: bool) {
    counter!("gateway_resolutions_total", "shape" => shape).increment(1);
    if has_extra_path_segments {
        counter!("gateway_extra_segments_total", "shape" => shape).increment(1);
    }
}
