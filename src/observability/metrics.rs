//! Service metrics.
//!
//! # Responsibilities
//! - Install the Prometheus exporter when enabled
//! - Record request outcomes, upstream fetch latency, toggle cache
//!   hits and misses
//!
//! # Design Decisions
//! - Labels carry status and page type only; the offending URL for a
//!   non-200 render lives in the accompanying log event

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// One completed render request.
pub fn record_request(status: u16, started: Instant) {
    metrics::counter!("ssr_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("ssr_request_duration_seconds")
        .record(started.elapsed().as_secs_f64());
}

/// A render that resolved to a non-200 status.
pub fn record_non_200(status: u16, page_type: &str) {
    metrics::counter!(
        "ssr_non_200_response_total",
        "status" => status.to_string(),
        "page_type" => page_type.to_string(),
    )
    .increment(1);
}

/// One round trip to the page-data backend.
pub fn record_upstream_fetch(started: Instant) {
    metrics::counter!("ssr_upstream_fetch_total").increment(1);
    metrics::histogram!("ssr_upstream_fetch_duration_seconds")
        .record(started.elapsed().as_secs_f64());
}

/// A toggle cache lookup.
pub fn record_toggle_cache(hit: bool) {
    let outcome = if hit { "hit" } else { "miss" };
    metrics::counter!("ssr_toggle_cache_lookups_total", "outcome" => outcome).increment(1);
}
