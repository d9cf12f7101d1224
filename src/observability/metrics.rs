//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mvc_requests_total` (counter): requests by method and status
//! - `mvc_request_duration_seconds` (histogram): end-to-end handling time
//! - `mvc_forwards_total` (counter): internal forwards between actions
//! - `mvc_no_route_total` (counter): requests answered by the fallback route
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - The Prometheus exporter serves its own listener, separate from the app

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter and describe the metrics. Requires a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_counter!("mvc_requests_total", Unit::Count, "Requests handled");
    describe_histogram!(
        "mvc_request_duration_seconds",
        Unit::Seconds,
        "Time from request receipt to response"
    );
    describe_counter!("mvc_forwards_total", Unit::Count, "Internal forwards between actions");
    describe_counter!("mvc_no_route_total", Unit::Count, "Requests no route matched");

    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, start_time: Instant) {
    let labels = [("method", method.to_string()), ("status", status.to_string())];
    counter!("mvc_requests_total", &labels).increment(1);
    histogram!("mvc_request_duration_seconds", &labels).record(start_time.elapsed().as_secs_f64());
}

pub fn record_forward() {
    counter!("mvc_forwards_total").increment(1);
}

pub fn record_no_route() {
    counter!("mvc_no_route_total").increment(1);
}
