//! Prometheus metrics for upstream fetches and PDF rendering.
//!
//! This module provides metrics for:
//! - Upstream projections fetch latency and failures
//! - PDF render latency and failures
//! - Props served per league

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::props::League;

// === Metric Name Constants ===

/// Upstream fetch latency metric name.
pub const METRIC_FETCH_LATENCY: &str = "projections_fetch_latency_ms";
/// PDF render latency metric name.
pub const METRIC_RENDER_LATENCY: &str = "pdf_render_latency_ms";
/// Failed upstream fetches counter metric name.
pub const METRIC_FETCH_FAILURES: &str = "projections_fetch_failures_total";
/// Failed renders counter metric name.
pub const METRIC_RENDER_FAILURES: &str = "pdf_render_failures_total";
/// Props served counter metric name.
pub const METRIC_PROPS_SERVED: &str = "props_served_total";

/// Install the Prometheus recorder and describe all metrics.
///
/// Call once at startup. The returned handle renders the exposition text.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_histogram!(
        METRIC_FETCH_LATENCY,
        "Upstream projections request latency in milliseconds"
    );
    describe_histogram!(
        METRIC_RENDER_LATENCY,
        "PDF render latency in milliseconds"
    );
    describe_counter!(
        METRIC_FETCH_FAILURES,
        "Total number of failed upstream projections requests"
    );
    describe_counter!(
        METRIC_RENDER_FAILURES,
        "Total number of failed PDF renders"
    );
    describe_counter!(
        METRIC_PROPS_SERVED,
        "Total number of prop records returned to clients"
    );

    debug!("Metrics initialized");

    Ok(handle)
}

/// Record upstream fetch latency.
pub fn record_fetch_latency(start: Instant, league: League) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_FETCH_LATENCY, "league" => league.to_string()).record(latency_ms);
}

/// Record PDF render latency.
pub fn record_render_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_RENDER_LATENCY).record(latency_ms);
}

/// Increment failed fetches counter.
pub fn inc_fetch_failures(league: League) {
    counter!(METRIC_FETCH_FAILURES, "league" => league.to_string()).increment(1);
}

/// Increment failed renders counter.
pub fn inc_render_failures() {
    counter!(METRIC_RENDER_FAILURES).increment(1);
}

/// Add to the props served counter.
pub fn add_props_served(route: &'static str, count: usize) {
    counter!(METRIC_PROPS_SERVED, "route" => route).increment(count as u64);
}
