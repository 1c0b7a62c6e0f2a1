//! Application metrics for Prometheus monitoring.
//!
//! This module provides:
//! - Prometheus recorder initialization
//! - Metric descriptions
//! - Helpers for recording request, cache and build metrics

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus metrics recorder.
///
/// Call once at startup, before any metrics are recorded.
/// Returns `true` if initialization succeeded, `false` if already initialized.
pub fn init_metrics() -> bool {
    let mut installed = false;
    PROMETHEUS_HANDLE.get_or_init(|| {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        match metrics::set_global_recorder(recorder) {
            Ok(()) => installed = true,
            Err(_) => tracing::warn!("Failed to set global metrics recorder (already set)"),
        }
        handle
    });

    if installed {
        describe_metrics();
        tracing::info!("Prometheus metrics initialized");
    }
    installed
}

fn describe_metrics() {
    describe_counter!(
        "kstats_requests_total",
        "Total number of channel page and API requests"
    );
    describe_histogram!(
        "kstats_request_duration_seconds",
        "Duration of channel requests in seconds"
    );

    describe_counter!(
        "kstats_cache_lookups_total",
        "Channel record cache lookups by result (hit or miss)"
    );
    describe_histogram!(
        "kstats_build_duration_seconds",
        "Time spent assembling a channel record from the database"
    );
}

/// Render current metrics in Prometheus text format.
///
/// Returns `None` if metrics are not initialized.
pub fn render_metrics() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|h| h.render())
}

/// Record a completed channel request.
///
/// # Arguments
/// * `endpoint` - Handler name (e.g. "channel_page", "channel_api")
/// * `status` - HTTP status code
/// * `duration` - Time spent in the handler
pub fn record_request(endpoint: &'static str, status: u16, duration: Duration) {
    counter!("kstats_requests_total", "endpoint" => endpoint, "status" => status.to_string())
        .increment(1);
    histogram!("kstats_request_duration_seconds", "endpoint" => endpoint)
        .record(duration.as_secs_f64());
}

pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("kstats_cache_lookups_total", "result" => result).increment(1);
}

pub fn record_build(duration: Duration) {
    histogram!("kstats_build_duration_seconds").record(duration.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_a_no_op() {
        record_request("channel_api", 200, Duration::from_millis(3));
        record_cache_lookup(true);
        record_cache_lookup(false);
        record_build(Duration::from_millis(12));
    }

    #[test]
    fn test_render_after_init() {
        init_metrics();
        record_cache_lookup(false);
        let output = render_metrics().expect("metrics initialized");
        assert!(output.contains("kstats_cache_lookups_total"));
    }
}
