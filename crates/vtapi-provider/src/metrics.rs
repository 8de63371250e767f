//! Provider metrics.
//!
//! Provides standardized metrics for backend calls:
//! - Request counters by provider, operation and outcome
//! - Latency histograms
//! - Unrecognized native status counter

use std::time::Instant;

use metrics::{counter, histogram};

// =============================================================================
// Metric Names
// =============================================================================

/// Metric name constants for consistency.
pub mod names {
    /// Total backend requests by provider, operation and outcome.
    pub const BACKEND_REQUESTS_TOTAL: &str = "vtapi_backend_requests_total";

    /// Backend request latency in seconds by provider and operation.
    pub const BACKEND_LATENCY_SECONDS: &str = "vtapi_backend_latency_seconds";

    /// Native statuses that were missing from a provider's status table.
    pub const UNRECOGNIZED_STATUS_TOTAL: &str = "vtapi_unrecognized_status_total";
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record metrics for a completed backend request.
pub fn record_backend_request(provider: &str, operation: &str, success: bool, started: Instant) {
    let outcome = if success { "ok" } else { "error" };

    counter!(
        names::BACKEND_REQUESTS_TOTAL,
        "provider" => provider.to_string(),
        "operation" => operation.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    histogram!(
        names::BACKEND_LATENCY_SECONDS,
        "provider" => provider.to_string(),
        "operation" => operation.to_string()
    )
    .record(started.elapsed().as_secs_f64());
}

/// Record a native status that the provider's table does not know.
pub fn record_unrecognized_status(provider: &str, native_status: &str) {
    counter!(
        names::UNRECOGNIZED_STATUS_TOTAL,
        "provider" => provider.to_string(),
        "status" => native_status.to_ascii_lowercase()
    )
    .increment(1);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_are_prefixed() {
        assert!(names::BACKEND_REQUESTS_TOTAL.starts_with("vtapi_"));
        assert!(names::BACKEND_LATENCY_SECONDS.ends_with("_seconds"));
        assert!(names::UNRECOGNIZED_STATUS_TOTAL.ends_with("_total"));
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_backend_request("test", "get_job", true, Instant::now());
        record_unrecognized_status("test", "Exploded");
    }
}
