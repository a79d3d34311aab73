//! Metrics definitions for the auth service
//!
//! All metrics follow Prometheus naming conventions:
//! - `auth_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `status`: 2 values (success, error)
//! - `error_kind`: 6 values, one per `AuthError` variant, or `none`
//! - `operation`: 2 values (hash, verify)

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize the Prometheus recorder and return the handle served on
/// `/metrics`.
///
/// Must be called before any metrics are recorded.
///
/// # Errors
///
/// Returns error if the recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    prometheus_builder()?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

fn prometheus_builder() -> Result<PrometheusBuilder, String> {
    PrometheusBuilder::new()
        // Coarse buckets, 50ms minimum.
        .set_buckets_for_metric(
            Matcher::Full("auth_bcrypt_duration_seconds".to_string()),
            &[0.050, 0.100, 0.150, 0.200, 0.250, 0.300, 0.500, 1.000],
        )
        .map_err(|e| format!("Failed to set bcrypt buckets: {e}"))
}

/// Record a token issuance
///
/// Metric: `auth_token_issuance_total`
/// Labels: `status`
pub fn record_token_issuance(status: &str) {
    counter!("auth_token_issuance_total", "status" => status.to_string()).increment(1);
}

/// Record a gate decision
///
/// Metric: `auth_token_validations_total`
/// Labels: `status`, `error_kind`
pub fn record_token_validation(status: &str, error_kind: Option<&str>) {
    let kind = error_kind.unwrap_or("none");
    counter!("auth_token_validations_total", "status" => status.to_string(), "error_kind" => kind.to_string())
        .increment(1);
}

/// Record a login attempt
///
/// Metric: `auth_login_attempts_total`
/// Labels: `status`
pub fn record_login_attempt(status: &str) {
    counter!("auth_login_attempts_total", "status" => status.to_string()).increment(1);
}

/// Record bcrypt operation duration
///
/// Metric: `auth_bcrypt_duration_seconds`
/// Labels: `operation` (hash, verify)
pub fn record_bcrypt_duration(operation: &str, duration: Duration) {
    histogram!("auth_bcrypt_duration_seconds", "operation" => operation.to_string())
        .record(duration.as_secs_f64());
}
