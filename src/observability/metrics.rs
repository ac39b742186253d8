//! Metrics collection and exposition.
//!
//! # Metrics
//! - `subnet_queries_total` (counter): lookups by `result` (match, miss, error)
//! - `subnet_reloads_total` (counter): config reloads by `outcome`
//! - `subnet_configured_subnets` (gauge): subnets in the active classifier
//!
//! Recording without an installed recorder is a no-op, so the library can
//! call these unconditionally.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

pub const QUERIES_TOTAL: &str = "subnet_queries_total";
pub const RELOADS_TOTAL: &str = "subnet_reloads_total";
pub const CONFIGURED_SUBNETS: &str = "subnet_configured_subnets";

/// Outcome of a single lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryResult {
    Match,
    Miss,
    Error,
}

impl QueryResult {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryResult::Match => "match",
            QueryResult::Miss => "miss",
            QueryResult::Error => "error",
        }
    }
}

/// Install the Prometheus exporter with an HTTP listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_prometheus(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("failed to install prometheus exporter: {}", e))?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

#[inline]
pub fn record_query(result: QueryResult) {
    counter!(QUERIES_TOTAL, "result" => result.as_str()).increment(1);
}

#[inline]
pub fn record_reload(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!(RELOADS_TOTAL, "outcome" => outcome).increment(1);
}

#[inline]
pub fn record_configured_subnets(count: usize) {
    gauge!(CONFIGURED_SUBNETS).set(count as f64);
}
