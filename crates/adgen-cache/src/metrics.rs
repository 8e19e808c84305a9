//! Cache metrics.

use metrics::counter;

/// Metric name constants for consistency.
pub mod names {
    /// Lookups by result (hit, miss, error).
    pub const LOOKUPS_TOTAL: &str = "adgen_cache_lookups_total";

    /// Writes by result (ok, error).
    pub const WRITES_TOTAL: &str = "adgen_cache_writes_total";
}

pub fn record_lookup(result: &'static str) {
    counter!(names::LOOKUPS_TOTAL, "result" => result).increment(1);
}

pub fn record_write(result: &'static str) {
    counter!(names::WRITES_TOTAL, "result" => result).increment(1);
}
