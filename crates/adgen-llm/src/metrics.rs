//! Provider metrics.

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Provider attempts by provider and outcome.
    pub const PROVIDER_ATTEMPTS_TOTAL: &str = "adgen_llm_provider_attempts_total";

    /// Provider call latency in seconds.
    pub const PROVIDER_LATENCY_SECONDS: &str = "adgen_llm_provider_latency_seconds";

    /// Requests where every provider failed.
    pub const PROVIDERS_EXHAUSTED_TOTAL: &str = "adgen_llm_providers_exhausted_total";
}

pub fn record_attempt(provider: &str, outcome: &'static str, latency_secs: f64) {
    counter!(
        names::PROVIDER_ATTEMPTS_TOTAL,
        "provider" => provider.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    histogram!(
        names::PROVIDER_LATENCY_SECONDS,
        "provider" => provider.to_string()
    )
    .record(latency_secs);
}

pub fn record_exhausted() {
    counter!(names::PROVIDERS_EXHAUSTED_TOTAL).increment(1);
}
