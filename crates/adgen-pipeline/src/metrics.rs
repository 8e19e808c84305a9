//! Pipeline metrics.

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Parse requests by outcome.
    pub const PARSE_REQUESTS_TOTAL: &str = "adgen_parse_requests_total";

    /// End-to-end parse duration in seconds.
    pub const PARSE_DURATION_SECONDS: &str = "adgen_parse_duration_seconds";

    /// Scene lists replaced by the deterministic generator, by reason.
    pub const SCENE_REGENERATIONS_TOTAL: &str = "adgen_scene_regenerations_total";

    /// Requests rejected by the safety gate.
    pub const CONTENT_REJECTIONS_TOTAL: &str = "adgen_content_rejections_total";
}

pub fn record_parse(outcome: &'static str, duration_secs: f64) {
    counter!(names::PARSE_REQUESTS_TOTAL, "outcome" => outcome).increment(1);
    histogram!(names::PARSE_DURATION_SECONDS, "outcome" => outcome).record(duration_secs);
}

pub fn record_scene_regeneration(reason: &'static str) {
    counter!(names::SCENE_REGENERATIONS_TOTAL, "reason" => reason).increment(1);
}

pub fn record_content_rejection() {
    counter!(names::CONTENT_REJECTIONS_TOTAL).increment(1);
}
