//! Metrics and observability utilities
//!
//! Prometheus-style metrics with standardized naming. Recording is a no-op
//! until a recorder is installed (the gateway installs one at startup).

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Duration;

/// Metrics prefix for all Tarjuman metrics
pub const METRICS_PREFIX: &str = "tarjuman";

/// Buckets for provider latency (completion calls are slow)
pub const TRANSLATION_BUCKETS: &[f64] = &[
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.000,  // 2s
    5.000,  // 5s
    10.00,  // 10s
    30.00,  // 30s
    60.00,  // 60s
];

/// Outcome label for translation calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationOutcome {
    Success,
    Rejected,
    Failed,
}

impl TranslationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationOutcome::Success => "success",
            TranslationOutcome::Rejected => "rejected",
            TranslationOutcome::Failed => "failed",
        }
    }
}

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_translations_total", METRICS_PREFIX),
        Unit::Count,
        "Translation requests by outcome"
    );

    describe_histogram!(
        format!("{}_translation_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Latency of calls to the translation provider"
    );

    describe_counter!(
        format!("{}_documents_created_total", METRICS_PREFIX),
        Unit::Count,
        "Documents created"
    );

    describe_counter!(
        format!("{}_translation_records_total", METRICS_PREFIX),
        Unit::Count,
        "Translation records created"
    );
}

/// Record the outcome of one translation request
pub fn record_translation(outcome: TranslationOutcome, provider_latency: Option<Duration>) {
    counter!(
        format!("{}_translations_total", METRICS_PREFIX),
        "outcome" => outcome.as_str()
    )
    .increment(1);

    if let Some(latency) = provider_latency {
        histogram!(format!("{}_translation_duration_seconds", METRICS_PREFIX))
            .record(latency.as_secs_f64());
    }
}

pub fn record_document_created() {
    counter!(format!("{}_documents_created_total", METRICS_PREFIX)).increment(1);
}

pub fn record_translation_record_created() {
    counter!(format!("{}_translation_records_total", METRICS_PREFIX)).increment(1);
}
