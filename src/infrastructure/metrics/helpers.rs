//! Metrics helper structs for convenient metric recording

use prometheus::{Encoder, TextEncoder};

use super::{
    ENTRIES_STORED_TOTAL, MESSAGES_FAILED_TOTAL, MESSAGES_SENT_TOTAL, PROVIDER_RESOURCES_TOTAL,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// How an idempotent resolution ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOutcome {
    Reused,
    Created,
}

impl ResourceOutcome {
    fn as_label(self) -> &'static str {
        match self {
            Self::Reused => "reused",
            Self::Created => "created",
        }
    }
}

/// Helper struct for recording messaging metrics
pub struct MessagingMetrics;

impl MessagingMetrics {
    /// Record a message accepted for a channel (`email`, `sms`, `push`, `topic`)
    pub fn record_sent(channel: &str) {
        MESSAGES_SENT_TOTAL.with_label_values(&[channel]).inc();
    }

    /// Record a failed operation
    pub fn record_failed(channel: &str, operation: &str) {
        MESSAGES_FAILED_TOTAL
            .with_label_values(&[channel, operation])
            .inc();
    }

    /// Record an entry persisted by a storage-backed connector
    pub fn record_entry_stored(entity: &str) {
        ENTRIES_STORED_TOTAL.with_label_values(&[entity]).inc();
    }

    /// Record the outcome of a check-then-create resolution
    pub fn record_resource(kind: &str, outcome: ResourceOutcome) {
        PROVIDER_RESOURCES_TOTAL
            .with_label_values(&[kind, outcome.as_label()])
            .inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_metrics_are_encoded() {
        MessagingMetrics::record_sent("sms");
        MessagingMetrics::record_resource("topic", ResourceOutcome::Reused);

        let text = encode_metrics().unwrap();
        assert!(text.contains("ara_messaging_messages_sent_total"));
        assert!(text.contains("ara_messaging_provider_resources_total"));
    }
}
