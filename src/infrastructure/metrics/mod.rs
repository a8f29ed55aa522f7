//! Prometheus metrics for the messaging connectors.
//!
//! - Message metrics (sent / failed by channel)
//! - Entity storage metrics (entries persisted by the storage-backed connectors)
//! - Provider resource metrics (reused vs created during idempotent resolution)

mod helpers;

pub use helpers::{encode_metrics, MessagingMetrics, ResourceOutcome};

use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "ara_messaging";

lazy_static! {
    /// Total messages handed to a provider or persisted, by channel
    pub static ref MESSAGES_SENT_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_messages_sent_total", METRIC_PREFIX),
        "Total messages sent",
        &["channel"]
    ).unwrap();

    /// Total failed connector operations, by channel and operation key
    pub static ref MESSAGES_FAILED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_operations_failed_total", METRIC_PREFIX),
        "Total failed connector operations",
        &["channel", "operation"]
    ).unwrap();

    /// Total entries persisted by the entity storage connectors
    pub static ref ENTRIES_STORED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_entries_stored_total", METRIC_PREFIX),
        "Total entries persisted by storage-backed connectors",
        &["entity"]
    ).unwrap();

    /// Provider-side resources resolved during check-then-create
    pub static ref PROVIDER_RESOURCES_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_provider_resources_total", METRIC_PREFIX),
        "Provider resources resolved, by kind and whether they were reused or created",
        &["kind", "outcome"]
    ).unwrap();
}
