//! Connector implementations.
//!
//! - `aws`: SES email, SNS SMS and SNS push notifications
//! - `entity_storage`: connectors that only persist what would have been sent

pub mod aws;
pub mod entity_storage;

use crate::error::{BoxError, ErrorData, MessagingError};
use crate::logging::Logger;
use crate::metrics::MessagingMetrics;

/// Log, count and wrap a failed connector operation
pub(crate) async fn operation_failed(
    logger: &Logger,
    component: &'static str,
    channel: &str,
    key: &'static str,
    data: ErrorData,
    cause: impl Into<BoxError>,
) -> MessagingError {
    let cause = cause.into();
    tracing::warn!(component, operation = key, error = %cause, "Connector operation failed");
    logger.error(component, key).await;
    MessagingMetrics::record_failed(channel, key);
    MessagingError::operation_with_cause(component, key, data, cause)
}
