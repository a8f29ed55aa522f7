//! Unified error types for connectors and services.
//!
//! Every failure path in this crate ends in a [`MessagingError`]:
//! - guard failures are raised before any I/O and name the offending property
//! - operation failures carry a message key plus the input values needed to
//!   diagnose them, and wrap whatever caused them
//! - lookups (templates, applications, registry entries) have dedicated variants

mod guards;

use std::fmt;

use thiserror::Error;

pub use guards::{GuardError, Guards};

use crate::storage::StorageError;

/// Boxed error used as the cause of an operation failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Context attached to an operation failure, in the order it was added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorData(Vec<(&'static str, String)>);

impl ErrorData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.0.push((name, value.into()));
        self
    }

    /// Look up a context value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ErrorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        let pairs: Vec<String> = self
            .0
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        write!(f, " ({})", pairs.join(", "))
    }
}

/// A failed provider, storage or resolution step.
#[derive(Debug, Error)]
#[error("{component}: {key}{data}")]
pub struct OperationError {
    /// Component that raised the error
    pub component: &'static str,

    /// Operation message key, e.g. `sendSMSFailed`
    pub key: &'static str,

    /// Input values relevant to the failure
    pub data: ErrorData,

    #[source]
    pub cause: Option<BoxError>,
}

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error(transparent)]
    Operation(Box<OperationError>),

    #[error("Application id not found: {application_id}")]
    ApplicationNotFound { application_id: String },

    #[error("Template not found: {template_id} ({locale})")]
    TemplateNotFound { template_id: String, locale: String },

    #[error("{component}: connector not configured: {property}")]
    ConnectorNotConfigured {
        component: &'static str,
        property: &'static str,
    },

    #[error("No {factory} connector registered under '{name}'")]
    NotRegistered { factory: &'static str, name: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl MessagingError {
    /// Build an operation failure wrapping `cause`
    pub fn operation_with_cause(
        component: &'static str,
        key: &'static str,
        data: ErrorData,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self::Operation(Box::new(OperationError {
            component,
            key,
            data,
            cause: Some(cause.into()),
        }))
    }

    /// The operation message key, if this is an operation failure
    pub fn operation_key(&self) -> Option<&'static str> {
        match self {
            Self::Operation(op) => Some(op.key),
            _ => None,
        }
    }

    /// The operation context, if this is an operation failure
    pub fn operation_data(&self) -> Option<&ErrorData> {
        match self {
            Self::Operation(op) => Some(&op.data),
            _ => None,
        }
    }

    /// The guard failure, if this is one
    pub fn as_guard(&self) -> Option<&GuardError> {
        match self {
            Self::Guard(guard) => Some(guard),
            _ => None,
        }
    }
}

/// Result type for messaging operations
pub type MessagingResult<T> = std::result::Result<T, MessagingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::aws::ProviderError;
    use std::error::Error as _;

    #[test]
    fn test_operation_error_display_includes_data() {
        let err = MessagingError::operation_with_cause(
            "SnsPushNotificationConnector",
            "subscribeToTopicFailed",
            ErrorData::new()
                .with("topic", "arn:aws:sns:eu-west-1:000000000000:news")
                .with("device", "arn:device"),
            ProviderError::UnexpectedStatus {
                operation: "Subscribe",
                status: 500,
            },
        );

        assert_eq!(
            err.to_string(),
            "SnsPushNotificationConnector: subscribeToTopicFailed \
             (topic=arn:aws:sns:eu-west-1:000000000000:news, device=arn:device)"
        );
        assert_eq!(err.operation_key(), Some("subscribeToTopicFailed"));
        assert_eq!(
            err.operation_data().and_then(|d| d.get("device")),
            Some("arn:device")
        );
    }

    #[test]
    fn test_operation_error_keeps_cause() {
        let inner = MessagingError::operation_with_cause(
            "Inner",
            "platformAppCheckFailed",
            ErrorData::new(),
            StorageError::Unavailable("offline".to_string()),
        );
        let err = MessagingError::operation_with_cause(
            "Outer",
            "platformAppCreationFailed",
            ErrorData::new().with("value", "my-app"),
            inner,
        );

        let source = err.source().expect("cause should be exposed");
        assert_eq!(source.to_string(), "Inner: platformAppCheckFailed");
    }

    #[test]
    fn test_template_not_found_display() {
        let err = MessagingError::TemplateNotFound {
            template_id: "welcome".to_string(),
            locale: "en".to_string(),
        };
        assert_eq!(err.to_string(), "Template not found: welcome (en)");
    }
}
