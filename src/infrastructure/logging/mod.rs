//! Optional structured logging for connectors.
//!
//! Connectors emit fire-and-forget [`LogEntry`] records through a
//! [`LoggingConnector`]. When no connector is configured every call is a
//! no-op, and a failing connector never affects the operation being logged.
//!
//! Two implementations are provided:
//! - [`TracingLoggingConnector`] forwards entries to `tracing`
//! - [`MemoryLoggingConnector`] keeps entries in memory for inspection

mod memory;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::registry::ConnectorRegistry;

pub use memory::MemoryLoggingConnector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// A single log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,

    /// Component emitting the entry
    pub source: String,

    /// Milliseconds since the Unix epoch
    pub ts: i64,

    /// Message key, e.g. `smsSending`
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl LogEntry {
    pub fn new(level: LogLevel, source: &str, message: &str) -> Self {
        Self {
            level,
            source: source.to_string(),
            ts: Utc::now().timestamp_millis(),
            message: message.to_string(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Sink for connector log entries
#[async_trait]
pub trait LoggingConnector: Send + Sync {
    async fn log(&self, entry: LogEntry);
}

/// Forwards log entries to the `tracing` subscriber
#[derive(Debug, Clone, Default)]
pub struct TracingLoggingConnector;

#[async_trait]
impl LoggingConnector for TracingLoggingConnector {
    async fn log(&self, entry: LogEntry) {
        let data = entry.data.map(|d| d.to_string()).unwrap_or_default();
        match entry.level {
            LogLevel::Debug => {
                tracing::debug!(source = %entry.source, ts = entry.ts, data = %data, "{}", entry.message)
            }
            LogLevel::Info => {
                tracing::info!(source = %entry.source, ts = entry.ts, data = %data, "{}", entry.message)
            }
            LogLevel::Warn => {
                tracing::warn!(source = %entry.source, ts = entry.ts, data = %data, "{}", entry.message)
            }
            LogLevel::Error => {
                tracing::error!(source = %entry.source, ts = entry.ts, data = %data, "{}", entry.message)
            }
        }
    }
}

/// Handle to an optional logging connector.
///
/// Cloning is cheap; an empty logger swallows every entry.
#[derive(Clone, Default)]
pub struct Logger {
    connector: Option<Arc<dyn LoggingConnector>>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("configured", &self.connector.is_some())
            .finish()
    }
}

impl Logger {
    pub fn new(connector: Arc<dyn LoggingConnector>) -> Self {
        Self {
            connector: Some(connector),
        }
    }

    /// A logger that drops everything
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Resolve a logging connector by name, tolerating its absence
    pub fn from_registry(
        registry: &ConnectorRegistry<dyn LoggingConnector>,
        logging_connector_type: Option<&str>,
    ) -> Self {
        let connector = logging_connector_type.and_then(|name| registry.get_if_exists(name));
        if logging_connector_type.is_some() && connector.is_none() {
            tracing::debug!(
                logging_connector_type = ?logging_connector_type,
                "Logging connector not registered, log entries will be dropped"
            );
        }
        Self { connector }
    }

    pub fn is_enabled(&self) -> bool {
        self.connector.is_some()
    }

    pub async fn log(&self, entry: LogEntry) {
        if let Some(connector) = &self.connector {
            connector.log(entry).await;
        }
    }

    pub async fn info(&self, source: &str, message: &str) {
        self.log(LogEntry::new(LogLevel::Info, source, message)).await;
    }

    pub async fn info_with(&self, source: &str, message: &str, data: serde_json::Value) {
        self.log(LogEntry::new(LogLevel::Info, source, message).with_data(data))
            .await;
    }

    pub async fn error(&self, source: &str, message: &str) {
        self.log(LogEntry::new(LogLevel::Error, source, message)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_disabled_logger_is_noop() {
        let logger = Logger::disabled();
        assert!(!logger.is_enabled());
        logger.info("Test", "nothing").await;
    }

    #[tokio::test]
    async fn test_logger_forwards_entries() {
        let memory = Arc::new(MemoryLoggingConnector::new());
        let logger = Logger::new(memory.clone());

        logger.info("SesEmailConnector", "emailSending").await;
        logger
            .info_with("SesEmailConnector", "templateCreating", json!({"name": "welcome"}))
            .await;
        logger.error("SesEmailConnector", "createTemplateFailed").await;

        let entries = memory.entries().await;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].level, LogLevel::Info);
        assert_eq!(entries[1].data, Some(json!({"name": "welcome"})));
        assert_eq!(entries[2].level, LogLevel::Error);
        assert_eq!(entries[2].message, "createTemplateFailed");
    }

    #[test]
    fn test_from_registry_tolerates_missing_connector() {
        let registry: ConnectorRegistry<dyn LoggingConnector> = ConnectorRegistry::new("logging");
        let logger = Logger::from_registry(&registry, Some("node-logging"));
        assert!(!logger.is_enabled());

        registry.register("node-logging", || Arc::new(TracingLoggingConnector));
        let logger = Logger::from_registry(&registry, Some("node-logging"));
        assert!(logger.is_enabled());
    }

    #[test]
    fn test_log_entry_serialization() {
        let entry = LogEntry::new(LogLevel::Warn, "Test", "somethingOdd");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["level"], "warn");
        assert!(value.get("data").is_none());
    }
}
