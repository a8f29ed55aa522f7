//! In-memory logging connector

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{LogEntry, LoggingConnector};

/// Keeps every entry in memory. Entries are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryLoggingConnector {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLoggingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded entries, oldest first
    pub async fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().await.clone()
    }

    /// Messages of the recorded entries, oldest first
    pub async fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .await
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

#[async_trait]
impl LoggingConnector for MemoryLoggingConnector {
    async fn log(&self, entry: LogEntry) {
        self.entries.lock().await.push(entry);
    }
}
