use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::config::DEFAULT_EMAIL_ENTRY_STORAGE;
use crate::connectors::operation_failed;
use crate::error::{ErrorData, Guards, MessagingResult};
use crate::logging::Logger;
use crate::metrics::MessagingMetrics;
use crate::models::EmailConnector;
use crate::registry::ConnectorRegistries;
use crate::storage::EntityStorageConnector;

use super::entities::{EmailEntry, EntryStatus};
use super::{generate_id, now_millis};

const COMPONENT: &str = "EntityStorageEmailConnector";

/// Stores every email as a pending [`EmailEntry`]
#[derive(Clone)]
pub struct EntityStorageEmailConnector {
    storage: Arc<dyn EntityStorageConnector<EmailEntry>>,
    logger: Logger,
}

impl EntityStorageEmailConnector {
    pub fn new(storage: Arc<dyn EntityStorageConnector<EmailEntry>>, logger: Logger) -> Self {
        Self { storage, logger }
    }

    /// Resolve the entry storage by name, `email-entry` by default
    pub fn from_registry(
        registries: &ConnectorRegistries,
        storage_name: Option<&str>,
        logger: Logger,
    ) -> MessagingResult<Self> {
        let storage = registries
            .email_entries
            .get(storage_name.unwrap_or(DEFAULT_EMAIL_ENTRY_STORAGE))?;
        Ok(Self::new(storage, logger))
    }
}

#[async_trait]
impl EmailConnector for EntityStorageEmailConnector {
    async fn send_custom_email(
        &self,
        sender: &str,
        recipients: &[String],
        subject: &str,
        content: &str,
    ) -> MessagingResult<bool> {
        Guards::string_value(COMPONENT, "sender", sender)?;
        Guards::array_value(COMPONENT, "recipients", recipients)?;
        Guards::string_value(COMPONENT, "subject", subject)?;
        Guards::string_value(COMPONENT, "content", content)?;

        self.logger
            .info_with(COMPONENT, "emailSending", json!({ "type": "Custom Email" }))
            .await;

        let entry = EmailEntry {
            id: generate_id(),
            sender: sender.to_string(),
            recipients: recipients.to_vec(),
            ts: now_millis(),
            message: content.to_string(),
            subject: subject.to_string(),
            status: EntryStatus::Pending,
            error: None,
        };

        match self.storage.set(entry).await {
            Ok(()) => {
                MessagingMetrics::record_entry_stored("EmailEntry");
                Ok(true)
            }
            Err(err) => Err(operation_failed(
                &self.logger,
                COMPONENT,
                "email",
                "sendCustomEmailFailed",
                ErrorData::new().with("value", sender),
                err,
            )
            .await),
        }
    }
}
