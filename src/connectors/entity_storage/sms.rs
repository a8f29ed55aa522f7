use std::sync::Arc;

use async_trait::async_trait;

use crate::config::DEFAULT_SMS_ENTRY_STORAGE;
use crate::connectors::operation_failed;
use crate::error::{ErrorData, Guards, MessagingResult};
use crate::logging::Logger;
use crate::metrics::MessagingMetrics;
use crate::models::SmsConnector;
use crate::registry::ConnectorRegistries;
use crate::storage::EntityStorageConnector;

use super::entities::{EntryStatus, SmsEntry};
use super::{generate_id, now_millis};

const COMPONENT: &str = "EntityStorageSmsConnector";

/// Stores every SMS as a sent [`SmsEntry`]
#[derive(Clone)]
pub struct EntityStorageSmsConnector {
    storage: Arc<dyn EntityStorageConnector<SmsEntry>>,
    logger: Logger,
}

impl EntityStorageSmsConnector {
    pub fn new(storage: Arc<dyn EntityStorageConnector<SmsEntry>>, logger: Logger) -> Self {
        Self { storage, logger }
    }

    pub fn from_registry(
        registries: &ConnectorRegistries,
        storage_name: Option<&str>,
        logger: Logger,
    ) -> MessagingResult<Self> {
        let storage = registries
            .sms_entries
            .get(storage_name.unwrap_or(DEFAULT_SMS_ENTRY_STORAGE))?;
        Ok(Self::new(storage, logger))
    }
}

#[async_trait]
impl SmsConnector for EntityStorageSmsConnector {
    async fn send_sms(&self, phone_number: &str, message: &str) -> MessagingResult<bool> {
        Guards::string_value(COMPONENT, "phone_number", phone_number)?;
        Guards::string_value(COMPONENT, "message", message)?;

        self.logger.info(COMPONENT, "smsSending").await;

        let entry = SmsEntry {
            id: generate_id(),
            phone_number: phone_number.to_string(),
            ts: now_millis(),
            message: message.to_string(),
            status: EntryStatus::Sent,
            error: None,
        };

        match self.storage.set(entry).await {
            Ok(()) => {
                MessagingMetrics::record_entry_stored("SmsEntry");
                Ok(true)
            }
            Err(err) => Err(operation_failed(
                &self.logger,
                COMPONENT,
                "sms",
                "sendSMSFailed",
                ErrorData::new().with("value", phone_number),
                err,
            )
            .await),
        }
    }
}
