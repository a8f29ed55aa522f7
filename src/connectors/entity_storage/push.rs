use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{DEFAULT_PUSH_DEVICE_ENTRY_STORAGE, DEFAULT_PUSH_MESSAGE_ENTRY_STORAGE};
use crate::connectors::operation_failed;
use crate::error::{ErrorData, Guards, MessagingResult};
use crate::logging::Logger;
use crate::metrics::MessagingMetrics;
use crate::models::PushNotificationConnector;
use crate::registry::ConnectorRegistries;
use crate::storage::EntityStorageConnector;

use super::entities::{EntryStatus, PushNotificationDeviceEntry, PushNotificationMessageEntry};
use super::{generate_id, now_millis};

const COMPONENT: &str = "EntityStoragePushNotificationConnector";
const CHANNEL: &str = "push";

/// Stores device registrations and notifications as pending entries.
///
/// The id of the stored device entry serves as the device address.
#[derive(Clone)]
pub struct EntityStoragePushNotificationConnector {
    devices: Arc<dyn EntityStorageConnector<PushNotificationDeviceEntry>>,
    messages: Arc<dyn EntityStorageConnector<PushNotificationMessageEntry>>,
    logger: Logger,
}

impl EntityStoragePushNotificationConnector {
    pub fn new(
        devices: Arc<dyn EntityStorageConnector<PushNotificationDeviceEntry>>,
        messages: Arc<dyn EntityStorageConnector<PushNotificationMessageEntry>>,
        logger: Logger,
    ) -> Self {
        Self {
            devices,
            messages,
            logger,
        }
    }

    pub fn from_registry(
        registries: &ConnectorRegistries,
        device_storage_name: Option<&str>,
        message_storage_name: Option<&str>,
        logger: Logger,
    ) -> MessagingResult<Self> {
        let devices = registries
            .push_device_entries
            .get(device_storage_name.unwrap_or(DEFAULT_PUSH_DEVICE_ENTRY_STORAGE))?;
        let messages = registries
            .push_message_entries
            .get(message_storage_name.unwrap_or(DEFAULT_PUSH_MESSAGE_ENTRY_STORAGE))?;
        Ok(Self::new(devices, messages, logger))
    }
}

#[async_trait]
impl PushNotificationConnector for EntityStoragePushNotificationConnector {
    async fn register_device(
        &self,
        application_id: &str,
        device_token: &str,
    ) -> MessagingResult<String> {
        Guards::string_value(COMPONENT, "application_id", application_id)?;
        Guards::string_value(COMPONENT, "device_token", device_token)?;

        self.logger.info(COMPONENT, "deviceRegistering").await;

        let id = generate_id();
        let entry = PushNotificationDeviceEntry {
            id: id.clone(),
            application_id: application_id.to_string(),
            device_token: device_token.to_string(),
            ts: now_millis(),
            status: EntryStatus::Pending,
            error: None,
        };

        match self.devices.set(entry).await {
            Ok(()) => {
                MessagingMetrics::record_entry_stored("PushNotificationDeviceEntry");
                Ok(id)
            }
            Err(err) => Err(operation_failed(
                &self.logger,
                COMPONENT,
                CHANNEL,
                "deviceTokenRegisterFailed",
                ErrorData::new()
                    .with("property", "applicationId")
                    .with("value", application_id),
                err,
            )
            .await),
        }
    }

    async fn send_single_push_notification(
        &self,
        device_address: &str,
        title: &str,
        message: &str,
    ) -> MessagingResult<bool> {
        Guards::string_value(COMPONENT, "device_address", device_address)?;
        Guards::string_value(COMPONENT, "title", title)?;
        Guards::string_value(COMPONENT, "message", message)?;

        self.logger.info(COMPONENT, "pushNotificationSending").await;

        let entry = PushNotificationMessageEntry {
            id: generate_id(),
            device_address: device_address.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            ts: now_millis(),
            status: EntryStatus::Pending,
            error: None,
        };

        match self.messages.set(entry).await {
            Ok(()) => {
                MessagingMetrics::record_entry_stored("PushNotificationMessageEntry");
                Ok(true)
            }
            Err(err) => Err(operation_failed(
                &self.logger,
                COMPONENT,
                CHANNEL,
                "sendPushNotificationFailed",
                ErrorData::new().with("value", device_address),
                err,
            )
            .await),
        }
    }
}
