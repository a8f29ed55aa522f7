//! Bundle of the registries a messaging host wires together

use std::sync::Arc;

use crate::config::StorageSettings;
use crate::connectors::entity_storage::{
    EmailEntry, PushNotificationDeviceEntry, PushNotificationMessageEntry, SmsEntry,
};
use crate::logging::LoggingConnector;
use crate::models::{EmailConnector, PushNotificationConnector, SmsConnector};
use crate::storage::{Entity, EntityStorageConnector, MemoryEntityStorageConnector};
use crate::template::TemplateEntry;

use super::ConnectorRegistry;

/// One registry per channel plus the entity storage registries
pub struct ConnectorRegistries {
    pub email: ConnectorRegistry<dyn EmailConnector>,
    pub sms: ConnectorRegistry<dyn SmsConnector>,
    pub push_notification: ConnectorRegistry<dyn PushNotificationConnector>,
    pub logging: ConnectorRegistry<dyn LoggingConnector>,
    pub email_entries: ConnectorRegistry<dyn EntityStorageConnector<EmailEntry>>,
    pub sms_entries: ConnectorRegistry<dyn EntityStorageConnector<SmsEntry>>,
    pub push_device_entries:
        ConnectorRegistry<dyn EntityStorageConnector<PushNotificationDeviceEntry>>,
    pub push_message_entries:
        ConnectorRegistry<dyn EntityStorageConnector<PushNotificationMessageEntry>>,
    pub templates: ConnectorRegistry<dyn EntityStorageConnector<TemplateEntry>>,
}

impl Default for ConnectorRegistries {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectorRegistries {
    pub fn new() -> Self {
        Self {
            email: ConnectorRegistry::new("messaging-email"),
            sms: ConnectorRegistry::new("messaging-sms"),
            push_notification: ConnectorRegistry::new("messaging-push-notification"),
            logging: ConnectorRegistry::new("logging"),
            email_entries: ConnectorRegistry::new("entity-storage"),
            sms_entries: ConnectorRegistry::new("entity-storage"),
            push_device_entries: ConnectorRegistry::new("entity-storage"),
            push_message_entries: ConnectorRegistry::new("entity-storage"),
            templates: ConnectorRegistry::new("entity-storage"),
        }
    }

    /// Register one shared in-memory store for every entity storage name
    pub fn register_memory_storage(&self, storage: &StorageSettings) {
        register_shared_memory(&self.email_entries, &storage.email_entry);
        register_shared_memory(&self.sms_entries, &storage.sms_entry);
        register_shared_memory(
            &self.push_device_entries,
            &storage.push_notification_device_entry,
        );
        register_shared_memory(
            &self.push_message_entries,
            &storage.push_notification_message_entry,
        );
        register_shared_memory(&self.templates, &storage.template_entry);

        tracing::info!(
            backend = "memory",
            email_entry = %storage.email_entry,
            sms_entry = %storage.sms_entry,
            template_entry = %storage.template_entry,
            "Registered in-memory entity storage"
        );
    }
}

fn register_shared_memory<T: Entity>(
    registry: &ConnectorRegistry<dyn EntityStorageConnector<T>>,
    name: &str,
) {
    let storage: Arc<dyn EntityStorageConnector<T>> =
        Arc::new(MemoryEntityStorageConnector::<T>::new());
    registry.register(name, move || storage.clone());
}
