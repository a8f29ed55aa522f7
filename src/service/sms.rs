use std::sync::Arc;

use crate::config::DEFAULT_SMS_CONNECTOR;
use crate::error::{Guards, MessagingResult};
use crate::models::SmsConnector;
use crate::registry::ConnectorRegistries;

const COMPONENT: &str = "MessagingSmsService";

#[derive(Clone)]
pub struct SmsService {
    connector: Arc<dyn SmsConnector>,
}

impl SmsService {
    pub fn new(connector: Arc<dyn SmsConnector>) -> Self {
        Self { connector }
    }

    pub fn from_registry(
        registries: &ConnectorRegistries,
        connector_name: Option<&str>,
    ) -> MessagingResult<Self> {
        let connector = registries
            .sms
            .get(connector_name.unwrap_or(DEFAULT_SMS_CONNECTOR))?;
        Ok(Self::new(connector))
    }

    pub async fn send_sms(&self, phone_number: &str, message: &str) -> MessagingResult<bool> {
        Guards::string_value(COMPONENT, "phone_number", phone_number)?;
        Guards::string_value(COMPONENT, "message", message)?;

        self.connector.send_sms(phone_number, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::entity_storage::EntityStorageSmsConnector;
    use crate::logging::Logger;
    use crate::models::MockSmsConnector;
    use crate::storage::EntityStorageConnector;

    #[tokio::test]
    async fn test_send_sms_through_registered_storage_connector() {
        let registries = ConnectorRegistries::new();
        registries.register_memory_storage(&Default::default());
        let connector =
            EntityStorageSmsConnector::from_registry(&registries, None, Logger::disabled()).unwrap();
        registries
            .sms
            .register(DEFAULT_SMS_CONNECTOR, move || Arc::new(connector.clone()));

        let service = SmsService::from_registry(&registries, None).unwrap();
        assert!(service.send_sms("+1234567890", "Test").await.unwrap());

        let storage = registries.sms_entries.get("sms-entry").unwrap();
        let stored = storage.query().await.unwrap();
        assert_eq!(stored.entities.len(), 1);
    }

    #[tokio::test]
    async fn test_guards_message() {
        let mut connector = MockSmsConnector::new();
        connector.expect_send_sms().never();

        let err = SmsService::new(Arc::new(connector))
            .send_sms("+1234567890", "")
            .await
            .unwrap_err();
        assert_eq!(err.as_guard().map(|g| g.property), Some("message"));
    }
}
