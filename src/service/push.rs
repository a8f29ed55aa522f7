use std::sync::Arc;

use crate::config::DEFAULT_PUSH_NOTIFICATION_CONNECTOR;
use crate::error::{Guards, MessagingResult};
use crate::models::PushNotificationConnector;
use crate::registry::ConnectorRegistries;

const COMPONENT: &str = "MessagingPushNotificationService";

#[derive(Clone)]
pub struct PushNotificationService {
    connector: Arc<dyn PushNotificationConnector>,
}

impl PushNotificationService {
    pub fn new(connector: Arc<dyn PushNotificationConnector>) -> Self {
        Self { connector }
    }

    pub fn from_registry(
        registries: &ConnectorRegistries,
        connector_name: Option<&str>,
    ) -> MessagingResult<Self> {
        let connector = registries
            .push_notification
            .get(connector_name.unwrap_or(DEFAULT_PUSH_NOTIFICATION_CONNECTOR))?;
        Ok(Self::new(connector))
    }

    /// Register a device token; returns the device address used for sending
    pub async fn register_device(
        &self,
        application_id: &str,
        device_token: &str,
    ) -> MessagingResult<String> {
        Guards::string_value(COMPONENT, "application_id", application_id)?;
        Guards::string_value(COMPONENT, "device_token", device_token)?;

        self.connector
            .register_device(application_id, device_token)
            .await
    }

    pub async fn send_single_push_notification(
        &self,
        device_address: &str,
        title: &str,
        message: &str,
    ) -> MessagingResult<bool> {
        Guards::string_value(COMPONENT, "device_address", device_address)?;
        Guards::string_value(COMPONENT, "title", title)?;
        Guards::string_value(COMPONENT, "message", message)?;

        self.connector
            .send_single_push_notification(device_address, title, message)
            .await
    }
}
