use std::sync::Arc;

use crate::config::DEFAULT_EMAIL_CONNECTOR;
use crate::error::{Guards, MessagingResult};
use crate::models::EmailConnector;
use crate::registry::ConnectorRegistries;

const COMPONENT: &str = "MessagingEmailService";

/// Sends email through whichever connector is registered for the channel
#[derive(Clone)]
pub struct EmailService {
    connector: Arc<dyn EmailConnector>,
}

impl EmailService {
    pub fn new(connector: Arc<dyn EmailConnector>) -> Self {
        Self { connector }
    }

    /// Resolve the connector by name, `messaging-email` when `None`
    pub fn from_registry(
        registries: &ConnectorRegistries,
        connector_name: Option<&str>,
    ) -> MessagingResult<Self> {
        let connector = registries
            .email
            .get(connector_name.unwrap_or(DEFAULT_EMAIL_CONNECTOR))?;
        Ok(Self::new(connector))
    }

    pub async fn send_custom_email(
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

        self.connector
            .send_custom_email(sender, recipients, subject, content)
            .await
    }
}
