use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Settings;
use crate::error::{Guards, MessagingError, MessagingResult};
use crate::models::{EmailConnector, PushNotificationConnector, SmsConnector};
use crate::registry::ConnectorRegistries;
use crate::template::{populate_template, TemplateContent, TemplateStore};

const COMPONENT: &str = "MessagingService";

/// Template-driven messaging across email, SMS and push.
///
/// Each channel is optional. Every operation checks, in order:
/// 1. the channel's connector is configured
/// 2. the inputs pass their guards
/// 3. the template exists for the requested locale
///
/// and only then delegates the populated template to the connector.
#[derive(Clone)]
pub struct MessagingService {
    email: Option<Arc<dyn EmailConnector>>,
    sms: Option<Arc<dyn SmsConnector>>,
    push_notification: Option<Arc<dyn PushNotificationConnector>>,
    templates: TemplateStore,
}

impl MessagingService {
    pub fn builder(templates: TemplateStore) -> MessagingServiceBuilder {
        MessagingServiceBuilder::new(templates)
    }

    /// Wire the service from the registries using the configured names.
    ///
    /// A channel whose connector is not registered is left unconfigured; the
    /// template storage must be registered.
    pub fn from_registries(
        registries: &ConnectorRegistries,
        settings: &Settings,
    ) -> MessagingResult<Self> {
        Ok(MessagingServiceBuilder::from_registries(registries, settings)?.build())
    }

    pub async fn send_custom_email(
        &self,
        sender: &str,
        recipients: &[String],
        template_id: &str,
        data: &HashMap<String, String>,
        locale: &str,
    ) -> MessagingResult<bool> {
        let connector = configured(&self.email, "emailMessagingConnector")?;

        Guards::string_value(COMPONENT, "sender", sender)?;
        Guards::array_value(COMPONENT, "recipients", recipients)?;
        Guards::string_value(COMPONENT, "template_id", template_id)?;
        Guards::string_value(COMPONENT, "locale", locale)?;

        let populated = self.populated(template_id, data, locale).await?;

        tracing::debug!(
            template_id = %template_id,
            locale = %locale,
            recipients = recipients.len(),
            "Sending templated email"
        );
        connector
            .send_custom_email(sender, recipients, &populated.title, &populated.content)
            .await
    }

    pub async fn register_device(
        &self,
        application_id: &str,
        device_token: &str,
    ) -> MessagingResult<String> {
        let connector = configured(&self.push_notification, "pushNotificationMessagingConnector")?;

        Guards::string_value(COMPONENT, "application_id", application_id)?;
        Guards::string_value(COMPONENT, "device_token", device_token)?;

        connector.register_device(application_id, device_token).await
    }

    pub async fn send_single_push_notification(
        &self,
        device_address: &str,
        template_id: &str,
        data: &HashMap<String, String>,
        locale: &str,
    ) -> MessagingResult<bool> {
        let connector = configured(&self.push_notification, "pushNotificationMessagingConnector")?;

        Guards::string_value(COMPONENT, "device_address", device_address)?;
        Guards::string_value(COMPONENT, "template_id", template_id)?;
        Guards::string_value(COMPONENT, "locale", locale)?;

        let populated = self.populated(template_id, data, locale).await?;

        tracing::debug!(template_id = %template_id, locale = %locale, "Sending templated push notification");
        connector
            .send_single_push_notification(device_address, &populated.title, &populated.content)
            .await
    }

    /// Send the populated template content; SMS has no title
    pub async fn send_sms(
        &self,
        phone_number: &str,
        template_id: &str,
        data: &HashMap<String, String>,
        locale: &str,
    ) -> MessagingResult<bool> {
        let connector = configured(&self.sms, "smsMessagingConnector")?;

        Guards::string_value(COMPONENT, "phone_number", phone_number)?;
        Guards::string_value(COMPONENT, "template_id", template_id)?;
        Guards::string_value(COMPONENT, "locale", locale)?;

        let populated = self.populated(template_id, data, locale).await?;

        tracing::debug!(template_id = %template_id, locale = %locale, "Sending templated SMS");
        connector.send_sms(phone_number, &populated.content).await
    }

    pub async fn create_or_update_template(
        &self,
        template_id: &str,
        locale: &str,
        title: &str,
        content: &str,
    ) -> MessagingResult<bool> {
        Guards::string_value(COMPONENT, "template_id", template_id)?;
        Guards::string_value(COMPONENT, "locale", locale)?;
        Guards::string_value(COMPONENT, "title", title)?;
        Guards::string_value(COMPONENT, "content", content)?;

        self.templates
            .create_or_update(template_id, locale, title, content)
            .await?;
        Ok(true)
    }

    pub async fn get_template(
        &self,
        template_id: &str,
        locale: &str,
    ) -> MessagingResult<TemplateContent> {
        Guards::string_value(COMPONENT, "template_id", template_id)?;
        Guards::string_value(COMPONENT, "locale", locale)?;

        self.templates.get(template_id, locale).await
    }

    async fn populated(
        &self,
        template_id: &str,
        data: &HashMap<String, String>,
        locale: &str,
    ) -> MessagingResult<TemplateContent> {
        let template = self.templates.get(template_id, locale).await?;
        Ok(populate_template(&template, data))
    }
}

fn configured<'a, T: ?Sized>(
    connector: &'a Option<Arc<T>>,
    property: &'static str,
) -> MessagingResult<&'a Arc<T>> {
    connector
        .as_ref()
        .ok_or(MessagingError::ConnectorNotConfigured {
            component: COMPONENT,
            property,
        })
}

/// Builder for [`MessagingService`]; channels default to unconfigured
pub struct MessagingServiceBuilder {
    email: Option<Arc<dyn EmailConnector>>,
    sms: Option<Arc<dyn SmsConnector>>,
    push_notification: Option<Arc<dyn PushNotificationConnector>>,
    templates: TemplateStore,
}

impl MessagingServiceBuilder {
    pub fn new(templates: TemplateStore) -> Self {
        Self {
            email: None,
            sms: None,
            push_notification: None,
            templates,
        }
    }

    pub fn from_registries(
        registries: &ConnectorRegistries,
        settings: &Settings,
    ) -> MessagingResult<Self> {
        let templates = TemplateStore::from_registry(
            registries,
            Some(settings.storage.template_entry.as_str()),
        )?;
        let names = &settings.connectors;

        let builder = Self {
            email: registries.email.get_if_exists(&names.email),
            sms: registries.sms.get_if_exists(&names.sms),
            push_notification: registries
                .push_notification
                .get_if_exists(&names.push_notification),
            templates,
        };

        tracing::info!(
            email = builder.email.is_some(),
            sms = builder.sms.is_some(),
            push_notification = builder.push_notification.is_some(),
            "Messaging service channels resolved"
        );
        Ok(builder)
    }

    pub fn email(mut self, connector: Arc<dyn EmailConnector>) -> Self {
        self.email = Some(connector);
        self
    }

    pub fn sms(mut self, connector: Arc<dyn SmsConnector>) -> Self {
        self.sms = Some(connector);
        self
    }

    pub fn push_notification(mut self, connector: Arc<dyn PushNotificationConnector>) -> Self {
        self.push_notification = Some(connector);
        self
    }

    pub fn build(self) -> MessagingService {
        MessagingService {
            email: self.email,
            sms: self.sms,
            push_notification: self.push_notification,
            templates: self.templates,
        }
    }
}
