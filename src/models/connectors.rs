//! Connector traits, one per channel.
//!
//! Implementations validate their own inputs and wrap every provider or
//! storage failure in a [`MessagingError`](crate::error::MessagingError).

use async_trait::async_trait;

use crate::error::MessagingResult;

use super::types::{EmailRecipient, EmailTemplate};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailConnector: Send + Sync {
    /// Send one HTML email to every recipient
    async fn send_custom_email(
        &self,
        sender: &str,
        recipients: &[String],
        subject: &str,
        content: &str,
    ) -> MessagingResult<bool>;
}

/// Provider-side templates and bulk sending
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailTemplateConnector: Send + Sync {
    async fn create_template(&self, template: &EmailTemplate) -> MessagingResult<bool>;

    async fn delete_template(&self, name: &str) -> MessagingResult<bool>;

    /// Send a stored template to every recipient with per-recipient replacements
    async fn send_massive_email(
        &self,
        sender: &str,
        template_name: &str,
        recipients: &[EmailRecipient],
    ) -> MessagingResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SmsConnector: Send + Sync {
    async fn send_sms(&self, phone_number: &str, message: &str) -> MessagingResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushNotificationConnector: Send + Sync {
    /// Register a device token with an application and return the device address
    async fn register_device(&self, application_id: &str, device_token: &str)
        -> MessagingResult<String>;

    async fn send_single_push_notification(
        &self,
        device_address: &str,
        title: &str,
        message: &str,
    ) -> MessagingResult<bool>;
}

/// Platform applications and topics, cloud providers only
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushTopicConnector: Send + Sync {
    /// Resolve or create a platform application and return its address
    async fn create_platform_application(
        &self,
        app_name: &str,
        platform_type: &str,
        platform_credentials: &str,
    ) -> MessagingResult<String>;

    /// Resolve or create a topic and return its address
    async fn create_topic(&self, topic_name: &str) -> MessagingResult<String>;

    async fn subscribe_to_topic(
        &self,
        topic_address: &str,
        device_address: &str,
    ) -> MessagingResult<bool>;

    async fn publish_to_topic(
        &self,
        topic_address: &str,
        title: &str,
        message: &str,
    ) -> MessagingResult<bool>;
}
