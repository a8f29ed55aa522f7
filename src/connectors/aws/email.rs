use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::connectors::operation_failed;
use crate::error::{ErrorData, Guards, MessagingError, MessagingResult};
use crate::logging::Logger;
use crate::metrics::MessagingMetrics;
use crate::models::{EmailConnector, EmailRecipient, EmailTemplate, EmailTemplateConnector};

use super::client::{AwsSesApi, BulkEmailDestination, BulkEmailRequest, SesApi, SimpleEmail};
use super::config::AwsConnectorConfig;

const COMPONENT: &str = "SesEmailConnector";
const CHANNEL: &str = "email";

/// Email connector backed by AWS SES v2
#[derive(Clone)]
pub struct SesEmailConnector {
    api: Arc<dyn SesApi>,
    logger: Logger,
}

impl SesEmailConnector {
    pub fn new(api: Arc<dyn SesApi>, logger: Logger) -> Self {
        Self { api, logger }
    }

    /// Validate the configuration and build an SES client from it
    pub async fn connect(config: &AwsConnectorConfig, logger: Logger) -> MessagingResult<Self> {
        config.validate(COMPONENT)?;
        let api = AwsSesApi::from_config(config).await;
        tracing::info!(
            endpoint = %config.endpoint,
            region = %config.region,
            "SES email connector created"
        );
        Ok(Self::new(Arc::new(api), logger))
    }

    async fn failed(
        &self,
        key: &'static str,
        data: ErrorData,
        cause: impl Into<crate::error::BoxError>,
    ) -> MessagingError {
        operation_failed(&self.logger, COMPONENT, CHANNEL, key, data, cause).await
    }
}

#[async_trait]
impl EmailConnector for SesEmailConnector {
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

        let email = SimpleEmail {
            from: sender.to_string(),
            to: recipients.to_vec(),
            subject: subject.to_string(),
            html: content.to_string(),
        };

        match self
            .api
            .send_email(email)
            .await
            .and_then(|response| response.into_output("SendEmail"))
        {
            Ok(message_id) => {
                tracing::debug!(message_id = ?message_id, recipients = recipients.len(), "Email sent");
                MessagingMetrics::record_sent(CHANNEL);
                Ok(true)
            }
            Err(err) => Err(self
                .failed(
                    "sendCustomEmailFailed",
                    ErrorData::new().with("value", recipients.join(", ")),
                    err,
                )
                .await),
        }
    }
}

#[async_trait]
impl EmailTemplateConnector for SesEmailConnector {
    async fn create_template(&self, template: &EmailTemplate) -> MessagingResult<bool> {
        Guards::string_value(COMPONENT, "name", &template.name)?;
        Guards::string_value(COMPONENT, "subject", &template.subject)?;
        Guards::string_value(COMPONENT, "content", &template.content)?;

        self.logger
            .info_with(COMPONENT, "templateCreating", json!({ "name": template.name }))
            .await;

        let result = self
            .api
            .create_email_template(&template.name, &template.subject, &template.content)
            .await
            .and_then(|response| response.into_output("CreateEmailTemplate"));

        match result {
            Ok(()) => Ok(true),
            Err(err) => Err(self
                .failed(
                    "createTemplateFailed",
                    ErrorData::new().with("value", template.name.as_str()),
                    err,
                )
                .await),
        }
    }

    async fn delete_template(&self, name: &str) -> MessagingResult<bool> {
        Guards::string_value(COMPONENT, "name", name)?;

        self.logger
            .info_with(COMPONENT, "templateDeleting", json!({ "name": name }))
            .await;

        let result = self
            .api
            .delete_email_template(name)
            .await
            .and_then(|response| response.into_output("DeleteEmailTemplate"));

        match result {
            Ok(()) => Ok(true),
            Err(err) => Err(self
                .failed("deleteTemplateFailed", ErrorData::new().with("value", name), err)
                .await),
        }
    }

    async fn send_massive_email(
        &self,
        sender: &str,
        template_name: &str,
        recipients: &[EmailRecipient],
    ) -> MessagingResult<bool> {
        Guards::string_value(COMPONENT, "sender", sender)?;
        Guards::string_value(COMPONENT, "template_name", template_name)?;
        Guards::array_value(COMPONENT, "recipients", recipients)?;

        self.logger
            .info_with(COMPONENT, "sendMassiveEmail", json!({ "name": template_name }))
            .await;

        let data = || ErrorData::new().with("value", template_name);

        let mut entries = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            let replacement_template_data = match recipient.replacement_data() {
                Ok(replacements) => replacements,
                Err(err) => return Err(self.failed("sendMassiveEmailFailed", data(), err).await),
            };
            entries.push(BulkEmailDestination {
                to: recipient.email.clone(),
                replacement_template_data,
            });
        }

        let request = BulkEmailRequest {
            from: sender.to_string(),
            template_name: template_name.to_string(),
            entries,
        };

        match self
            .api
            .send_bulk_email(request)
            .await
            .and_then(|response| response.into_output("SendBulkEmail"))
        {
            Ok(()) => {
                MessagingMetrics::record_sent(CHANNEL);
                Ok(true)
            }
            Err(err) => Err(self.failed("sendMassiveEmailFailed", data(), err).await),
        }
    }
}
