use std::sync::Arc;

use async_trait::async_trait;

use crate::connectors::operation_failed;
use crate::error::{ErrorData, Guards, MessagingResult};
use crate::logging::Logger;
use crate::metrics::MessagingMetrics;
use crate::models::SmsConnector;

use super::client::{AwsSnsApi, PublishRequest, SnsApi};
use super::config::AwsConnectorConfig;

const COMPONENT: &str = "SnsSmsConnector";
const CHANNEL: &str = "sms";

/// SMS connector publishing directly to phone numbers over SNS
#[derive(Clone)]
pub struct SnsSmsConnector {
    api: Arc<dyn SnsApi>,
    logger: Logger,
}

impl SnsSmsConnector {
    pub fn new(api: Arc<dyn SnsApi>, logger: Logger) -> Self {
        Self { api, logger }
    }

    pub async fn connect(config: &AwsConnectorConfig, logger: Logger) -> MessagingResult<Self> {
        config.validate(COMPONENT)?;
        let api = AwsSnsApi::from_config(config).await;
        tracing::info!(region = %config.region, "SNS SMS connector created");
        Ok(Self::new(Arc::new(api), logger))
    }
}

#[async_trait]
impl SmsConnector for SnsSmsConnector {
    async fn send_sms(&self, phone_number: &str, message: &str) -> MessagingResult<bool> {
        Guards::string_value(COMPONENT, "phone_number", phone_number)?;
        Guards::string_value(COMPONENT, "message", message)?;

        self.logger.info(COMPONENT, "smsSending").await;

        let request = PublishRequest {
            phone_number: Some(phone_number.to_string()),
            message: message.to_string(),
            ..Default::default()
        };

        match self
            .api
            .publish(request)
            .await
            .and_then(|response| response.into_output("Publish"))
        {
            Ok(_) => {
                MessagingMetrics::record_sent(CHANNEL);
                Ok(true)
            }
            Err(err) => Err(operation_failed(
                &self.logger,
                COMPONENT,
                CHANNEL,
                "sendSMSFailed",
                ErrorData::new().with("value", phone_number),
                err,
            )
            .await),
        }
    }
}
