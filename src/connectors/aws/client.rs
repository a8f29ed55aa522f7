//! Thin seams over the AWS SDK clients.
//!
//! The connectors talk to [`SesApi`] and [`SnsApi`] rather than to the SDK
//! directly. [`AwsSesApi`] and [`AwsSnsApi`] implement them on top of
//! `aws-sdk-sesv2` and `aws-sdk-sns`; tests substitute mocks or fakes.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_sesv2::types::{
    Body, BulkEmailContent, BulkEmailEntry, Content, Destination, EmailContent,
    EmailTemplateContent, Message, ReplacementEmailContent, ReplacementTemplate, Template,
};
use thiserror::Error;

use super::config::AwsConnectorConfig;

/// Failures reported by a provider call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("{operation} failed: {message}")]
    Sdk {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} request could not be built: {message}")]
    InvalidRequest {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} returned HTTP status {status}")]
    UnexpectedStatus { operation: &'static str, status: u16 },

    #[error("{operation} response is missing {field}")]
    MissingOutput {
        operation: &'static str,
        field: &'static str,
    },
}

/// Provider output together with the HTTP status it arrived with.
///
/// The SDK adapters below only see 2xx responses; the SDK reports any other
/// status as an `SdkError`, which maps to [`ProviderError::Sdk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse<T> {
    pub http_status: u16,
    pub output: T,
}

impl<T> ProviderResponse<T> {
    pub fn ok(output: T) -> Self {
        Self {
            http_status: 200,
            output,
        }
    }

    pub fn with_status(http_status: u16, output: T) -> Self {
        Self {
            http_status,
            output,
        }
    }

    pub fn is_success(&self) -> bool {
        self.http_status == 200
    }

    /// Unwrap the output, treating any status other than 200 as a failure
    pub fn into_output(self, operation: &'static str) -> Result<T, ProviderError> {
        if !self.is_success() {
            return Err(ProviderError::UnexpectedStatus {
                operation,
                status: self.http_status,
            });
        }
        Ok(self.output)
    }
}

impl ProviderResponse<Option<String>> {
    /// Unwrap a provider-issued identifier that must be present
    pub fn into_identifier(
        self,
        operation: &'static str,
        field: &'static str,
    ) -> Result<String, ProviderError> {
        self.into_output(operation)?
            .filter(|id| !id.is_empty())
            .ok_or(ProviderError::MissingOutput { operation, field })
    }
}

pub type ProviderResult<T> = Result<ProviderResponse<T>, ProviderError>;

/// A simple HTML email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkEmailDestination {
    pub to: String,
    /// JSON object of template replacements
    pub replacement_template_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkEmailRequest {
    pub from: String,
    pub template_name: String,
    pub entries: Vec<BulkEmailDestination>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformApplication {
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformEndpoint {
    pub arn: String,
    pub attributes: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub arn: Option<String>,
    pub protocol: Option<String>,
    pub endpoint: Option<String>,
}

/// SNS publish target and payload; exactly one target should be set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishRequest {
    pub target_arn: Option<String>,
    pub topic_arn: Option<String>,
    pub phone_number: Option<String>,
    pub message: String,
    pub message_structure: Option<String>,
}

/// SES v2 operations used by the email connector
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SesApi: Send + Sync {
    /// Returns the message id
    async fn send_email(&self, email: SimpleEmail) -> ProviderResult<Option<String>>;

    async fn create_email_template(
        &self,
        name: &str,
        subject: &str,
        html: &str,
    ) -> ProviderResult<()>;

    async fn delete_email_template(&self, name: &str) -> ProviderResult<()>;

    async fn send_bulk_email(&self, request: BulkEmailRequest) -> ProviderResult<()>;
}

/// SNS operations used by the SMS and push connectors
#[async_trait]
pub trait SnsApi: Send + Sync {
    async fn list_platform_applications(&self) -> ProviderResult<Vec<PlatformApplication>>;

    /// Returns the application ARN
    async fn create_platform_application(
        &self,
        name: &str,
        platform: &str,
        platform_credentials: &str,
    ) -> ProviderResult<Option<String>>;

    async fn list_endpoints_by_platform_application(
        &self,
        application_arn: &str,
    ) -> ProviderResult<Vec<PlatformEndpoint>>;

    /// Returns the endpoint ARN
    async fn create_platform_endpoint(
        &self,
        application_arn: &str,
        token: &str,
    ) -> ProviderResult<Option<String>>;

    async fn list_topics(&self) -> ProviderResult<Vec<Topic>>;

    /// Returns the topic ARN
    async fn create_topic(&self, name: &str) -> ProviderResult<Option<String>>;

    async fn list_subscriptions_by_topic(
        &self,
        topic_arn: &str,
    ) -> ProviderResult<Vec<Subscription>>;

    /// Returns the subscription ARN
    async fn subscribe(
        &self,
        topic_arn: &str,
        protocol: &str,
        endpoint: &str,
    ) -> ProviderResult<Option<String>>;

    /// Returns the message id
    async fn publish(&self, request: PublishRequest) -> ProviderResult<Option<String>>;
}

/// Load an SDK config with an explicit endpoint, region and static credentials
pub async fn load_sdk_config(config: &AwsConnectorConfig) -> aws_config::SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .endpoint_url(&config.endpoint)
        .region(aws_config::Region::new(config.region.clone()))
        .credentials_provider(aws_sdk_sns::config::Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "messaging-config",
        ))
        .load()
        .await
}

fn sdk_error<E: std::error::Error>(operation: &'static str, err: E) -> ProviderError {
    ProviderError::Sdk {
        operation,
        message: aws_sdk_sns::error::DisplayErrorContext(&err).to_string(),
    }
}

fn invalid_request(operation: &'static str, err: impl std::fmt::Display) -> ProviderError {
    ProviderError::InvalidRequest {
        operation,
        message: err.to_string(),
    }
}

/// [`SesApi`] backed by `aws_sdk_sesv2::Client`
#[derive(Debug, Clone)]
pub struct AwsSesApi {
    client: aws_sdk_sesv2::Client,
}

impl AwsSesApi {
    pub fn new(client: aws_sdk_sesv2::Client) -> Self {
        Self { client }
    }

    pub async fn from_config(config: &AwsConnectorConfig) -> Self {
        let sdk_config = load_sdk_config(config).await;
        Self::new(aws_sdk_sesv2::Client::new(&sdk_config))
    }
}

#[async_trait]
impl SesApi for AwsSesApi {
    async fn send_email(&self, email: SimpleEmail) -> ProviderResult<Option<String>> {
        const OPERATION: &str = "SendEmail";

        let subject = Content::builder()
            .data(email.subject)
            .build()
            .map_err(|e| invalid_request(OPERATION, e))?;
        let html = Content::builder()
            .data(email.html)
            .build()
            .map_err(|e| invalid_request(OPERATION, e))?;

        let content = EmailContent::builder()
            .simple(
                Message::builder()
                    .subject(subject)
                    .body(Body::builder().html(html).build())
                    .build(),
            )
            .build();

        let output = self
            .client
            .send_email()
            .from_email_address(email.from)
            .destination(Destination::builder().set_to_addresses(Some(email.to)).build())
            .content(content)
            .send()
            .await
            .map_err(|e| sdk_error(OPERATION, e))?;

        Ok(ProviderResponse::ok(output.message_id().map(str::to_string)))
    }

    async fn create_email_template(
        &self,
        name: &str,
        subject: &str,
        html: &str,
    ) -> ProviderResult<()> {
        self.client
            .create_email_template()
            .template_name(name)
            .template_content(
                EmailTemplateContent::builder()
                    .subject(subject)
                    .html(html)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| sdk_error("CreateEmailTemplate", e))?;

        Ok(ProviderResponse::ok(()))
    }

    async fn delete_email_template(&self, name: &str) -> ProviderResult<()> {
        self.client
            .delete_email_template()
            .template_name(name)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteEmailTemplate", e))?;

        Ok(ProviderResponse::ok(()))
    }

    async fn send_bulk_email(&self, request: BulkEmailRequest) -> ProviderResult<()> {
        let entries: Vec<BulkEmailEntry> = request
            .entries
            .into_iter()
            .map(|entry| {
                let builder = BulkEmailEntry::builder()
                    .destination(Destination::builder().to_addresses(entry.to).build());
                match entry.replacement_template_data {
                    Some(data) => builder
                        .replacement_email_content(
                            ReplacementEmailContent::builder()
                                .replacement_template(
                                    ReplacementTemplate::builder()
                                        .replacement_template_data(data)
                                        .build(),
                                )
                                .build(),
                        )
                        .build(),
                    None => builder.build(),
                }
            })
            .collect();

        self.client
            .send_bulk_email()
            .from_email_address(request.from)
            .set_bulk_email_entries(Some(entries))
            .default_content(
                BulkEmailContent::builder()
                    .template(Template::builder().template_name(request.template_name).build())
                    .build(),
            )
            .send()
            .await
            .map_err(|e| sdk_error("SendBulkEmail", e))?;

        Ok(ProviderResponse::ok(()))
    }
}

/// [`SnsApi`] backed by `aws_sdk_sns::Client`
#[derive(Debug, Clone)]
pub struct AwsSnsApi {
    client: aws_sdk_sns::Client,
}

impl AwsSnsApi {
    pub fn new(client: aws_sdk_sns::Client) -> Self {
        Self { client }
    }

    pub async fn from_config(config: &AwsConnectorConfig) -> Self {
        let sdk_config = load_sdk_config(config).await;
        Self::new(aws_sdk_sns::Client::new(&sdk_config))
    }
}

#[async_trait]
impl SnsApi for AwsSnsApi {
    async fn list_platform_applications(&self) -> ProviderResult<Vec<PlatformApplication>> {
        let output = self
            .client
            .list_platform_applications()
            .send()
            .await
            .map_err(|e| sdk_error("ListPlatformApplications", e))?;

        let applications = output
            .platform_applications()
            .iter()
            .filter_map(|app| app.platform_application_arn())
            .map(|arn| PlatformApplication {
                arn: arn.to_string(),
            })
            .collect();
        Ok(ProviderResponse::ok(applications))
    }

    async fn create_platform_application(
        &self,
        name: &str,
        platform: &str,
        platform_credentials: &str,
    ) -> ProviderResult<Option<String>> {
        let output = self
            .client
            .create_platform_application()
            .name(name)
            .platform(platform)
            .attributes("PlatformCredential", platform_credentials)
            .send()
            .await
            .map_err(|e| sdk_error("CreatePlatformApplication", e))?;

        Ok(ProviderResponse::ok(
            output.platform_application_arn().map(str::to_string),
        ))
    }

    async fn list_endpoints_by_platform_application(
        &self,
        application_arn: &str,
    ) -> ProviderResult<Vec<PlatformEndpoint>> {
        let output = self
            .client
            .list_endpoints_by_platform_application()
            .platform_application_arn(application_arn)
            .send()
            .await
            .map_err(|e| sdk_error("ListEndpointsByPlatformApplication", e))?;

        let endpoints = output
            .endpoints()
            .iter()
            .filter_map(|endpoint| {
                endpoint.endpoint_arn().map(|arn| PlatformEndpoint {
                    arn: arn.to_string(),
                    attributes: endpoint.attributes().cloned().unwrap_or_default(),
                })
            })
            .collect();
        Ok(ProviderResponse::ok(endpoints))
    }

    async fn create_platform_endpoint(
        &self,
        application_arn: &str,
        token: &str,
    ) -> ProviderResult<Option<String>> {
        let output = self
            .client
            .create_platform_endpoint()
            .platform_application_arn(application_arn)
            .token(token)
            .send()
            .await
            .map_err(|e| sdk_error("CreatePlatformEndpoint", e))?;

        Ok(ProviderResponse::ok(output.endpoint_arn().map(str::to_string)))
    }

    async fn list_topics(&self) -> ProviderResult<Vec<Topic>> {
        let output = self
            .client
            .list_topics()
            .send()
            .await
            .map_err(|e| sdk_error("ListTopics", e))?;

        let topics = output
            .topics()
            .iter()
            .filter_map(|topic| topic.topic_arn())
            .map(|arn| Topic {
                arn: arn.to_string(),
            })
            .collect();
        Ok(ProviderResponse::ok(topics))
    }

    async fn create_topic(&self, name: &str) -> ProviderResult<Option<String>> {
        let output = self
            .client
            .create_topic()
            .name(name)
            .send()
            .await
            .map_err(|e| sdk_error("CreateTopic", e))?;

        Ok(ProviderResponse::ok(output.topic_arn().map(str::to_string)))
    }

    async fn list_subscriptions_by_topic(
        &self,
        topic_arn: &str,
    ) -> ProviderResult<Vec<Subscription>> {
        let output = self
            .client
            .list_subscriptions_by_topic()
            .topic_arn(topic_arn)
            .send()
            .await
            .map_err(|e| sdk_error("ListSubscriptionsByTopic", e))?;

        let subscriptions = output
            .subscriptions()
            .iter()
            .map(|subscription| Subscription {
                arn: subscription.subscription_arn().map(str::to_string),
                protocol: subscription.protocol().map(str::to_string),
                endpoint: subscription.endpoint().map(str::to_string),
            })
            .collect();
        Ok(ProviderResponse::ok(subscriptions))
    }

    async fn subscribe(
        &self,
        topic_arn: &str,
        protocol: &str,
        endpoint: &str,
    ) -> ProviderResult<Option<String>> {
        let output = self
            .client
            .subscribe()
            .topic_arn(topic_arn)
            .protocol(protocol)
            .endpoint(endpoint)
            .send()
            .await
            .map_err(|e| sdk_error("Subscribe", e))?;

        Ok(ProviderResponse::ok(
            output.subscription_arn().map(str::to_string),
        ))
    }

    async fn publish(&self, request: PublishRequest) -> ProviderResult<Option<String>> {
        let output = self
            .client
            .publish()
            .set_target_arn(request.target_arn)
            .set_topic_arn(request.topic_arn)
            .set_phone_number(request.phone_number)
            .message(request.message)
            .set_message_structure(request.message_structure)
            .send()
            .await
            .map_err(|e| sdk_error("Publish", e))?;

        Ok(ProviderResponse::ok(output.message_id().map(str::to_string)))
    }
}
