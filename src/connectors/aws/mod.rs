//! AWS SES/SNS messaging connectors.
//!
//! - [`SesEmailConnector`]: custom and bulk templated email over SES v2
//! - [`SnsSmsConnector`]: SMS over SNS publish
//! - [`SnsPushNotificationConnector`]: platform applications, device endpoints
//!   and topics over SNS, resolved with check-then-create so repeated calls
//!   reuse existing resources

mod client;
mod config;
mod email;
mod push;
mod sms;

pub use client::{
    load_sdk_config, AwsSesApi, AwsSnsApi, BulkEmailDestination, BulkEmailRequest,
    PlatformApplication, PlatformEndpoint, ProviderError, ProviderResponse, ProviderResult,
    PublishRequest, SesApi, SimpleEmail, SnsApi, Subscription, Topic,
};
pub use config::{AwsApplicationSettings, AwsConnectorConfig};
pub use email::SesEmailConnector;
pub use push::{
    push_message_payload, ApplicationAddresses, SnsPushNotificationConnector,
    StartedSnsPushConnector,
};
pub use sms::SnsSmsConnector;

#[cfg(test)]
pub use client::MockSesApi;
