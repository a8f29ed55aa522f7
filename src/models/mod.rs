//! Channel interfaces implemented by every messaging connector

mod connectors;
mod types;

pub use connectors::{
    EmailConnector, EmailTemplateConnector, PushNotificationConnector, PushTopicConnector,
    SmsConnector,
};
pub use types::{EmailRecipient, EmailTemplate};

#[cfg(test)]
pub use connectors::{
    MockEmailConnector, MockEmailTemplateConnector, MockPushNotificationConnector,
    MockPushTopicConnector, MockSmsConnector,
};
