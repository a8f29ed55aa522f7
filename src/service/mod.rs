//! Service layer over the channel connectors.
//!
//! The channel services guard their inputs and hand off to one connector.
//! [`MessagingService`] composes all three with the template store: it
//! resolves a localized template, fills in placeholders and delegates the
//! populated title and content.

mod email;
mod messaging;
mod push;
mod sms;

pub use email::EmailService;
pub use messaging::{MessagingService, MessagingServiceBuilder};
pub use push::PushNotificationService;
pub use sms::SmsService;
