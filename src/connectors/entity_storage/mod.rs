//! Connectors that persist each request instead of delivering it.
//!
//! Used to run the platform without provider credentials. Persisting the
//! entry is the whole side effect: a successful result means the entry was
//! stored, not that anything was delivered.

mod email;
mod entities;
mod push;
mod sms;

use chrono::Utc;

pub use email::EntityStorageEmailConnector;
pub use entities::{
    EmailEntry, EntryStatus, PushNotificationDeviceEntry, PushNotificationMessageEntry, SmsEntry,
};
pub use push::EntityStoragePushNotificationConnector;
pub use sms::EntityStorageSmsConnector;

/// Random 32-byte id, hex encoded
pub(crate) fn generate_id() -> String {
    hex::encode(rand::random::<[u8; 32]>())
}

pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
