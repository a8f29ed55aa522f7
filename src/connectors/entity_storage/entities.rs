//! Records persisted by the storage-backed connectors

use serde::{Deserialize, Serialize};

use crate::storage::{
    Entity, EntityProperty, EntitySchema, PropertyType, SortDirection,
};

/// Delivery state of a stored entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Pending,
    Sent,
}

fn id_property() -> EntityProperty {
    EntityProperty::new("id", PropertyType::String).primary()
}

fn error_property() -> EntityProperty {
    EntityProperty::new("error", PropertyType::Object).optional()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailEntry {
    pub id: String,
    pub sender: String,
    pub recipients: Vec<String>,
    /// Milliseconds since the Unix epoch
    pub ts: i64,
    /// HTML body
    pub message: String,
    pub subject: String,
    pub status: EntryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl Entity for EmailEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn schema() -> EntitySchema {
        EntitySchema::new(
            "EmailEntry",
            vec![
                id_property(),
                EntityProperty::new("sender", PropertyType::String),
                EntityProperty::new("recipients", PropertyType::Array).items(PropertyType::String),
                EntityProperty::new("ts", PropertyType::Integer),
                EntityProperty::new("message", PropertyType::String),
                EntityProperty::new("subject", PropertyType::String),
                EntityProperty::new("status", PropertyType::String),
                error_property(),
            ],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsEntry {
    pub id: String,
    pub phone_number: String,
    pub ts: i64,
    pub message: String,
    pub status: EntryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl Entity for SmsEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn schema() -> EntitySchema {
        EntitySchema::new(
            "SmsEntry",
            vec![
                id_property(),
                EntityProperty::new("phoneNumber", PropertyType::String),
                EntityProperty::new("ts", PropertyType::Integer),
                EntityProperty::new("message", PropertyType::String),
                EntityProperty::new("status", PropertyType::String),
                error_property(),
            ],
        )
    }
}

/// A device registration; only exists for the storage-backed push connector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushNotificationDeviceEntry {
    pub id: String,
    pub application_id: String,
    pub device_token: String,
    pub ts: i64,
    pub status: EntryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl Entity for PushNotificationDeviceEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn schema() -> EntitySchema {
        EntitySchema::new(
            "PushNotificationDeviceEntry",
            vec![
                id_property(),
                EntityProperty::new("applicationId", PropertyType::String),
                EntityProperty::new("deviceToken", PropertyType::String),
                EntityProperty::new("ts", PropertyType::Integer)
                    .format("uint64")
                    .sorted(SortDirection::Descending),
                EntityProperty::new("status", PropertyType::String),
                error_property(),
            ],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushNotificationMessageEntry {
    pub id: String,
    /// Not checked against device entries
    pub device_address: String,
    pub title: String,
    pub message: String,
    pub ts: i64,
    pub status: EntryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl Entity for PushNotificationMessageEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn schema() -> EntitySchema {
        EntitySchema::new(
            "PushNotificationMessageEntry",
            vec![
                id_property(),
                EntityProperty::new("deviceAddress", PropertyType::String),
                EntityProperty::new("title", PropertyType::String),
                EntityProperty::new("message", PropertyType::String),
                EntityProperty::new("ts", PropertyType::Integer)
                    .format("uint64")
                    .sorted(SortDirection::Descending),
                EntityProperty::new("status", PropertyType::String),
                error_property(),
            ],
        )
    }
}
