mod settings;

pub use settings::{
    ConnectorSettings, LogFormat, LoggingConfig, Settings, StorageSettings,
    DEFAULT_EMAIL_CONNECTOR, DEFAULT_EMAIL_ENTRY_STORAGE, DEFAULT_PUSH_DEVICE_ENTRY_STORAGE,
    DEFAULT_PUSH_MESSAGE_ENTRY_STORAGE, DEFAULT_PUSH_NOTIFICATION_CONNECTOR,
    DEFAULT_SMS_CONNECTOR, DEFAULT_SMS_ENTRY_STORAGE, DEFAULT_TEMPLATE_ENTRY_STORAGE,
};

pub use crate::connectors::aws::{AwsApplicationSettings, AwsConnectorConfig};
