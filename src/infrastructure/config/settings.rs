use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::connectors::aws::AwsConnectorConfig;

pub const DEFAULT_EMAIL_CONNECTOR: &str = "messaging-email";
pub const DEFAULT_SMS_CONNECTOR: &str = "messaging-sms";
pub const DEFAULT_PUSH_NOTIFICATION_CONNECTOR: &str = "messaging-push-notification";

pub const DEFAULT_EMAIL_ENTRY_STORAGE: &str = "email-entry";
pub const DEFAULT_SMS_ENTRY_STORAGE: &str = "sms-entry";
pub const DEFAULT_PUSH_DEVICE_ENTRY_STORAGE: &str = "push-notification-device-entry";
pub const DEFAULT_PUSH_MESSAGE_ENTRY_STORAGE: &str = "push-notification-message-entry";
pub const DEFAULT_TEMPLATE_ENTRY_STORAGE: &str = "template-entry";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// AWS credentials and push applications; absent when only the
    /// storage-backed connectors are used
    #[serde(default)]
    pub aws: Option<AwsConnectorConfig>,
    #[serde(default)]
    pub connectors: ConnectorSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Registry names of the connectors backing each service
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorSettings {
    #[serde(default = "default_email_connector")]
    pub email: String,
    #[serde(default = "default_sms_connector")]
    pub sms: String,
    #[serde(default = "default_push_notification_connector")]
    pub push_notification: String,
}

/// Registry names of the entity storage connectors
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_email_entry_storage")]
    pub email_entry: String,
    #[serde(default = "default_sms_entry_storage")]
    pub sms_entry: String,
    #[serde(default = "default_push_device_entry_storage")]
    pub push_notification_device_entry: String,
    #[serde(default = "default_push_message_entry_storage")]
    pub push_notification_message_entry: String,
    #[serde(default = "default_template_entry_storage")]
    pub template_entry: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    /// Registry name of the logging connector handed to connectors, if any
    #[serde(default)]
    pub connector: Option<String>,
}

fn default_email_connector() -> String {
    DEFAULT_EMAIL_CONNECTOR.to_string()
}

fn default_sms_connector() -> String {
    DEFAULT_SMS_CONNECTOR.to_string()
}

fn default_push_notification_connector() -> String {
    DEFAULT_PUSH_NOTIFICATION_CONNECTOR.to_string()
}

fn default_email_entry_storage() -> String {
    DEFAULT_EMAIL_ENTRY_STORAGE.to_string()
}

fn default_sms_entry_storage() -> String {
    DEFAULT_SMS_ENTRY_STORAGE.to_string()
}

fn default_push_device_entry_storage() -> String {
    DEFAULT_PUSH_DEVICE_ENTRY_STORAGE.to_string()
}

fn default_push_message_entry_storage() -> String {
    DEFAULT_PUSH_MESSAGE_ENTRY_STORAGE.to_string()
}

fn default_template_entry_storage() -> String {
    DEFAULT_TEMPLATE_ENTRY_STORAGE.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .set_default("logging.level", "info")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // MESSAGING__AWS__REGION, MESSAGING__CONNECTORS__EMAIL, ...
            .add_source(
                Environment::with_prefix("MESSAGING")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Load settings from a single TOML/YAML/JSON file, ignoring the environment
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path))
            .build()?
            .try_deserialize()
    }
}

impl Default for ConnectorSettings {
    fn default() -> Self {
        Self {
            email: default_email_connector(),
            sms: default_sms_connector(),
            push_notification: default_push_notification_connector(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            email_entry: default_email_entry_storage(),
            sms_entry: default_sms_entry_storage(),
            push_notification_device_entry: default_push_device_entry_storage(),
            push_notification_message_entry: default_push_message_entry_storage(),
            template_entry: default_template_entry_storage(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            connector: None,
        }
    }
}
