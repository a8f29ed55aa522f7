//! Channel connector selection from settings

use std::sync::Arc;

use crate::config::Settings;
use crate::connectors::aws::{SesEmailConnector, SnsPushNotificationConnector, SnsSmsConnector};
use crate::connectors::entity_storage::{
    EntityStorageEmailConnector, EntityStoragePushNotificationConnector, EntityStorageSmsConnector,
};
use crate::error::MessagingResult;
use crate::logging::{Logger, TracingLoggingConnector};

use super::ConnectorRegistries;

/// Registry name of [`TracingLoggingConnector`]
pub const TRACING_LOGGING_CONNECTOR: &str = "tracing";

/// Register the channel connectors under the names from `settings.connectors`.
///
/// With an `[aws]` section the SES and SNS connectors are registered, after
/// every configured push application has been resolved. Without one the
/// entity storage connectors are used, which requires their storage to be
/// registered first (see [`ConnectorRegistries::register_memory_storage`]).
pub async fn register_connectors(
    registries: &ConnectorRegistries,
    settings: &Settings,
) -> MessagingResult<()> {
    registries
        .logging
        .register(TRACING_LOGGING_CONNECTOR, || Arc::new(TracingLoggingConnector));
    let logger = Logger::from_registry(&registries.logging, settings.logging.connector.as_deref());
    let names = &settings.connectors;

    match &settings.aws {
        Some(aws) => {
            let email = SesEmailConnector::connect(aws, logger.clone()).await?;
            let sms = SnsSmsConnector::connect(aws, logger.clone()).await?;
            let push = SnsPushNotificationConnector::connect(aws, logger)
                .await?
                .start()
                .await?;

            registries
                .email
                .register(names.email.as_str(), move || Arc::new(email.clone()));
            registries
                .sms
                .register(names.sms.as_str(), move || Arc::new(sms.clone()));
            registries
                .push_notification
                .register(names.push_notification.as_str(), move || {
                    Arc::new(push.clone())
                });

            tracing::info!(backend = "aws", region = %aws.region, "Messaging connectors registered");
        }
        None => {
            let storage = &settings.storage;
            let email = EntityStorageEmailConnector::from_registry(
                registries,
                Some(storage.email_entry.as_str()),
                logger.clone(),
            )?;
            let sms = EntityStorageSmsConnector::from_registry(
                registries,
                Some(storage.sms_entry.as_str()),
                logger.clone(),
            )?;
            let push = EntityStoragePushNotificationConnector::from_registry(
                registries,
                Some(storage.push_notification_device_entry.as_str()),
                Some(storage.push_notification_message_entry.as_str()),
                logger,
            )?;

            registries
                .email
                .register(names.email.as_str(), move || Arc::new(email.clone()));
            registries
                .sms
                .register(names.sms.as_str(), move || Arc::new(sms.clone()));
            registries
                .push_notification
                .register(names.push_notification.as_str(), move || {
                    Arc::new(push.clone())
                });

            tracing::info!(backend = "entity-storage", "Messaging connectors registered");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MessagingError;

    #[tokio::test]
    async fn test_without_aws_registers_storage_connectors() {
        let registries = ConnectorRegistries::new();
        let settings = Settings::default();
        registries.register_memory_storage(&settings.storage);

        register_connectors(&registries, &settings).await.unwrap();

        assert!(registries.email.contains("messaging-email"));
        assert!(registries.sms.contains("messaging-sms"));
        assert!(registries.push_notification.contains("messaging-push-notification"));
        assert!(registries.logging.contains(TRACING_LOGGING_CONNECTOR));
    }

    #[tokio::test]
    async fn test_storage_connectors_need_storage() {
        let registries = ConnectorRegistries::new();

        let err = register_connectors(&registries, &Settings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MessagingError::NotRegistered { .. }));
        assert!(registries.email.names().is_empty());
    }
}
