use std::sync::Arc;

use chrono::Utc;

use crate::config::DEFAULT_TEMPLATE_ENTRY_STORAGE;
use crate::error::{Guards, MessagingError, MessagingResult};
use crate::registry::ConnectorRegistries;
use crate::storage::EntityStorageConnector;

use super::{template_key, TemplateContent, TemplateEntry};

const COMPONENT: &str = "TemplateStore";

/// Localized templates persisted through an entity storage connector
#[derive(Clone)]
pub struct TemplateStore {
    storage: Arc<dyn EntityStorageConnector<TemplateEntry>>,
}

impl TemplateStore {
    pub fn new(storage: Arc<dyn EntityStorageConnector<TemplateEntry>>) -> Self {
        Self { storage }
    }

    /// Resolve the template storage by name, `template-entry` when `None`
    pub fn from_registry(
        registries: &ConnectorRegistries,
        storage_name: Option<&str>,
    ) -> MessagingResult<Self> {
        let storage = registries
            .templates
            .get(storage_name.unwrap_or(DEFAULT_TEMPLATE_ENTRY_STORAGE))?;
        Ok(Self::new(storage))
    }

    /// Write a template, replacing whatever was stored under the same id and locale
    pub async fn create_or_update(
        &self,
        template_id: &str,
        locale: &str,
        title: &str,
        content: &str,
    ) -> MessagingResult<()> {
        Guards::string_value(COMPONENT, "template_id", template_id)?;
        Guards::string_value(COMPONENT, "locale", locale)?;
        Guards::string_value(COMPONENT, "title", title)?;
        Guards::string_value(COMPONENT, "content", content)?;

        let entry = TemplateEntry {
            id: template_key(template_id, locale),
            title: title.to_string(),
            content: content.to_string(),
            ts: Utc::now().timestamp_millis(),
        };

        self.storage.set(entry).await?;

        tracing::debug!(template_id = %template_id, locale = %locale, "Template stored");
        Ok(())
    }

    /// Look up a template; there is no fallback to another locale
    pub async fn get(&self, template_id: &str, locale: &str) -> MessagingResult<TemplateContent> {
        Guards::string_value(COMPONENT, "template_id", template_id)?;
        Guards::string_value(COMPONENT, "locale", locale)?;

        self.storage
            .get(&template_key(template_id, locale))
            .await?
            .map(TemplateContent::from)
            .ok_or_else(|| MessagingError::TemplateNotFound {
                template_id: template_id.to_string(),
                locale: locale.to_string(),
            })
    }
}
