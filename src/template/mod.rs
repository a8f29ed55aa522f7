//! Localized message templates.
//!
//! Templates are `{title, content}` pairs persisted through an entity
//! storage connector under the key `templateId:locale`. Placeholders use the
//! `{{key}}` form and are filled by [`populate_template`].
//!
//! ```ignore
//! let store = TemplateStore::new(storage);
//! store
//!     .create_or_update("welcome", "en", "Hi", "Hello, {{name}}")
//!     .await?;
//!
//! let template = store.get("welcome", "en").await?;
//! let data = HashMap::from([("name".to_string(), "Alice".to_string())]);
//! let populated = populate_template(&template, &data);
//! assert_eq!(populated.content, "Hello, Alice");
//! ```

mod store;
mod substitution;

use serde::{Deserialize, Serialize};

use crate::storage::{Entity, EntityProperty, EntitySchema, PropertyType};

pub use store::TemplateStore;
pub use substitution::populate_template;

/// Storage key of a localized template
pub fn template_key(template_id: &str, locale: &str) -> String {
    format!("{}:{}", template_id, locale)
}

/// Stored template record; `id` is the composite `templateId:locale` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Milliseconds since the Unix epoch of the last write
    pub ts: i64,
}

impl Entity for TemplateEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn schema() -> EntitySchema {
        EntitySchema::new(
            "TemplateEntry",
            vec![
                EntityProperty::new("id", PropertyType::String).primary(),
                EntityProperty::new("title", PropertyType::String),
                EntityProperty::new("content", PropertyType::String),
                EntityProperty::new("ts", PropertyType::Integer),
            ],
        )
    }
}

/// Title and body of a template, before or after substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContent {
    pub title: String,
    pub content: String,
}

impl TemplateContent {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl From<TemplateEntry> for TemplateContent {
    fn from(entry: TemplateEntry) -> Self {
        Self {
            title: entry.title,
            content: entry.content,
        }
    }
}
