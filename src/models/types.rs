use serde::{Deserialize, Serialize};

/// Provider-side email template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    /// Template name, unique per provider account
    pub name: String,

    pub subject: String,

    pub language: String,

    /// HTML body with provider placeholders
    pub content: String,
}

impl EmailTemplate {
    pub fn new(
        name: impl Into<String>,
        subject: impl Into<String>,
        language: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            language: language.into(),
            content: content.into(),
        }
    }
}

/// Recipient of a bulk templated email with its replacement values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecipient {
    pub email: String,

    /// Replacement key/value pairs, in the order they were added
    #[serde(default)]
    pub content: Vec<(String, String)>,
}

impl EmailRecipient {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            content: Vec::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.content.push((key.into(), value.into()));
        self
    }

    /// Replacement values as a JSON object, `None` when there are none
    pub fn replacement_data(&self) -> Result<Option<String>, serde_json::Error> {
        if self.content.is_empty() {
            return Ok(None);
        }
        let map: serde_json::Map<String, serde_json::Value> = self
            .content
            .iter()
            .map(|(key, value)| (key.clone(), serde_json::Value::String(value.clone())))
            .collect();
        serde_json::to_string(&map).map(Some)
    }
}
