//! Entity schema descriptions consumed by storage engines

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Integer,
    Array,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Metadata for one stored field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityProperty {
    /// Serialized field name
    pub name: &'static str,

    #[serde(rename = "type")]
    pub property_type: PropertyType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<PropertyType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,

    pub is_primary: bool,

    pub optional: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
}

impl EntityProperty {
    pub fn new(name: &'static str, property_type: PropertyType) -> Self {
        Self {
            name,
            property_type,
            item_type: None,
            format: None,
            is_primary: false,
            optional: false,
            sort_direction: None,
        }
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn items(mut self, item_type: PropertyType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    pub fn format(mut self, format: &'static str) -> Self {
        self.format = Some(format);
        self
    }

    pub fn sorted(mut self, direction: SortDirection) -> Self {
        self.sort_direction = Some(direction);
        self
    }
}

/// Field metadata for an entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchema {
    pub entity_type: &'static str,
    pub properties: Vec<EntityProperty>,
}

impl EntitySchema {
    pub fn new(entity_type: &'static str, properties: Vec<EntityProperty>) -> Self {
        Self {
            entity_type,
            properties,
        }
    }

    pub fn primary_key(&self) -> Option<&EntityProperty> {
        self.properties.iter().find(|p| p.is_primary)
    }

    /// First property carrying a sort direction
    pub fn sort_property(&self) -> Option<&EntityProperty> {
        self.properties.iter().find(|p| p.sort_direction.is_some())
    }

    pub fn property(&self, name: &str) -> Option<&EntityProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}
