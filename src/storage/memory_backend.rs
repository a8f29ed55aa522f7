//! In-memory entity storage using DashMap.
//!
//! Entities are stored in memory and will be lost on restart.

use std::cmp::Ordering;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::backend::{Entity, EntityStorageConnector, QueryResult, StorageError};
use super::schema::SortDirection;

/// In-memory entity storage.
///
/// Uses `DashMap` for concurrent access keyed by primary key.
pub struct MemoryEntityStorageConnector<T: Entity> {
    entities: DashMap<String, T>,
}

impl<T: Entity> MemoryEntityStorageConnector<T> {
    pub fn new() -> Self {
        Self {
            entities: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<T: Entity> Default for MemoryEntityStorageConnector<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> EntityStorageConnector<T> for MemoryEntityStorageConnector<T> {
    async fn get(&self, id: &str) -> Result<Option<T>, StorageError> {
        Ok(self.entities.get(id).map(|entry| entry.value().clone()))
    }

    async fn set(&self, entity: T) -> Result<(), StorageError> {
        if entity.id().is_empty() {
            return Err(StorageError::MissingId {
                entity_type: T::schema().entity_type,
            });
        }

        let id = entity.id().to_string();
        let replaced = self.entities.insert(id.clone(), entity).is_some();

        tracing::debug!(
            entity_type = T::schema().entity_type,
            id = %id,
            replaced = replaced,
            "Entity stored"
        );
        Ok(())
    }

    async fn query(&self) -> Result<QueryResult<T>, StorageError> {
        let mut entities: Vec<T> = self
            .entities
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        let schema = T::schema();
        if let Some(sort) = schema.sort_property() {
            let mut keyed = Vec::with_capacity(entities.len());
            for entity in entities {
                let key = serde_json::to_value(&entity)?
                    .get(sort.name)
                    .cloned()
                    .unwrap_or(Value::Null);
                keyed.push((key, entity));
            }

            keyed.sort_by(|(a, _), (b, _)| compare_values(a, b));
            if sort.sort_direction == Some(SortDirection::Descending) {
                keyed.reverse();
            }
            entities = keyed.into_iter().map(|(_, entity)| entity).collect();
        }

        Ok(QueryResult { entities })
    }
}

/// Order JSON scalars; nulls sort first and mixed types compare equal
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}
