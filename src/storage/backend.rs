//! Backend trait for entity storage.
//!
//! This module defines the persistence interface used by the storage-backed
//! connectors and the template store, allowing different storage engines to
//! be used interchangeably.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::schema::EntitySchema;

/// Errors that can occur during entity storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Entity has an empty primary key
    #[error("Entity {entity_type} has an empty primary key")]
    MissingId { entity_type: &'static str },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend is temporarily unavailable
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A record that can be persisted through an [`EntityStorageConnector`].
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    /// Primary key value
    fn id(&self) -> &str;

    /// Field metadata for this entity type
    fn schema() -> EntitySchema;
}

/// Result of a query.
#[derive(Debug, Clone)]
pub struct QueryResult<T> {
    pub entities: Vec<T>,
}

/// Backend trait for entity storage.
///
/// Implementations must be thread-safe (`Send + Sync`) as they are shared
/// across connectors and services.
#[async_trait]
pub trait EntityStorageConnector<T: Entity>: Send + Sync {
    /// Schema of the stored entity type
    fn schema(&self) -> EntitySchema {
        T::schema()
    }

    /// Get an entity by primary key
    async fn get(&self, id: &str) -> Result<Option<T>, StorageError>;

    /// Insert or replace an entity
    async fn set(&self, entity: T) -> Result<(), StorageError>;

    /// Return all entities, ordered by the schema's sort property when it has one
    async fn query(&self) -> Result<QueryResult<T>, StorageError>;
}
