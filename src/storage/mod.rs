//! Entity storage abstraction.
//!
//! Storage-backed connectors and the template store persist records through
//! [`EntityStorageConnector`]. Each record type implements [`Entity`] and
//! describes its fields with an [`EntitySchema`] that storage engines can use
//! for indexing and ordering.
//!
//! # Backends
//!
//! - **Memory**: [`MemoryEntityStorageConnector`], DashMap-backed, lost on restart

mod backend;
mod memory_backend;
pub mod schema;

pub use backend::{Entity, EntityStorageConnector, QueryResult, StorageError};
pub use memory_backend::MemoryEntityStorageConnector;
pub use schema::{EntityProperty, EntitySchema, PropertyType, SortDirection};
