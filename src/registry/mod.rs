//! String-keyed connector registries.
//!
//! A [`ConnectorRegistry`] maps a name to a constructor closure. Services and
//! connectors resolve their collaborators by name at construction time, so the
//! host decides which implementation backs each channel.

mod registries;
mod wiring;

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{MessagingError, MessagingResult};

pub use registries::ConnectorRegistries;
pub use wiring::{register_connectors, TRACING_LOGGING_CONNECTOR};

type Constructor<T> = Arc<dyn Fn() -> Arc<T> + Send + Sync>;

/// Registry of named constructors for one kind of connector
pub struct ConnectorRegistry<T: ?Sized> {
    /// Registry name, reported in lookup errors
    factory: &'static str,
    constructors: DashMap<String, Constructor<T>>,
}

impl<T: ?Sized> fmt::Debug for ConnectorRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorRegistry")
            .field("factory", &self.factory)
            .field("names", &self.names())
            .finish()
    }
}

impl<T: ?Sized> ConnectorRegistry<T> {
    pub fn new(factory: &'static str) -> Self {
        Self {
            factory,
            constructors: DashMap::new(),
        }
    }

    pub fn factory(&self) -> &'static str {
        self.factory
    }

    /// Register a constructor, replacing any previous one under the same name
    pub fn register<F>(&self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(factory = self.factory, name = %name, "Connector registered");
        self.constructors.insert(name, Arc::new(constructor));
    }

    /// Build the connector registered under `name`
    pub fn get(&self, name: &str) -> MessagingResult<Arc<T>> {
        self.get_if_exists(name)
            .ok_or_else(|| MessagingError::NotRegistered {
                factory: self.factory,
                name: name.to_string(),
            })
    }

    /// Build the connector registered under `name`, if any
    pub fn get_if_exists(&self, name: &str) -> Option<Arc<T>> {
        // Release the shard lock before running the constructor
        let constructor = self.constructors.get(name).map(|c| c.value().clone())?;
        Some(constructor())
    }

    pub fn unregister(&self, name: &str) -> bool {
        self.constructors.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .constructors
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }
}
