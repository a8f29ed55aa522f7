// Infrastructure layer (shared components)
pub mod infrastructure;

pub use infrastructure::config;
pub use infrastructure::error;
pub use infrastructure::logging;
pub use infrastructure::metrics;
pub use infrastructure::telemetry;

// Storage and wiring
pub mod registry;
pub mod storage;

// Domain layer
pub mod connectors;
pub mod models;
pub mod template;

// Application layer
pub mod service;
