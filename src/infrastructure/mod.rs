//! Infrastructure layer modules
//!
//! This module contains shared infrastructure components:
//! - `config`: Settings for connectors, storage names and logging
//! - `error`: Unified error types and input guards
//! - `logging`: Optional fire-and-forget logging connectors
//! - `metrics`: Prometheus metrics helpers
//! - `telemetry`: Tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod telemetry;
