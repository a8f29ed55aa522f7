//! Input guards applied before any I/O

use thiserror::Error;

/// Value reported for missing or empty inputs
pub const UNDEFINED: &str = "undefined";

/// A required input was missing or empty
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{component}: guard failed for '{property}' (received {value})")]
pub struct GuardError {
    /// Component that rejected the input
    pub component: &'static str,

    /// Name of the offending parameter
    pub property: &'static str,

    /// What was observed
    pub value: String,
}

impl GuardError {
    fn undefined(component: &'static str, property: &'static str) -> Self {
        Self {
            component,
            property,
            value: UNDEFINED.to_string(),
        }
    }
}

pub struct Guards;

impl Guards {
    /// Require a non-empty string
    pub fn string_value(
        component: &'static str,
        property: &'static str,
        value: &str,
    ) -> Result<(), GuardError> {
        if value.is_empty() {
            return Err(GuardError::undefined(component, property));
        }
        Ok(())
    }

    /// Require a non-empty slice
    pub fn array_value<T>(
        component: &'static str,
        property: &'static str,
        value: &[T],
    ) -> Result<(), GuardError> {
        if value.is_empty() {
            return Err(GuardError::undefined(component, property));
        }
        Ok(())
    }
}
