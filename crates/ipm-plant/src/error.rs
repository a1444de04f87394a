//! Error types for plant configuration.

use thiserror::Error;

/// Result type for plant operations.
pub type PlantResult<T> = Result<T, PlantError>;

/// Errors that can occur when configuring the plant.
///
/// The integration loop itself has no error paths: `step` is pure arithmetic
/// and non-finite inputs propagate into state unchecked.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlantError {
    /// Invalid argument provided to the configuration layer.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
