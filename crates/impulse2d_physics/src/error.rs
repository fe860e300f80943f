//! Error types for object and world construction
//!
//! The simulation step itself never fails; these errors only surface when a
//! caller tries to build an object or a world from invalid parameters.

use thiserror::Error;

/// Error returned when constructing shapes, objects or worlds
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// A size (radius, width, height, world extent) that is zero, negative or not finite
    #[error("invalid {what}: {value} (must be positive and finite)")]
    InvalidDimension { what: &'static str, value: f32 },
    /// A vector parameter containing NaN or infinity
    #[error("non-finite {what}: ({x}, {y})")]
    NonFinite { what: &'static str, x: f32, y: f32 },
    /// A world configuration value outside its allowed range
    #[error("invalid world config: {0}")]
    InvalidConfig(String),
}

/// Check that a size parameter is strictly positive and finite
pub(crate) fn ensure_positive(what: &'static str, value: f32) -> Result<f32, PhysicsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::InvalidDimension { what, value })
    }
}
