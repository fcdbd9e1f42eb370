//! Configuration validation errors.

use thiserror::Error;

/// A [`JumpConfig`](super::JumpConfig) that cannot drive a jump machine.
///
/// Returned when wiring a character, never while it is running.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JumpConfigError {
    #[error("`{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("`{field}` must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("`{min_field}` ({min}) is greater than `{max_field}` ({max})")]
    InvertedRange {
        min_field: &'static str,
        min: f32,
        max_field: &'static str,
        max: f32,
    },
}
