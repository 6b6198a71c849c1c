//! Validation trait and helpers for configuration types

use crate::error::{ConfigError, Result};

/// Trait for validating configuration values
///
/// Implement this trait for any config type that needs validation beyond
/// type-level checks.
pub trait Validate {
    /// Returns `Ok(())` if validation passes, or a `ConfigError` describing
    /// what failed.
    fn validate(&self) -> Result<()>;
}

/// Helper function to validate integer is above minimum
pub fn validate_positive(field: impl Into<String>, value: usize, min: usize) -> Result<()> {
    if value <= min {
        return Err(ConfigError::InvalidInteger {
            field: field.into(),
            value,
            min,
        });
    }
    Ok(())
}

/// Helper function to validate that `value` is strictly below `bound`
pub fn validate_below(
    field: impl Into<String>,
    value: usize,
    bound_field: &str,
    bound: usize,
) -> Result<()> {
    if value >= bound {
        return Err(ConfigError::ValidationError {
            field: field.into(),
            message: format!("must be < {} ({}), got {}", bound_field, bound, value),
        });
    }
    Ok(())
}
