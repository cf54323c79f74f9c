//! Input validation for veil operations.

use crate::error::{Result, ValidationError};

/// Reject empty (or whitespace-only) identifiers.
///
/// # Arguments
///
/// * `field` - What is being validated, for the error message
/// * `value` - The user input
///
/// # Errors
///
/// Returns `ValidationError::Empty` if the value is blank.
pub fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field).into());
    }
    Ok(())
}

/// Validate a vault/name pair.
///
/// # Errors
///
/// Returns `ValidationError::Empty` naming the first blank field.
pub fn validate_ref(vault: &str, name: &str) -> Result<()> {
    require("vault", vault)?;
    require("name", name)
}
