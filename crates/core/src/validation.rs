//! Input normalization rules applied to every mutation.
//!
//! All string inputs are trimmed before they are checked or stored, so a
//! whitespace-only value is treated exactly like a missing one.

use crate::error::CoreError;

/// Trim `value`, returning `None` when it is absent or blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Require a non-blank value and return it trimmed.
pub fn require(value: Option<&str>, message: &str) -> Result<String, CoreError> {
    non_blank(value).ok_or_else(|| CoreError::validation(message))
}

/// Normalize an optional update field.
///
/// An absent field stays `None` (left untouched by the update); a field that
/// is present must not be blank.
pub fn optional(value: Option<&str>, message: &str) -> Result<Option<String>, CoreError> {
    match value {
        None => Ok(None),
        Some(v) => require(Some(v), message).map(Some),
    }
}

/// Fail unless at least one of the update fields was supplied.
pub fn require_any(supplied: &[bool], message: &str) -> Result<(), CoreError> {
    if supplied.iter().any(|s| *s) {
        Ok(())
    } else {
        Err(CoreError::validation(message))
    }
}
