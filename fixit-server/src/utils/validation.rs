//! Input validation helpers
//!
//! Centralized text length constants and validation functions for
//! request payloads. Query-string validation lives in
//! `listing::normalize`, which accumulates per-field errors instead of
//! failing on the first one.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Reviewer notes, rejection reasons
pub const MAX_NOTE_LEN: usize = 500;

/// Usernames, filter values
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Validation helpers (request bodies) ─────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(
            field,
            format!("{field} must not be empty"),
        ));
    }
    if value.len() > max_len {
        return Err(AppError::validation(
            field,
            format!("{field} is too long ({} chars, max {max_len})", value.len()),
        ));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(
            field,
            format!("{field} is too long ({} chars, max {max_len})", v.len()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_required_text() {
        assert!(validate_required_text("   ", "username", MAX_SHORT_TEXT_LEN).is_err());
        assert!(validate_required_text("admin", "username", MAX_SHORT_TEXT_LEN).is_ok());
    }

    #[test]
    fn rejects_overlong_optional_text() {
        let long = Some("x".repeat(MAX_NOTE_LEN + 1));
        assert!(validate_optional_text(&long, "notes", MAX_NOTE_LEN).is_err());
        assert!(validate_optional_text(&None, "notes", MAX_NOTE_LEN).is_ok());
    }
}
