//! Input validation shared by every entry point that accepts a caregiver name.

use thiserror::Error;

/// Errors returned when caregiver input fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("caregiver name must not be empty")]
    EmptyCaregiverName,
}

/// Validate a caregiver name and return its canonical (trimmed) form.
///
/// A name is valid when it is non-empty after trimming surrounding
/// whitespace. The trimmed form is the identity key everywhere else in the
/// system — lookup, insert, and the duplicate-key retry all use it.
pub fn validate_caregiver_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyCaregiverName);
    }
    Ok(trimmed)
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(validate_caregiver_name("  媽媽 "), Ok("媽媽"));
        assert_eq!(validate_caregiver_name("Dad"), Ok("Dad"));
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert_eq!(
            validate_caregiver_name(""),
            Err(ValidationError::EmptyCaregiverName)
        );
        assert_eq!(
            validate_caregiver_name("   "),
            Err(ValidationError::EmptyCaregiverName)
        );
    }

    #[test]
    fn interior_whitespace_is_preserved() {
        assert_eq!(validate_caregiver_name(" 阿 嬤 "), Ok("阿 嬤"));
    }
}
