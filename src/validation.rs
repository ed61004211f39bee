//! Input validation for values sent to the HIE API.
//!
//! Identifiers typed by users (national ids, licence numbers, MFL codes,
//! OTP codes) and values read from the host session (location UUIDs) are
//! checked here before a request is built.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref UUID_RE: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
    )
    .expect("valid UUID pattern");
    static ref IDENTIFIER_RE: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ./_-]{0,63}$").expect("valid identifier pattern");
    static ref OTP_RE: Regex = Regex::new(r"^[0-9]{4,8}$").expect("valid OTP pattern");
}

/// Validation error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a UUID format.
///
/// Location and provider UUIDs from the host session use the standard
/// `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` layout.
///
/// # Example
/// ```
/// use hie_registry::validation::validate_uuid;
///
/// assert!(validate_uuid("18c343eb-b353-462a-9139-b16606e6b6c2", "locationUuid").is_ok());
/// assert!(validate_uuid("not-a-uuid", "locationUuid").is_err());
/// ```
pub fn validate_uuid(value: &str, field_name: &str) -> ValidationResult<()> {
    if UUID_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field_name,
            "invalid UUID format (expected: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx)",
        ))
    }
}

/// Validate that a string is not empty or whitespace only.
///
/// # Example
/// ```
/// use hie_registry::validation::validate_not_empty;
///
/// assert!(validate_not_empty("12345678", "nationalId").is_ok());
/// assert!(validate_not_empty("   ", "nationalId").is_err());
/// ```
pub fn validate_not_empty(value: &str, field_name: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError::new(field_name, "cannot be empty"))
    } else {
        Ok(())
    }
}

/// Validate an identifier value (national id, licence number, registration
/// number, MFL code, CR number).
///
/// Identifiers start with an alphanumeric character and may contain spaces,
/// `.`, `/`, `_` and `-` (registration numbers such as `A1234/2019`), up to
/// 64 chars.
pub fn validate_identifier(value: &str, field_name: &str) -> ValidationResult<()> {
    validate_not_empty(value, field_name)?;
    if IDENTIFIER_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field_name,
            "invalid identifier (alphanumeric with spaces, '.', '/', '_' or '-', max 64 chars)",
        ))
    }
}

/// Validate a one-time password: 4 to 8 digits.
pub fn validate_otp(value: &str, field_name: &str) -> ValidationResult<()> {
    if OTP_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new(field_name, "OTP must be 4 to 8 digits"))
    }
}

/// Validate a calendar date or timestamp as returned by the HIE API.
///
/// Accepts `2025-12-31`, `2025-12-31T23:59:59` and RFC 3339.
pub fn validate_date(value: &str, field_name: &str) -> ValidationResult<()> {
    if crate::dates::parse_instant(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new(
            field_name,
            "invalid date format (expected: '2025-12-31' or '2025-12-31T23:59:59Z')",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000", "id").is_ok());
        assert!(validate_uuid("FFFFFFFF-FFFF-FFFF-FFFF-FFFFFFFFFFFF", "id").is_ok());
        assert!(validate_uuid("550e8400e29b41d4a716446655440000", "id").is_err());
        assert!(validate_uuid("", "id").is_err());
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("12345678", "nationalId").is_ok());
        assert!(validate_identifier("A1234/2019", "registrationNumber").is_ok());
        assert!(validate_identifier("PUB-MED-001", "licenseNumber").is_ok());
        assert!(validate_identifier("", "nationalId").is_err());
        assert!(validate_identifier("-leading", "nationalId").is_err());
        assert!(validate_identifier("KMPDC 1234", "licenseNumber").is_ok());
        assert!(validate_identifier("PR.1234/2020", "registrationNumber").is_ok());
        assert!(validate_identifier("bad#char", "nationalId").is_err());
        assert!(validate_identifier(".leading", "nationalId").is_err());
    }

    #[test]
    fn test_validate_otp() {
        assert!(validate_otp("1234", "otp").is_ok());
        assert!(validate_otp("12345678", "otp").is_ok());
        assert!(validate_otp("123", "otp").is_err());
        assert!(validate_otp("12ab", "otp").is_err());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2025-12-31", "license_end").is_ok());
        assert!(validate_date("2025-12-31T23:59:59Z", "license_end").is_ok());
        assert!(validate_date("2025-12-31T23:59:59", "license_end").is_ok());
        assert!(validate_date("31-12-2025", "license_end").is_err());
        assert!(validate_date("", "license_end").is_err());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("filterValue", "cannot be empty");
        assert_eq!(err.to_string(), "filterValue: cannot be empty");
    }
}
