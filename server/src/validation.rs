//! Input validation for signup requests.

use regex::Regex;
use std::sync::OnceLock;

/// Validate an email address.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("All fields are required".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email".to_string());
    }

    Ok(())
}

/// Validate a password. Exactly 8 characters is the minimum that passes.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("All fields are required".to_string());
    }

    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }

    Ok(())
}

/// Validate a full signup request: all fields present, email well-formed,
/// password long enough.
pub fn validate_signup(name: &str, email: &str, password: &str) -> Result<(), String> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err("All fields are required".to_string());
    }

    validate_email(email)?;
    validate_password(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_under_8_chars_rejected() {
        assert!(validate_password("1234567").is_err());
    }

    #[test]
    fn test_password_exactly_8_chars_accepted() {
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_valid_email() {
        assert!(validate_email("cook@example.com").is_ok());
    }

    #[test]
    fn test_malformed_emails_rejected() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_signup_requires_all_fields() {
        assert_eq!(
            validate_signup("", "cook@example.com", "12345678"),
            Err("All fields are required".to_string())
        );
        assert_eq!(
            validate_signup("Cook", "", "12345678"),
            Err("All fields are required".to_string())
        );
        assert_eq!(
            validate_signup("Cook", "cook@example.com", ""),
            Err("All fields are required".to_string())
        );
    }

    #[test]
    fn test_signup_accepts_valid_input() {
        assert!(validate_signup("Cook", "cook@example.com", "12345678").is_ok());
    }
}
