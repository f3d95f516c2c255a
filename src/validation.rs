//! Signup field checks. These run in the handler before the credential store is touched.

use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Error, PartialEq)]
pub enum SignupError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
}

/// Deliberately loose: any address containing both `@` and `.` passes.
pub fn is_plausible_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}

/// `name` and `email` are expected to be trimmed already. Checks run in a fixed
/// order and the first failure wins.
pub fn validate_signup(name: &str, email: &str, password: &str) -> Result<(), SignupError> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(SignupError::MissingFields);
    }

    if !is_plausible_email(email) {
        return Err(SignupError::InvalidEmail);
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SignupError::PasswordTooShort);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_signup_passes() {
        assert_eq!(
            validate_signup("Test User", "test@example.com", "TestPass123"),
            Ok(())
        );
    }

    #[test]
    fn each_missing_field_is_rejected() {
        assert_eq!(
            validate_signup("", "a@b.co", "password"),
            Err(SignupError::MissingFields)
        );
        assert_eq!(
            validate_signup("A", "", "password"),
            Err(SignupError::MissingFields)
        );
        assert_eq!(
            validate_signup("A", "a@b.co", ""),
            Err(SignupError::MissingFields)
        );
    }

    #[test]
    fn email_needs_at_sign_and_dot() {
        assert!(is_plausible_email("a@b.co"));
        assert!(is_plausible_email("first.last@localhost"));
        assert!(!is_plausible_email("a@bco"));
        assert!(!is_plausible_email("a.b.co"));
        assert_eq!(
            validate_signup("A", "nobody", "password"),
            Err(SignupError::InvalidEmail)
        );
    }

    #[test]
    fn password_length_boundary() {
        assert_eq!(
            validate_signup("A", "a@b.co", "1234567"),
            Err(SignupError::PasswordTooShort)
        );
        assert_eq!(validate_signup("A", "a@b.co", "12345678"), Ok(()));
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        // Seven characters, fourteen bytes.
        assert_eq!(
            validate_signup("A", "a@b.co", "ééééééé"),
            Err(SignupError::PasswordTooShort)
        );
    }

    #[test]
    fn missing_fields_win_over_other_failures() {
        assert_eq!(
            validate_signup("", "nobody", "short"),
            Err(SignupError::MissingFields)
        );
    }
}
