use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// `local@domain.tld` shape check
pub fn is_valid_email(email: &str) -> bool {
    RE_EMAIL.is_match(email)
}

fn require_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(ValidationError::MissingCredentials);
    }

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

pub fn validate_sign_in(email: &str, password: &str) -> Result<(), ValidationError> {
    require_credentials(email, password)
}

pub fn validate_create_account(
    email: &str,
    password: &str,
    min_password_length: usize,
) -> Result<(), ValidationError> {
    require_credentials(email, password)?;

    if password.chars().count() < min_password_length {
        return Err(ValidationError::PasswordTooShort {
            min_length: min_password_length,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user example@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(" user@example.com"));
    }

    #[test]
    fn test_blank_fields() {
        assert_eq!(
            validate_sign_in("", "secret"),
            Err(ValidationError::MissingCredentials)
        );
        assert_eq!(
            validate_sign_in("user@example.com", "   "),
            Err(ValidationError::MissingCredentials)
        );
    }

    #[test]
    fn test_sign_in_accepts_short_password() {
        assert_eq!(validate_sign_in("user@example.com", "abc"), Ok(()));
    }

    #[test]
    fn test_create_account_password_length() {
        assert_eq!(
            validate_create_account("user@example.com", "abcde", 6),
            Err(ValidationError::PasswordTooShort { min_length: 6 })
        );
        assert_eq!(validate_create_account("user@example.com", "abcdef", 6), Ok(()));
        assert_eq!(
            validate_create_account("bad-email", "abcdef", 6),
            Err(ValidationError::InvalidEmail)
        );
    }
}
