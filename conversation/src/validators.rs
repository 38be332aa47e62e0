//! Pure validators for email and age answers. No side effects.

use regex::Regex;
use std::sync::LazyLock;

/// Conservative email shape: local part, "@", domain with at least one dot,
/// no embedded whitespace.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$").expect("email regex is valid")
});

/// Returns true when `text` looks like an email address.
pub fn is_valid_email(text: &str) -> bool {
    EMAIL_REGEX.is_match(text)
}

/// Returns true when `text` is non-empty and all ASCII digits. Leading zeros
/// and arbitrarily long digit strings count as valid.
pub fn is_valid_age(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("jane.doe+tag@example.com"));
        assert!(is_valid_email("under_score@sub-domain.example.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane@"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_valid_ages() {
        assert!(is_valid_age("21"));
        assert!(is_valid_age("0"));
        assert!(is_valid_age("007"));
        assert!(is_valid_age("99999999999999999999999"));
    }

    #[test]
    fn test_invalid_ages() {
        assert!(!is_valid_age("21x"));
        assert!(!is_valid_age(""));
        assert!(!is_valid_age("-3"));
        assert!(!is_valid_age("2 1"));
        assert!(!is_valid_age("twenty"));
    }
}
