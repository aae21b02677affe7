//! Request field checks shared by the handlers. Every failure is a 400.

use crate::errors::AppError;

/// Character-count bounds, inclusive. `max = None` means unbounded.
pub fn check_len(field: &str, value: &str, min: usize, max: Option<usize>) -> Result<(), AppError> {
    let len = value.trim().chars().count();
    if len < min {
        return Err(AppError::Validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    if let Some(max) = max {
        if len > max {
            return Err(AppError::Validation(format!(
                "{field} must be at most {max} characters"
            )));
        }
    }
    Ok(())
}

/// Loose structural check: one `@`, non-empty local part, dotted domain, no whitespace.
pub fn check_email(email: &str) -> Result<(), AppError> {
    let invalid = || AppError::Validation("email must be a valid email address".to_string());

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

pub fn check_non_negative(field: &str, value: Option<i32>) -> Result<(), AppError> {
    match value {
        Some(v) if v < 0 => Err(AppError::Validation(format!(
            "{field} must not be negative"
        ))),
        _ => Ok(()),
    }
}

/// Trims, and maps blank strings to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_bounds() {
        assert!(check_len("name", "Al", 2, Some(80)).is_ok());
        assert!(check_len("name", "A", 2, Some(80)).is_err());
        assert!(check_len("name", &"x".repeat(81), 2, Some(80)).is_err());
        assert!(check_len("title", &"x".repeat(500), 3, None).is_ok());
    }

    #[test]
    fn test_len_counts_chars_not_bytes() {
        assert!(check_len("name", "Zoë", 3, Some(3)).is_ok());
    }

    #[test]
    fn test_len_ignores_surrounding_whitespace() {
        assert!(check_len("title", "  ab  ", 3, None).is_err());
    }

    #[test]
    fn test_valid_emails() {
        assert!(check_email("dev@rolerocket.app").is_ok());
        assert!(check_email("first.last+tag@mail.example.co").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        for bad in ["", "plain", "@x.io", "a@b", "a@b.", "a@@b.io", "a b@c.io"] {
            assert!(check_email(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_non_negative() {
        assert!(check_non_negative("salaryMin", None).is_ok());
        assert!(check_non_negative("salaryMin", Some(0)).is_ok());
        assert!(check_non_negative("salaryMin", Some(-1)).is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" Remote ".to_string())), Some("Remote".to_string()));
        assert_eq!(non_blank(None), None);
    }
}
