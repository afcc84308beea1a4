//! Reusable field filters
//!
//! These filters transform raw form values before validation

/// Keep only ASCII digits
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Cut a value to at most `max` characters
pub fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Filter: strip every non-digit character
pub fn digits() -> impl Fn(&str) -> String + Send + Sync + Clone {
    digits_only
}

/// Filter: trim surrounding whitespace
pub fn trim() -> impl Fn(&str) -> String + Send + Sync + Clone {
    |value: &str| value.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // === digits() ===

    #[test]
    fn test_digits_strips_separators() {
        let f = digits();
        assert_eq!(f("4111-1111 1111_1111"), "4111111111111111");
    }

    #[test]
    fn test_digits_ignores_non_ascii_digits() {
        let f = digits();
        assert_eq!(f("١٢3"), "3");
    }

    #[test]
    fn test_digits_empty_string() {
        let f = digits();
        assert_eq!(f("abc"), "");
    }

    // === trim() ===

    #[test]
    fn test_trim_removes_whitespace() {
        let f = trim();
        assert_eq!(f("  Jane Doe  "), "Jane Doe");
    }

    #[test]
    fn test_trim_blank_becomes_empty() {
        let f = trim();
        assert_eq!(f("   "), "");
    }
}
