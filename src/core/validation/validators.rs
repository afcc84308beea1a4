//! Reusable field validators
//!
//! Each validator receives the field name and its filtered value and
//! returns the message to show next to the field when the value is rejected.

use crate::core::card::CardType;
use crate::core::expiry::split_expiry;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// How a card number is checked when its network is not recognized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTypePolicy {
    /// Accept any 16-digit number
    #[default]
    RequireSixteenDigits,
    /// Reject the number outright
    Reject,
}

/// Validator: value must not be empty
pub fn required(
    message: &'static str,
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &str| {
        if value.is_empty() {
            Err(message.to_string())
        } else {
            Ok(())
        }
    }
}

/// Validator: value must have at least `min` characters
pub fn min_length(
    min: usize,
    message: &'static str,
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &str| {
        if value.chars().count() < min {
            Err(message.to_string())
        } else {
            Ok(())
        }
    }
}

/// Validator: value must match the regex
pub fn pattern(
    regex: Regex,
    message: &'static str,
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &str| {
        if regex.is_match(value) {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

/// Validator: card number length must fit the network inferred from it
pub fn card_number_length(
    policy: UnknownTypePolicy,
    message: &'static str,
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &str| {
        let len = value.len();
        let valid = match (CardType::detect(value), policy) {
            (Some(card_type), _) => card_type.valid_lengths().contains(&len),
            (None, UnknownTypePolicy::RequireSixteenDigits) => len == 16,
            (None, UnknownTypePolicy::Reject) => false,
        };
        if valid { Ok(()) } else { Err(message.to_string()) }
    }
}

/// Validator: `MM/YY` expiry strictly after the month of `today` and
/// before `max_year`
pub fn expiry_in_future(
    today: NaiveDate,
    max_year: i32,
    message: &'static str,
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &str| {
        let Some((month, year)) = split_expiry(value) else {
            return Err(message.to_string());
        };

        let year = 2000 + year as i32;
        let in_range = (1..=12).contains(&month) && year < max_year;
        let in_future =
            year > today.year() || (year == today.year() && month > today.month());

        if in_range && in_future {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    // === required() ===

    #[test]
    fn test_required_empty_returns_error() {
        let v = required("CVV is required");
        assert_eq!(v("cvv", ""), Err("CVV is required".to_string()));
    }

    #[test]
    fn test_required_value_returns_ok() {
        let v = required("CVV is required");
        assert!(v("cvv", "1").is_ok());
    }

    // === min_length() ===

    #[test]
    fn test_min_length_too_short() {
        let v = min_length(4, "too short");
        assert!(v("holder", "Bob").is_err());
    }

    #[test]
    fn test_min_length_exact() {
        let v = min_length(4, "too short");
        assert!(v("holder", "Jane").is_ok());
    }

    #[test]
    fn test_min_length_counts_chars_not_bytes() {
        let v = min_length(4, "too short");
        assert!(v("holder", "Zoë").is_err());
    }

    // === pattern() ===

    #[test]
    fn test_pattern_match() {
        let v = pattern(Regex::new(r"^[0-9]{3}$").unwrap(), "CVV is invalid");
        assert!(v("cvv", "123").is_ok());
        assert!(v("cvv", "12a").is_err());
        assert!(v("cvv", "1234").is_err());
    }

    // === card_number_length() ===

    #[test]
    fn test_visa_accepts_13_and_16() {
        let v = card_number_length(UnknownTypePolicy::RequireSixteenDigits, "invalid");
        assert!(v("number", "4222222222222").is_ok());
        assert!(v("number", "4111111111111111").is_ok());
        assert!(v("number", "41111111111111").is_err());
    }

    #[test]
    fn test_mastercard_requires_16() {
        let v = card_number_length(UnknownTypePolicy::RequireSixteenDigits, "invalid");
        assert!(v("number", "5105105105105100").is_ok());
        assert!(v("number", "5105105105105").is_err());
    }

    #[test]
    fn test_unknown_type_policies() {
        let lenient = card_number_length(UnknownTypePolicy::RequireSixteenDigits, "invalid");
        assert!(lenient("number", "6011111111111117").is_ok());
        assert!(lenient("number", "6011111111111").is_err());

        let strict = card_number_length(UnknownTypePolicy::Reject, "invalid");
        assert!(strict("number", "6011111111111117").is_err());
        assert!(strict("number", "4111111111111111").is_ok());
    }

    // === expiry_in_future() ===

    #[test]
    fn test_expiry_future_month_same_year() {
        let v = expiry_in_future(today(), 2050, "invalid");
        assert!(v("exp_date", "07/24").is_ok());
    }

    #[test]
    fn test_expiry_current_month_is_rejected() {
        let v = expiry_in_future(today(), 2050, "invalid");
        assert!(v("exp_date", "06/24").is_err());
    }

    #[test]
    fn test_expiry_past_is_rejected() {
        let v = expiry_in_future(today(), 2050, "invalid");
        assert!(v("exp_date", "01/20").is_err());
        assert!(v("exp_date", "12/23").is_err());
    }

    #[test]
    fn test_expiry_year_bound() {
        let v = expiry_in_future(today(), 2050, "invalid");
        assert!(v("exp_date", "12/49").is_ok());
        assert!(v("exp_date", "01/50").is_err());
    }

    #[test]
    fn test_expiry_bad_month_or_shape() {
        let v = expiry_in_future(today(), 2050, "invalid");
        assert!(v("exp_date", "13/30").is_err());
        assert!(v("exp_date", "00/30").is_err());
        assert!(v("exp_date", "1/30").is_err());
        assert!(v("exp_date", "0130").is_err());
    }
}
