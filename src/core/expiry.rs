//! Expiry date conversion and keystroke masking
//!
//! Expiry dates travel as two-segment `MM/YY` strings. They are converted to
//! the first day of the month they name, with `YY` read as `20YY`.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// Separator between the month and year segments
pub const EXPIRY_SEPARATOR: char = '/';

fn expiry_regex() -> &'static Regex {
    static EXPIRY_REGEX: OnceLock<Regex> = OnceLock::new();
    EXPIRY_REGEX.get_or_init(|| Regex::new(r"^([0-9]{2})/([0-9]{2})$").unwrap())
}

/// Split an `MM/YY` string into its month and two-digit year
///
/// Only the shape is checked here, a month of `13` is returned as is.
pub fn split_expiry(value: &str) -> Option<(u32, u32)> {
    let caps = expiry_regex().captures(value)?;
    let month = caps[1].parse().ok()?;
    let year = caps[2].parse().ok()?;
    Some((month, year))
}

/// Parse an `MM/YY` string into the first day of that month
///
/// Malformed input is logged and yields `None`, it is never propagated.
pub fn parse_expiry(value: &str) -> Option<NaiveDate> {
    let parsed = split_expiry(value)
        .and_then(|(month, year)| NaiveDate::from_ymd_opt(2000 + year as i32, month, 1));

    if parsed.is_none() {
        tracing::warn!(value, "could not parse expiry date");
    }
    parsed
}

/// Format a date as `MM/YY`
pub fn format_expiry(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.month(), date.year().rem_euclid(100))
}

/// Apply the separator mask to an expiry field after a keystroke
///
/// Typing the second character appends the separator. Deleting back to
/// three characters drops the trailing separator too, so the field
/// collapses to the bare month.
pub fn mask_expiry_input(new_value: &str, old_value: &str) -> String {
    let new_len = new_value.chars().count();
    let old_len = old_value.chars().count();

    let mut value = new_value.to_string();
    if new_len > old_len {
        if new_len == 2 {
            value.push(EXPIRY_SEPARATOR);
        }
    } else if new_len == 3 {
        value.pop();
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expiry_first_of_month() {
        let date = parse_expiry("06/24").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn test_parse_expiry_malformed_returns_none() {
        assert!(parse_expiry("").is_none());
        assert!(parse_expiry("6/24").is_none());
        assert!(parse_expiry("13/24").is_none());
        assert!(parse_expiry("00/24").is_none());
        assert!(parse_expiry("ab/cd").is_none());
        assert!(parse_expiry("06/2024").is_none());
    }

    #[test]
    fn test_split_expiry_requires_ascii_digits() {
        assert_eq!(split_expiry("12/30"), Some((12, 30)));
        assert_eq!(split_expiry("١٢/٣٠"), None);
        assert_eq!(split_expiry("１２/３０"), None);
    }

    #[test]
    fn test_format_expiry_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2003, 1, 1).unwrap();
        assert_eq!(format_expiry(date), "01/03");
    }

    #[test]
    fn test_format_parse_round_trip_over_valid_range() {
        for year in 0..50 {
            for month in 1..=12 {
                let s = format!("{:02}/{:02}", month, year);
                let date = parse_expiry(&s).unwrap();
                assert_eq!(format_expiry(date), s);
            }
        }
    }

    #[test]
    fn test_mask_appends_separator_when_month_is_typed() {
        let typed = mask_expiry_input("1", "");
        assert_eq!(typed, "1");
        let typed = mask_expiry_input("12", &typed);
        assert_eq!(typed, "12/");
    }

    #[test]
    fn test_mask_continues_after_separator() {
        let mut value = mask_expiry_input("12", "1");
        for next in ["12/3", "12/34"] {
            value = mask_expiry_input(next, &value);
        }
        assert_eq!(value, "12/34");
    }

    #[test]
    fn test_mask_deleting_through_separator() {
        assert_eq!(mask_expiry_input("12", "12/"), "12");
        assert_eq!(mask_expiry_input("12/", "12/3"), "12");
        assert_eq!(mask_expiry_input("1", "12"), "1");
    }

    #[test]
    fn test_mask_leaves_other_edits_alone() {
        assert_eq!(mask_expiry_input("12/3", "12/"), "12/3");
        assert_eq!(mask_expiry_input("12/3", "12/34"), "12/3");
    }
}
