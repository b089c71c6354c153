//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

/// Generate a new UUID v4
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Today's calendar date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Display name used when a volunteer registers without one
pub fn default_volunteer_name(user_id: &str) -> String {
    let chars: Vec<char> = user_id.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("Student {}", tail)
}

/// Round to one decimal place
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Treat blank optional strings as absent
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_volunteer_name() {
        assert_eq!(default_volunteer_name("user_2abcd1234"), "Student 1234");
        assert_eq!(default_volunteer_name("ab"), "Student ab");
        assert_eq!(default_volunteer_name(""), "Student ");
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(4.0), 4.0);
        assert_eq!(round_to_tenth(3.66666), 3.7);
        assert_eq!(round_to_tenth(4.25), 4.3);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Beach   clean-up \n"), "Beach clean-up");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some("Ana".to_string())), Some("Ana".to_string()));
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_generate_uuid_is_unique() {
        assert_ne!(generate_uuid(), generate_uuid());
        assert_eq!(generate_uuid().len(), 36);
    }
}
