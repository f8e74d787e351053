//! Reusable field validators
//!
//! Each validator is built once and called with a human label for the field,
//! so messages read the same wherever the rule is applied.

use crate::core::donor::is_zero_date;
use chrono::NaiveDate;

/// Validator: text must be present and not blank
pub fn non_empty() -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    |label: &str, value: Option<&str>| match value {
        Some(text) if !text.trim().is_empty() => Ok(()),
        _ => Err(format!("{} is required", label)),
    }
}

/// Validator: text, when present, must not contain `\0`
pub fn no_nul() -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    |label: &str, value: Option<&str>| match value {
        Some(text) if text.contains('\0') => {
            Err(format!("{} must not contain NUL characters", label))
        }
        _ => Ok(()),
    }
}

/// Validator: date must be present and not `0001-01-01`
pub fn not_zero_date()
-> impl Fn(&str, Option<NaiveDate>) -> Result<(), String> + Send + Sync + Clone {
    |label: &str, value: Option<NaiveDate>| match value {
        Some(date) if !is_zero_date(date) => Ok(()),
        _ => Err(format!("{} is required", label)),
    }
}
