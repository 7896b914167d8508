//! Numeric normalization for loosely formatted counts
//!
//! Extracted numbers arrive as `"1,234"`, `"1234人"`, `" 1234 "`, bare JSON
//! numbers or not at all. Normalization keeps only the decimal digits and
//! reads what is left; anything unreadable becomes 0.

use serde_json::Value;
use thiserror::Error;

/// Why a value could not be read as a count
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// No digits at all
    #[error("no digits in {0:?}")]
    NoDigits(String),

    /// More digits than fit in a u64
    #[error("count overflows: {0:?}")]
    Overflow(String),
}

/// Value of a decimal digit, ASCII or full-width
fn digit_value(c: char) -> Option<u64> {
    match c {
        '0'..='9' => Some(c as u64 - '0' as u64),
        '０'..='９' => Some(c as u64 - '０' as u64),
        _ => None,
    }
}

/// Read the digits of `text` as one number, ignoring every other character
pub fn try_parse_count(text: &str) -> Result<u64, NormalizeError> {
    let mut digits = text.chars().filter_map(digit_value).peekable();
    if digits.peek().is_none() {
        return Err(NormalizeError::NoDigits(text.to_string()));
    }

    digits.try_fold(0u64, |acc, d| {
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(d))
            .ok_or_else(|| NormalizeError::Overflow(text.to_string()))
    })
}

/// Normalize an extracted JSON field to a non-negative count
///
/// Missing and `null` fields are 0. Strings are read directly; other values
/// through their JSON text. Parse failures are 0.
pub fn to_count(value: Option<&Value>) -> u64 {
    let parsed = match value {
        None | Some(Value::Null) => return 0,
        Some(Value::String(text)) => try_parse_count(text),
        Some(other) => try_parse_count(&other.to_string()),
    };
    parsed.unwrap_or(0)
}
