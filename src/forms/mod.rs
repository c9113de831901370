use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use validator::ValidationErrors;

pub mod categories;
pub mod communications;
pub mod customers;
pub mod offers;
pub mod products;
pub mod users;

/// Maximum length of names, surnames and other single-line labels.
pub(crate) const NAME_MAX_LEN: u64 = 255;

/// Maximum length of free-form descriptions and messages.
pub(crate) const DESCRIPTION_MAX_LEN: u64 = 1020;

/// Maximum length of a phone number.
pub(crate) const PHONE_MAX_LEN: u64 = 32;

/// Result type returned by the form helpers.
pub type FormResult<T> = Result<T, FormError>;

/// Errors that can occur while turning request payloads into domain values.
#[derive(Debug, Error)]
pub enum FormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A required text field is empty after sanitization.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    /// Supplied identifier is not a positive integer.
    #[error("invalid {field} `{value}`")]
    InvalidIdentifier { field: &'static str, value: String },
    /// A stored file path is absolute or climbs out of its directory.
    #[error("{field} `{value}` must be a relative path without `..`")]
    UnsafePath { field: &'static str, value: String },
}

/// Treat an empty query value as if the parameter was not supplied.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Sanitize a required single-line value, failing when nothing is left.
pub(crate) fn required_inline(value: &str, field: &'static str) -> FormResult<String> {
    let sanitized = sanitize_inline_text(value);
    if sanitized.is_empty() {
        return Err(FormError::EmptyField(field));
    }
    Ok(sanitized)
}

/// Sanitize a required multi-line value, failing when nothing is left.
pub(crate) fn required_multiline(value: &str, field: &'static str) -> FormResult<String> {
    let sanitized = sanitize_multiline_text(value);
    if sanitized.is_empty() {
        return Err(FormError::EmptyField(field));
    }
    Ok(sanitized)
}

/// Sanitize an optional search term, dropping it when blank.
pub(crate) fn search_term(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(sanitize_inline_text)
        .filter(|term| !term.is_empty())
}

/// Reject non-positive identifiers in a relation list.
pub(crate) fn positive_ids(ids: Vec<i32>, field: &'static str) -> FormResult<Vec<i32>> {
    match ids.iter().find(|id| **id < 1) {
        Some(invalid) => Err(FormError::InvalidIdentifier {
            field,
            value: invalid.to_string(),
        }),
        None => Ok(ids),
    }
}

pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        if line.is_empty() {
            if previous_empty {
                continue;
            }
            previous_empty = true;
            result.push(String::new());
        } else {
            previous_empty = false;
            result.push(line);
        }
    }

    result.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Query {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        cursor: Option<i32>,
    }

    #[test]
    fn inline_text_collapses_whitespace() {
        assert_eq!(sanitize_inline_text("  Ann \t  Lee\u{7} "), "Ann Lee");
    }

    #[test]
    fn multiline_text_keeps_single_blank_lines() {
        assert_eq!(
            sanitize_multiline_text("\n  first \n\n\n second  \n\n"),
            "first\n\nsecond"
        );
    }

    #[test]
    fn required_inline_rejects_blank_values() {
        let result = required_inline("   ", "name");
        assert!(matches!(result, Err(FormError::EmptyField("name"))));
    }

    #[test]
    fn positive_ids_rejects_zero() {
        let result = positive_ids(vec![3, 0], "product id");
        assert!(matches!(
            result,
            Err(FormError::InvalidIdentifier { field, value }) if field == "product id" && value == "0"
        ));
    }

    #[test]
    fn empty_query_value_is_treated_as_missing() {
        let blank: Query = serde_qs::from_str("cursor=").expect("blank cursor parses");
        assert_eq!(blank.cursor, None);

        let set: Query = serde_qs::from_str("cursor=7").expect("cursor parses");
        assert_eq!(set.cursor, Some(7));

        assert!(serde_qs::from_str::<Query>("cursor=abc").is_err());
    }
}
