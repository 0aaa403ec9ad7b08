//! Validation for raw source input
//!
//! Checks run in a fixed order and the first failing check wins; errors are
//! never aggregated.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::record::{current_year, parse_object, parse_record, year_field, SourceRecord};

/// Earliest accepted publication year
pub const MIN_YEAR: i32 = 1900;

/// A validation failure. `Display` is the user-facing message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    #[error("Invalid JSON format.")]
    InvalidJson,

    #[error("Author is required.")]
    MissingAuthor,

    #[error("Title is required.")]
    MissingTitle,

    #[error("Valid year is required.")]
    InvalidYear,
}

impl ValidationError {
    /// The field the error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidJson => None,
            Self::MissingAuthor => Some("author"),
            Self::MissingTitle => Some("title"),
            Self::InvalidYear => Some("year"),
        }
    }
}

/// Validate raw input against the current calendar year.
pub fn validate_source(raw: &str) -> Result<(), ValidationError> {
    validate_source_at(raw, current_year())
}

/// Validate raw input with an explicit upper bound for the year.
///
/// Well-formed JSON that is not an object has no fields and fails on the
/// author. A set author or title that is not a string is treated as a
/// malformed record.
pub fn validate_source_at(raw: &str, current_year: i32) -> Result<(), ValidationError> {
    let fields = parse_object(raw).map_err(|_| ValidationError::InvalidJson)?;

    check_text(&fields, "author", ValidationError::MissingAuthor)?;
    check_text(&fields, "title", ValidationError::MissingTitle)?;

    match year_field(&fields) {
        Some(year) if (MIN_YEAR..=current_year).contains(&year) => Ok(()),
        _ => Err(ValidationError::InvalidYear),
    }
}

/// Validate raw input, then parse it into a [`SourceRecord`].
///
/// This is the path every formatting request takes: a record is only built
/// from input that passed validation.
pub fn parse_validated(raw: &str) -> crate::Result<SourceRecord> {
    validate_source(raw)?;
    Ok(parse_record(raw)?)
}

fn check_text(
    fields: &Map<String, Value>,
    key: &str,
    missing: ValidationError,
) -> Result<(), ValidationError> {
    match fields.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(()),
        Some(value) if !value.is_string() && is_set(value) => Err(ValidationError::InvalidJson),
        _ => Err(missing),
    }
}

/// Whether a value counts as filled in: not null, false, zero or empty text.
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2026;

    #[test]
    fn test_valid_record() {
        let raw = r#"{"author":"Smith, John","title":"A Study","year":2020}"#;
        assert_eq!(validate_source_at(raw, YEAR), Ok(()));
    }

    #[test]
    fn test_invalid_json() {
        assert_eq!(
            validate_source_at("not json", YEAR),
            Err(ValidationError::InvalidJson)
        );
        assert_eq!(validate_source_at("", YEAR), Err(ValidationError::InvalidJson));
    }

    #[test]
    fn test_missing_author() {
        let raw = r#"{"title":"A Study","year":2020}"#;
        let err = validate_source_at(raw, YEAR).unwrap_err();
        assert_eq!(err, ValidationError::MissingAuthor);
        assert_eq!(err.to_string(), "Author is required.");
        assert_eq!(err.field(), Some("author"));
    }

    #[test]
    fn test_blank_author() {
        let raw = r#"{"author":"   ","title":"A Study","year":2020}"#;
        assert_eq!(
            validate_source_at(raw, YEAR),
            Err(ValidationError::MissingAuthor)
        );
    }

    #[test]
    fn test_missing_title() {
        let raw = r#"{"author":"Smith","title":"","year":2020}"#;
        assert_eq!(
            validate_source_at(raw, YEAR),
            Err(ValidationError::MissingTitle)
        );
    }

    #[test]
    fn test_first_failure_wins() {
        // Author, title and year are all wrong; author is reported
        let raw = r#"{"year":"never"}"#;
        assert_eq!(
            validate_source_at(raw, YEAR),
            Err(ValidationError::MissingAuthor)
        );

        let raw = r#"{"author":"Smith","year":"never"}"#;
        assert_eq!(
            validate_source_at(raw, YEAR),
            Err(ValidationError::MissingTitle)
        );
    }

    #[test]
    fn test_year_checks() {
        let check = |year: &str| {
            let raw = format!(r#"{{"author":"Smith","title":"T","year":{year}}}"#);
            validate_source_at(&raw, YEAR)
        };

        assert_eq!(check("1900"), Ok(()));
        assert_eq!(check("2026"), Ok(()));
        assert_eq!(check("\"2001\""), Ok(()));
        assert_eq!(check("1899"), Err(ValidationError::InvalidYear));
        assert_eq!(check("2027"), Err(ValidationError::InvalidYear));
        assert_eq!(check("0"), Err(ValidationError::InvalidYear));
        assert_eq!(check("\"abc\""), Err(ValidationError::InvalidYear));
        assert_eq!(check("null"), Err(ValidationError::InvalidYear));
    }

    #[test]
    fn test_missing_year() {
        let raw = r#"{"author":"Smith","title":"T"}"#;
        assert_eq!(
            validate_source_at(raw, YEAR),
            Err(ValidationError::InvalidYear)
        );
    }

    #[test]
    fn test_optional_fields_do_not_gate() {
        let raw = r#"{"author":"Smith","title":"T","year":2000,"publisher":"","url":null}"#;
        assert_eq!(validate_source_at(raw, YEAR), Ok(()));
    }

    #[test]
    fn test_non_object_has_no_author() {
        for raw in ["[]", "[1]", "\"x\"", "42", "true"] {
            assert_eq!(
                validate_source_at(raw, YEAR),
                Err(ValidationError::MissingAuthor),
                "input {raw}"
            );
        }
    }

    #[test]
    fn test_null_is_invalid_json() {
        assert_eq!(
            validate_source_at("null", YEAR),
            Err(ValidationError::InvalidJson)
        );
    }

    #[test]
    fn test_non_string_text_fields() {
        let check = |author: &str, title: &str| {
            let raw = format!(r#"{{"author":{author},"title":{title},"year":2020}}"#);
            validate_source_at(&raw, YEAR)
        };

        assert_eq!(check("42", "\"T\""), Err(ValidationError::InvalidJson));
        assert_eq!(check("true", "\"T\""), Err(ValidationError::InvalidJson));
        assert_eq!(check("[]", "\"T\""), Err(ValidationError::InvalidJson));
        assert_eq!(check("\"Smith\"", "[\"T\"]"), Err(ValidationError::InvalidJson));
        assert_eq!(check("\"Smith\"", "{}"), Err(ValidationError::InvalidJson));

        // Unset values are missing rather than malformed
        assert_eq!(check("0", "\"T\""), Err(ValidationError::MissingAuthor));
        assert_eq!(check("false", "\"T\""), Err(ValidationError::MissingAuthor));
        assert_eq!(check("null", "\"T\""), Err(ValidationError::MissingAuthor));
        assert_eq!(check("\"Smith\"", "0"), Err(ValidationError::MissingTitle));
    }

    #[test]
    fn test_malformed_author_wins_over_missing_title() {
        let raw = r#"{"author":42,"year":2020}"#;
        assert_eq!(
            validate_source_at(raw, YEAR),
            Err(ValidationError::InvalidJson)
        );
    }

    #[test]
    fn test_parse_validated() {
        let record = parse_validated(r#"{"author":"Smith","title":"T","year":2001}"#).unwrap();
        assert_eq!(record.publisher, "Unknown Publisher");

        let err = parse_validated(r#"{"author":"Smith","year":2001}"#).unwrap_err();
        assert_eq!(err, crate::CiteError::Validation(ValidationError::MissingTitle));
    }

    #[test]
    fn test_validate_source_uses_current_year() {
        let raw = format!(
            r#"{{"author":"Smith","title":"T","year":{}}}"#,
            current_year()
        );
        assert_eq!(validate_source(&raw), Ok(()));
    }
}
