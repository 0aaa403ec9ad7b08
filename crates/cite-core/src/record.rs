//! Source record parsing
//!
//! A [`SourceRecord`] is built fresh from the raw input on every request.
//! Parsing only fails when the input is not well-formed JSON, or is JSON
//! `null`. Any other non-object value has no fields, so every field takes its
//! default. Fields are defaulted independently when absent or empty.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Substituted when the author is absent or empty
pub const DEFAULT_AUTHOR: &str = "Unknown Author";

/// Substituted when the title is absent or empty
pub const DEFAULT_TITLE: &str = "Untitled";

/// Substituted when the publisher is absent or empty
pub const DEFAULT_PUBLISHER: &str = "Unknown Publisher";

/// Structural parse failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordParseError {
    /// The input is not well-formed JSON
    #[error("Invalid JSON format. Use: {{\"author\": \"Name\", \"title\": \"Title\", \"year\": Number, \"publisher\": \"Publisher\", \"url\": \"URL\"}}")]
    Malformed(String),

    /// The input is JSON `null`, which cannot hold fields
    #[error("Invalid JSON format. Use: {{\"author\": \"Name\", \"title\": \"Title\", \"year\": Number, \"publisher\": \"Publisher\", \"url\": \"URL\"}}")]
    Null,
}

/// A single bibliographic source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Free-form author string, "Surname, First" by convention
    pub author: String,
    pub title: String,
    pub year: i32,
    pub publisher: String,
    /// Empty when the source has no URL
    pub url: String,
}

impl SourceRecord {
    /// Whether the URL clause should be rendered.
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }

    /// The first author's surname, used by in-text citations.
    pub fn surname(&self) -> &str {
        crate::author::first_author_surname(&self.author)
    }
}

/// The current calendar year in local time.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Parse raw input into a [`SourceRecord`], defaulting the year to the
/// current calendar year.
pub fn parse_record(raw: &str) -> Result<SourceRecord, RecordParseError> {
    parse_record_at(raw, current_year())
}

/// Parse raw input into a [`SourceRecord`] with an explicit default year.
pub fn parse_record_at(raw: &str, default_year: i32) -> Result<SourceRecord, RecordParseError> {
    let fields = parse_object(raw)?;

    Ok(SourceRecord {
        author: non_empty_text(&fields, "author").unwrap_or(DEFAULT_AUTHOR).to_string(),
        title: non_empty_text(&fields, "title").unwrap_or(DEFAULT_TITLE).to_string(),
        year: year_field(&fields)
            .filter(|year| *year != 0)
            .unwrap_or(default_year),
        publisher: non_empty_text(&fields, "publisher")
            .unwrap_or(DEFAULT_PUBLISHER)
            .to_string(),
        url: non_empty_text(&fields, "url").unwrap_or_default().to_string(),
    })
}

/// Parse the raw input into its field map.
///
/// Arrays, strings, numbers and booleans yield an empty map.
pub(crate) fn parse_object(raw: &str) -> Result<Map<String, Value>, RecordParseError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(Value::Null) => Err(RecordParseError::Null),
        Ok(_) => Ok(Map::new()),
        Err(e) => Err(RecordParseError::Malformed(e.to_string())),
    }
}

/// A string field, if present. Non-string values count as absent.
fn text_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

fn non_empty_text<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    text_field(fields, key).filter(|s| !s.is_empty())
}

/// The `year` field as an integer.
///
/// Accepts integral JSON numbers and numeric strings. Anything else,
/// including fractional numbers, counts as absent.
pub(crate) fn year_field(fields: &Map<String, Value>) -> Option<i32> {
    match fields.get("year")? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i).ok()
            } else {
                let f = n.as_f64()?;
                if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
                    Some(f as i32)
                } else {
                    None
                }
            }
        }
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}
