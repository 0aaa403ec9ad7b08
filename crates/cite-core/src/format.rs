//! Citation formatting by style identifier.
//!
//! Style identifiers come from user input (selector value, config file,
//! command line), so lookups are by string and unknown ids produce
//! [`UNSUPPORTED_STYLE_MESSAGE`] instead of an error.

use crate::error::Result;
use crate::record::{parse_record, SourceRecord};
use crate::style::CitationStyle;

/// Rendered in place of a citation when the style id is unknown
pub const UNSUPPORTED_STYLE_MESSAGE: &str = "Selected citation style not supported yet.";

/// Render the full reference for `style_id`.
pub fn format_reference(record: &SourceRecord, style_id: &str) -> String {
    match CitationStyle::from_id(style_id) {
        Some(style) => style.reference(record),
        None => UNSUPPORTED_STYLE_MESSAGE.to_string(),
    }
}

/// Render the in-text citation for `style_id`.
pub fn format_in_text(record: &SourceRecord, style_id: &str) -> String {
    match CitationStyle::from_id(style_id) {
        Some(style) => style.in_text(record),
        None => UNSUPPORTED_STYLE_MESSAGE.to_string(),
    }
}

/// Parse raw input and render the full reference.
///
/// Field validation is not applied; absent fields are defaulted.
pub fn generate_reference(raw: &str, style_id: &str) -> Result<String> {
    let record = parse_record(raw)?;
    Ok(format_reference(&record, style_id))
}

/// Parse raw input and render the in-text citation.
pub fn generate_in_text(raw: &str, style_id: &str) -> Result<String> {
    let record = parse_record(raw)?;
    Ok(format_in_text(&record, style_id))
}

/// Join a reference and its in-text citation into one block.
pub fn combined_citation(reference: &str, in_text: &str) -> String {
    format!("{reference}\n\nIn-Text: {in_text}")
}
