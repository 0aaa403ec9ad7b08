//! Citation styles.
//!
//! Each style renders two forms of the same record: the full reference for a
//! bibliography and the short in-text marker. The set is closed; unknown
//! identifiers are handled by [`crate::format`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::SourceRecord;

/// One of the supported citation styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationStyle {
    Apa,
    Mla,
    Chicago,
    Harvard,
    Ieee,
    Vancouver,
}

/// Returned by [`CitationStyle::from_str`] for unknown identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown citation style: {0}")]
pub struct UnknownStyle(pub String);

impl CitationStyle {
    /// All styles, in selector order.
    pub const ALL: [CitationStyle; 6] = [
        Self::Apa,
        Self::Mla,
        Self::Chicago,
        Self::Harvard,
        Self::Ieee,
        Self::Vancouver,
    ];

    /// Look up a style by identifier. Matching is exact.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.id() == id)
    }

    /// Identifier used in configuration and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Apa => "apa",
            Self::Mla => "mla",
            Self::Chicago => "chicago",
            Self::Harvard => "harvard",
            Self::Ieee => "ieee",
            Self::Vancouver => "vancouver",
        }
    }

    /// Display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Apa => "APA",
            Self::Mla => "MLA",
            Self::Chicago => "Chicago",
            Self::Harvard => "Harvard",
            Self::Ieee => "IEEE",
            Self::Vancouver => "Vancouver",
        }
    }

    /// Render the full reference.
    pub fn reference(&self, record: &SourceRecord) -> String {
        let SourceRecord {
            author,
            title,
            year,
            publisher,
            ..
        } = record;

        match self {
            Self::Apa => format!(
                "{author} ({year}). {title}. {publisher}{}",
                url_clause(record, ". Retrieved from ")
            ),
            Self::Mla => format!(
                "{author}. \"{title}.\" {publisher}, {year}{}",
                url_clause(record, ", ")
            ),
            Self::Chicago => format!(
                "{author}, \"{title},\" {publisher}, {year}{}",
                url_clause(record, ", ")
            ),
            Self::Harvard => format!(
                "{author} ({year}) {title}. {publisher}{}",
                url_clause(record, ". Available at: ")
            ),
            Self::Ieee => format!(
                "[1] {author}, \"{title},\" {publisher}, {year}{}",
                url_clause(record, ". [Online]. Available: ")
            ),
            Self::Vancouver => format!(
                "{author}. {title}. {publisher}; {year}{}",
                url_clause(record, ". Available from: ")
            ),
        }
    }

    /// Render the in-text marker.
    ///
    /// IEEE and Vancouver are numeric styles; with a single source the marker
    /// is always the first entry.
    pub fn in_text(&self, record: &SourceRecord) -> String {
        let surname = record.surname();
        let year = record.year;

        match self {
            Self::Apa | Self::Harvard => format!("({surname}, {year})"),
            Self::Mla | Self::Chicago => format!("({surname} {year})"),
            Self::Ieee => "[1]".to_string(),
            Self::Vancouver => "(1)".to_string(),
        }
    }
}

fn url_clause(record: &SourceRecord, prefix: &str) -> String {
    if record.has_url() {
        format!("{prefix}{}", record.url)
    } else {
        String::new()
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CitationStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| UnknownStyle(s.to_string()))
    }
}
