//! cite-core: source record validation and citation formatting.
//!
//! A source is described by a flat JSON object:
//!
//! ```json
//! {"author": "Smith, John", "title": "A Study", "year": 2020,
//!  "publisher": "Acme Press", "url": "http://example.com"}
//! ```
//!
//! The pipeline is validate, parse, then format:
//! - [`validate_source`]: first-failure-wins field checks with user-facing messages
//! - [`parse_record`]: builds a [`SourceRecord`], defaulting absent fields
//! - [`format_reference`] / [`format_in_text`]: render one of the six
//!   [`CitationStyle`]s, or a fallback message for unknown style ids
//!
//! # Example
//!
//! ```
//! use cite_core::{format_in_text, format_reference, parse_record, validate_source};
//!
//! let raw = r#"{"author": "Smith, John", "title": "A Study", "year": 2020}"#;
//! assert!(validate_source(raw).is_ok());
//!
//! let record = parse_record(raw).unwrap();
//! assert_eq!(
//!     format_reference(&record, "apa"),
//!     "Smith, John (2020). A Study. Unknown Publisher"
//! );
//! assert_eq!(format_in_text(&record, "apa"), "(Smith, 2020)");
//! ```

pub mod author;
pub mod error;
pub mod format;
pub mod record;
pub mod style;
pub mod validation;

pub use author::first_author_surname;
pub use error::{CiteError, Result};
pub use format::*;
pub use record::*;
pub use style::*;
pub use validation::*;
