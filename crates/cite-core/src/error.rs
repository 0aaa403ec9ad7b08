//! Error types for cite-core

use thiserror::Error;

use crate::record::RecordParseError;
use crate::validation::ValidationError;

/// Result type alias for cite-core operations
pub type Result<T> = std::result::Result<T, CiteError>;

/// Main error type for cite-core operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CiteError {
    /// The raw input failed field validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The raw input could not be structurally parsed
    #[error(transparent)]
    Parse(#[from] RecordParseError),
}

impl CiteError {
    /// The message shown to the user for this error.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// The input field the error points at, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation(e) => e.field(),
            Self::Parse(_) => None,
        }
    }
}
