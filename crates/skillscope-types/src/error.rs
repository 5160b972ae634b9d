//! Error types for scoring calls

use thiserror::Error;

/// Errors raised before any extraction or scoring happens
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Prompt missing, blank, or over the accepted length
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MatchError {
    /// Stable machine-readable kind, used on the wire
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
        }
    }
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, MatchError>;
