//! Error types for logsieve.

use thiserror::Error;

/// Main error type for logsieve.
#[derive(Debug, Error)]
pub enum SieveError {
    /// Configuration error (invalid period, bad pattern, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Regex error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Timestamp parsing error
    #[error("Timestamp error: {0}")]
    Timestamp(#[from] time::error::Parse),
}

/// A line that does not conform to the combined log grammar.
///
/// Parsing is all-or-nothing, so there is no partial record attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line did not match the grammar
    #[error("line does not match the combined log format")]
    Mismatch,
}
