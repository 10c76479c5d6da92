//! Error types for the CSV pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, ProcessError>;

/// Errors that can occur while lexing, filtering, or serializing CSV data
#[derive(Debug, Error)]
pub enum ProcessError {
    /// A filter or column selection names a column the input does not have
    #[error("Header '{0}' not found in CSV file/string")]
    HeaderNotFound(String),

    /// A filter line has no operator, header, or value
    #[error("Invalid filter: '{0}'")]
    InvalidFilter(String),

    /// Lexers need a non-empty delimiter
    #[error("Delimiter cannot be an empty string")]
    EmptyDelimiter,

    /// A row is too short to hold a filtered column
    #[error("Row with {width} field(s) has no value for header '{header}'")]
    MissingField { header: String, width: usize },

    /// Input file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
