//! Error types for list_manager

use thiserror::Error;

/// A text line that did not match the item grammar.
///
/// `line` is 1-based and always refers to the first offending line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line {line}: {reason}")]
pub struct ParseError {
    pub line: usize,
    pub reason: String,
}

impl ParseError {
    pub(crate) fn invalid_format(line: usize) -> Self {
        Self {
            line,
            reason: "Invalid format".to_string(),
        }
    }
}

/// Rejection of externally supplied inventory JSON
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// Text is not JSON at all
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    /// Top level value is not an array
    #[error("JSON must be an array of items")]
    NotAnArray,
    /// Element at `index` (0-based) does not have the item shape
    #[error("Item {index}: invalid format. Expected {{ quantity: number, name: string, tag?: string }}")]
    InvalidItem { index: usize },
}

/// Failures raised by a file adapter or by JSON (de)serialization in storage
#[derive(Debug, Error)]
pub enum StorageError {
    /// Path does not exist in the backing store
    #[error("File not found: {0}")]
    NotFound(String),
    /// Underlying I/O operation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Content could not be (de)serialized
    #[error("JSON error on {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// True when the error only means "nothing stored at this path yet"
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

/// Unified error type for list_manager operations
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// A list with this name is already stored
    #[error("A list named '{0}' already exists")]
    ListExists(String),
    /// No list stored under this name
    #[error("List not found: {0}")]
    ListNotFound(String),
    /// Name is not a backup file
    #[error("Not a backup file: {0}")]
    NotABackup(String),
    /// Settings value outside its allowed range
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result alias for list_manager operations
pub type Result<T> = std::result::Result<T, Error>;
