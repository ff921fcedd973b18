use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the failures of one user-triggered action: a
/// consolidation run or a chart/summary request.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Raised when the supplied folder does not exist or is not a directory.
    #[error("folder not found or not a directory: {0}")]
    InvalidDirectory(PathBuf),

    /// Raised when a required run field was left blank.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// Raised when the start row is not a positive integer.
    #[error("start row must be a positive integer, got '{0}'")]
    InvalidStartRow(String),

    /// Raised when the row limit was supplied but does not parse as an integer.
    #[error("row limit must be an integer, got '{0}'")]
    NonIntegerLimit(String),

    /// Raised when the row limit parses but is zero or negative.
    #[error("row limit must be positive, got {0}")]
    NonPositiveLimit(i64),

    /// Raised when the folder exists but holds no candidate workbooks.
    #[error("no matching workbooks found in {0}")]
    NoMatchingFiles(PathBuf),

    /// Raised when a discovered file name lacks the dotted date segments.
    #[error("file name '{0}' does not carry a <prefix>.<year>.<month>.<day> date")]
    MalformedFilename(String),

    /// Raised when a workbook, its worksheet, or the column range cannot be read.
    #[error("unreadable source {source_name}: {reason}")]
    UnreadableSource { source_name: String, reason: String },

    /// Raised when a slice's columns differ from the columns already consolidated.
    #[error("column set of {source_name} ({found:?}) does not match {expected:?}")]
    ColumnSetMismatch {
        source_name: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Raised when the consolidated workbook cannot be persisted.
    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// Raised when a summary or chart targets an unknown column.
    #[error("column '{0}' not found in consolidated table")]
    ColumnNotFound(String),

    /// Raised when a chart has nothing to draw or its image cannot be saved.
    #[error("chart rendering failed: {0}")]
    RenderFailed(String),

    /// Raised when charting is requested before any successful consolidation.
    #[error("no consolidated data available; process a folder first")]
    NoData,

    /// Wrapper for IO failures such as listing directories.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization of a summary fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ToolError {
    pub(crate) fn unreadable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        ToolError::UnreadableSource {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}
