use std::path::PathBuf;

use crate::avance::tools::config::IngestConfig;
use crate::avance::tools::error::{Result, ToolError};
use crate::avance::tools::range::parse_column_range;

/// The four run fields exactly as a front end collected them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRequest {
    pub folder_path: String,
    pub col_range: String,
    /// One-based row as typed by the user.
    pub start_row: String,
    /// Optional cap on rows per file; blank means unbounded.
    pub row_limit: String,
}

/// Slice of each source worksheet to read. Shared by every file of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadWindow {
    pub sheet_name: String,
    /// Column selection as typed, kept for diagnostics.
    pub column_range: String,
    /// Zero-based column indices, ascending.
    pub columns: Vec<usize>,
    /// Leading worksheet rows skipped before the header row.
    pub skip_rows: usize,
    pub row_limit: Option<usize>,
}

/// A validated request: where to look and what to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub folder: PathBuf,
    pub window: ReadWindow,
}

impl RunRequest {
    pub fn new(
        folder_path: impl Into<String>,
        col_range: impl Into<String>,
        start_row: impl Into<String>,
        row_limit: impl Into<String>,
    ) -> Self {
        Self {
            folder_path: folder_path.into(),
            col_range: col_range.into(),
            start_row: start_row.into(),
            row_limit: row_limit.into(),
        }
    }

    /// Checks the raw fields and turns them into a [`RunPlan`].
    ///
    /// A start row of `1` is valid and maps to a zero offset.
    pub fn validate(&self, config: &IngestConfig) -> Result<RunPlan> {
        let folder_path = required(&self.folder_path, "folder_path")?;
        let col_range = required(&self.col_range, "col_range")?;
        let start_row = required(&self.start_row, "start_row")?;

        let folder = PathBuf::from(folder_path);
        if !folder.is_dir() {
            return Err(ToolError::InvalidDirectory(folder));
        }

        let skip_rows = parse_start_row(start_row)?;
        let row_limit = parse_row_limit(&self.row_limit)?;
        let columns = parse_column_range(col_range)?;

        Ok(RunPlan {
            folder,
            window: ReadWindow {
                sheet_name: config.sheet_name.clone(),
                column_range: col_range.to_string(),
                columns,
                skip_rows,
                row_limit,
            },
        })
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ToolError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

/// Converts the one-based start row into the number of rows to skip.
pub fn parse_start_row(value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(row) if row >= 1 => Ok(row - 1),
        _ => Err(ToolError::InvalidStartRow(value.to_string())),
    }
}

/// Parses the optional row cap. Blank input means no cap.
pub fn parse_row_limit(value: &str) -> Result<Option<usize>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let limit: i64 = trimmed
        .parse()
        .map_err(|_| ToolError::NonIntegerLimit(value.to_string()))?;
    if limit <= 0 {
        return Err(ToolError::NonPositiveLimit(limit));
    }
    usize::try_from(limit)
        .map(Some)
        .map_err(|_| ToolError::NonIntegerLimit(value.to_string()))
}
