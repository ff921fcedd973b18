use std::path::Path;

use tracing::{info, instrument};

use crate::avance::tools::config::IngestConfig;
use crate::avance::tools::error::{Result, ToolError};
use crate::avance::tools::io::discovery::discover_sources;
use crate::avance::tools::io::excel_read::read_window;
use crate::avance::tools::model::{
    CellValue, DAY_COLUMN, DateTag, MONTH_COLUMN, SourceFile, Table, YEAR_COLUMN,
};
use crate::avance::tools::request::ReadWindow;

/// Progress notification emitted after each source file is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

/// Reads every matching workbook in `folder` and concatenates the windows
/// into one table tagged with `Year`, `Month` and `Day`.
///
/// Files are processed one at a time in discovery order and `on_progress` is
/// called once per finished file. Any failure aborts the whole batch and
/// nothing is returned for the files already read.
#[instrument(
    level = "info",
    skip(window, config, on_progress),
    fields(folder = %folder.display(), columns = %window.column_range)
)]
pub fn consolidate<F>(
    folder: &Path,
    window: &ReadWindow,
    config: &IngestConfig,
    mut on_progress: F,
) -> Result<Table>
where
    F: FnMut(Progress),
{
    let sources = discover_sources(folder, config)?;
    if sources.is_empty() {
        return Err(ToolError::NoMatchingFiles(folder.to_path_buf()));
    }

    let total = sources.len();
    let mut consolidated: Option<Table> = None;
    let mut expected_columns: Vec<String> = Vec::new();

    for (idx, source) in sources.iter().enumerate() {
        let mut slice = read_window(&source.path, window)?;

        match consolidated.as_mut() {
            None => {
                expected_columns = slice.columns().to_vec();
                stamp_date(&mut slice, &source.date);
                consolidated = Some(slice);
            }
            Some(table) => {
                align_columns(&mut slice, &expected_columns, source)?;
                stamp_date(&mut slice, &source.date);
                table.append(slice);
            }
        }

        let progress = Progress {
            completed: idx + 1,
            total,
        };
        info!(
            file = %source.file_name,
            completed = progress.completed,
            total = progress.total,
            "source consolidated"
        );
        on_progress(progress);
    }

    let table = consolidated.unwrap_or_default();
    info!(rows = table.row_count(), files = total, "consolidation finished");
    Ok(table)
}

/// Ensures `slice` carries exactly the columns of the first file, reordering
/// it when only the order differs.
fn align_columns(slice: &mut Table, expected: &[String], source: &SourceFile) -> Result<()> {
    if slice.columns() == expected {
        return Ok(());
    }
    if !slice.same_column_set(expected) {
        return Err(ToolError::ColumnSetMismatch {
            source_name: source.file_name.clone(),
            expected: expected.to_vec(),
            found: slice.columns().to_vec(),
        });
    }
    slice.reorder_columns(expected);
    Ok(())
}

fn stamp_date(slice: &mut Table, date: &DateTag) {
    slice.fill_column(YEAR_COLUMN, CellValue::Text(date.year.clone()));
    slice.fill_column(MONTH_COLUMN, CellValue::Text(date.month.clone()));
    slice.fill_column(DAY_COLUMN, CellValue::Text(date.day.clone()));
}
