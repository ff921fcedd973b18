use std::collections::HashMap;
use std::path::Path;

use calamine::{CellErrorType, DataType, Reader, Xlsx, open_workbook};
use tracing::{debug, instrument};

use crate::avance::tools::error::{Result, ToolError};
use crate::avance::tools::model::{CellValue, Table};
use crate::avance::tools::request::ReadWindow;

/// Reads the configured window of one workbook into a [`Table`].
///
/// The first row after the skipped region supplies the headers; the rows below
/// it, up to the optional cap, become the data. Rows whose selected cells are
/// all blank are dropped.
#[instrument(
    level = "debug",
    skip(window),
    fields(path = %path.display(), sheet = %window.sheet_name)
)]
pub fn read_window(path: &Path, window: &ReadWindow) -> Result<Table> {
    let source_name = path.display().to_string();
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|err| ToolError::unreadable(&source_name, err))?;

    let range = read_required_sheet(&mut workbook, &window.sheet_name, &source_name)?;
    let (Some(_), Some((last_row, _))) = (range.start(), range.end()) else {
        return Err(ToolError::unreadable(
            &source_name,
            format!("worksheet '{}' is empty", window.sheet_name),
        ));
    };

    let header_row = u32::try_from(window.skip_rows)
        .map_err(|_| ToolError::unreadable(&source_name, "start row out of range"))?;
    if header_row > last_row {
        return Err(ToolError::unreadable(
            &source_name,
            format!(
                "start row {} is past the last used row {}",
                window.skip_rows + 1,
                last_row + 1
            ),
        ));
    }

    let columns: Vec<u32> = window
        .columns
        .iter()
        .map(|&col| u32::try_from(col))
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| ToolError::unreadable(&source_name, "column out of range"))?;

    let raw_headers = columns
        .iter()
        .map(|&col| header_label(range.get_value((header_row, col))));
    let mut table = Table::new(deduplicate_headers(raw_headers));

    let limit = window.row_limit.unwrap_or(usize::MAX);
    for row_idx in (header_row + 1)..=last_row {
        if table.row_count() >= limit {
            break;
        }
        let row: Vec<CellValue> = columns
            .iter()
            .map(|&col| to_cell_value(range.get_value((row_idx, col))))
            .collect();
        if row.iter().all(CellValue::is_empty) {
            continue;
        }
        table.push_row(row);
    }

    debug!(
        columns = table.columns().len(),
        rows = table.row_count(),
        "window read"
    );
    Ok(table)
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
    source_name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::unreadable(source_name, format!("missing sheet '{name}'")))?;
    range_result.map_err(|err| ToolError::unreadable(source_name, err))
}

fn to_cell_value(cell: Option<&DataType>) -> CellValue {
    match cell {
        Some(DataType::Int(value)) => CellValue::Int(*value),
        Some(DataType::Float(value)) => CellValue::Float(*value),
        Some(DataType::String(value)) if value.is_empty() => CellValue::Empty,
        Some(DataType::String(value)) => CellValue::Text(value.clone()),
        Some(DataType::Bool(value)) => CellValue::Bool(*value),
        Some(DataType::DateTime(serial)) => CellValue::DateTime(*serial),
        Some(DataType::Error(CellErrorType::NA)) => CellValue::Empty,
        Some(DataType::Empty) | None => CellValue::Empty,
        Some(other) => CellValue::Text(other.to_string()),
    }
}

fn header_label(cell: Option<&DataType>) -> Option<String> {
    let label = to_cell_value(cell).to_string();
    let label = label.trim();
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

/// Names blank headers `Unnamed: <position>` and suffixes repeats with
/// `.1`, `.2`, ... so every column name is unique.
pub(crate) fn deduplicate_headers(
    headers: impl IntoIterator<Item = Option<String>>,
) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .enumerate()
        .map(|(position, header)| {
            let base = header.unwrap_or_else(|| format!("Unnamed: {position}"));
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}
