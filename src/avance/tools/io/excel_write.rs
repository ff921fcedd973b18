use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::{info, instrument};

use crate::avance::tools::config::OUTPUT_SHEET;
use crate::avance::tools::error::{Result, ToolError};
use crate::avance::tools::model::{CellValue, Table};

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Writes the table to a single-sheet workbook at `path`, replacing any
/// existing file. Non-finite numbers have no xlsx representation and are left
/// blank.
#[instrument(level = "info", skip(table), fields(path = %path.display(), rows = table.row_count()))]
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    build_workbook(path, table).map_err(|err| ToolError::WriteFailed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    info!("consolidated workbook written");
    Ok(())
}

fn build_workbook(path: &Path, table: &Table) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(OUTPUT_SHEET)?;

    for (col_idx, header) in table.columns().iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, header)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let col_num = col_idx as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Int(value) => {
                    worksheet.write_number(row_num, col_num, *value as f64)?;
                }
                CellValue::Float(value) if value.is_finite() => {
                    worksheet.write_number(row_num, col_num, *value)?;
                }
                CellValue::Float(_) => {}
                CellValue::Text(value) => {
                    worksheet.write_string(row_num, col_num, value)?;
                }
                CellValue::Bool(value) => {
                    worksheet.write_boolean(row_num, col_num, *value)?;
                }
                CellValue::DateTime(serial) => {
                    worksheet.write_number_with_format(
                        row_num,
                        col_num,
                        *serial,
                        &datetime_format,
                    )?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
