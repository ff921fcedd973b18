#![allow(dead_code)]

use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use rust_xlsxwriter::Workbook;

/// Fixture cell written into a test workbook.
#[derive(Clone, Copy, Debug)]
pub enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

pub use Cell::{Blank, Number, Text};

/// Writes `rows` into worksheet `sheet` of a new workbook at `path`.
pub fn write_workbook(path: &Path, sheet: &str, rows: &[Vec<Cell>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).expect("sheet name");
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (row_num, col_num) = (row_idx as u32, col_idx as u16);
            match cell {
                Text(value) => {
                    worksheet
                        .write_string(row_num, col_num, *value)
                        .expect("string written");
                }
                Number(value) => {
                    worksheet
                        .write_number(row_num, col_num, *value)
                        .expect("number written");
                }
                Blank => {}
            }
        }
    }
    workbook.save(path).expect("fixture workbook saved");
}

/// Writes a standard sales sheet with headers `Item`, `Qty`, `Zona` and the
/// given data rows.
pub fn write_sales(path: &Path, rows: &[(&'static str, f64, &'static str)]) {
    let mut sheet = vec![vec![Text("Item"), Text("Qty"), Text("Zona")]];
    sheet.extend(
        rows.iter()
            .map(|&(item, qty, zona)| vec![Text(item), Number(qty), Text(zona)]),
    );
    write_workbook(path, "ITEM_O", &sheet);
}

/// Reads every row of the first worksheet back as strings.
pub fn read_back(path: &Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("output workbook opened");
    let range = workbook
        .worksheet_range("Sheet1")
        .expect("Sheet1 present")
        .expect("Sheet1 readable");
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    DataType::Empty => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect()
}
