use std::fmt;
use std::path::PathBuf;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Column names stamped on every consolidated row.
pub const YEAR_COLUMN: &str = "Year";
pub const MONTH_COLUMN: &str = "Month";
pub const DAY_COLUMN: &str = "Day";

/// Date triple taken from a source file name. The parts are opaque tags and
/// are never interpreted as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateTag {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl DateTag {
    pub fn new(year: impl Into<String>, month: impl Into<String>, day: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            month: month.into(),
            day: day.into(),
        }
    }
}

/// One discovered input workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_name: String,
    pub date: DateTag,
}

/// A single cell of the in-memory table, mirroring the value kinds an xlsx
/// worksheet can hold.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    /// Spreadsheet serial date (days since 1899-12-30, fractional time).
    DateTime(f64),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric view of the cell, if it holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(value) => Some(*value as f64),
            CellValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Converts the spreadsheet serial of a date cell into a calendar value.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        let CellValue::DateTime(serial) = self else {
            return None;
        };
        if !serial.is_finite() {
            return None;
        }
        // Serials below 60 predate the phantom 1900-02-29 of the 1900 epoch.
        let adjust = if *serial < 60.0 { 1.0 } else { 0.0 };
        let millis = ((serial + adjust) * 86_400_000.0).round() as i64;
        let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
        epoch.checked_add_signed(Duration::try_milliseconds(millis)?)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Int(value) => write!(f, "{value}"),
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::Text(value) => f.write_str(value),
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::DateTime(serial) => match self.as_datetime() {
                Some(datetime) => write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S")),
                None => write!(f, "{serial}"),
            },
        }
    }
}

/// Value kind of a whole column, inferred from its non-empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Only numbers (or nothing at all).
    Numeric,
    /// Only booleans.
    Boolean,
    /// Only dates.
    Temporal,
    /// Text, or a mix of kinds.
    Textual,
}

impl ColumnKind {
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let mut kind: Option<ColumnKind> = None;
        for cell in cells {
            let cell_kind = match cell {
                CellValue::Empty => continue,
                CellValue::Int(_) | CellValue::Float(_) => ColumnKind::Numeric,
                CellValue::Bool(_) => ColumnKind::Boolean,
                CellValue::DateTime(_) => ColumnKind::Temporal,
                CellValue::Text(_) => return ColumnKind::Textual,
            };
            match kind {
                None => kind = Some(cell_kind),
                Some(existing) if existing != cell_kind => return ColumnKind::Textual,
                Some(_) => {}
            }
        }
        kind.unwrap_or(ColumnKind::Numeric)
    }
}

/// Row-oriented table with named columns. Used both for the slice read from
/// one workbook and for the consolidated result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Appends a row, padding or truncating it to the table width.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
    }

    /// Cells of the named column, in row order.
    pub fn column_values(&self, name: &str) -> Option<impl Iterator<Item = &CellValue>> {
        let position = self.column_position(name)?;
        Some(self.rows.iter().map(move |row| &row[position]))
    }

    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        self.column_values(name).map(ColumnKind::infer)
    }

    /// Sets every row's value in `name` to `value`, appending the column when
    /// it does not exist yet.
    pub fn fill_column(&mut self, name: &str, value: CellValue) {
        let position = match self.column_position(name) {
            Some(position) => position,
            None => {
                self.columns.push(name.to_string());
                self.columns.len() - 1
            }
        };
        for row in &mut self.rows {
            row.resize(self.columns.len(), CellValue::Empty);
            row[position] = value.clone();
        }
    }

    /// Returns true when both tables carry the same column names, in any order.
    pub fn same_column_set(&self, other: &[String]) -> bool {
        if self.columns.len() != other.len() {
            return false;
        }
        let mut lhs: Vec<&String> = self.columns.iter().collect();
        let mut rhs: Vec<&String> = other.iter().collect();
        lhs.sort();
        rhs.sort();
        lhs == rhs
    }

    /// Rearranges the columns into `order`. The caller guarantees that
    /// `order` is a permutation of the current columns.
    pub fn reorder_columns(&mut self, order: &[String]) {
        if self.columns == order {
            return;
        }
        let mapping: Vec<usize> = order
            .iter()
            .filter_map(|name| self.column_position(name))
            .collect();
        for row in &mut self.rows {
            let reordered: Vec<CellValue> =
                mapping.iter().map(|&idx| std::mem::take(&mut row[idx])).collect();
            *row = reordered;
        }
        self.columns = order.to_vec();
    }

    /// Moves all rows of `other` to the end of this table. Columns must match.
    pub fn append(&mut self, other: Table) {
        debug_assert_eq!(self.columns, other.columns);
        self.rows.extend(other.rows);
    }
}
