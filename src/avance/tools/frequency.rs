use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::avance::tools::error::{Result, ToolError};
use crate::avance::tools::model::{CellValue, ColumnKind, Table};

/// Distinct value counted by a [`FrequencyTable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FrequencyKey {
    /// Rounded value from a numeric column.
    Integer(i64),
    /// Verbatim value from any other column.
    Label(String),
}

impl fmt::Display for FrequencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyKey::Integer(value) => write!(f, "{value}"),
            FrequencyKey::Label(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub value: FrequencyKey,
    pub count: usize,
}

/// Value counts of one column, most frequent first. Ties keep the order in
/// which the values were first seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    pub column: String,
    pub kind: ColumnKind,
    pub entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of values that were counted.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    pub fn count_of(&self, value: &FrequencyKey) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| &entry.value == value)
            .map(|entry| entry.count)
    }
}

/// Counts the distinct values of `column`.
///
/// Numeric columns drop blank and non-finite cells and round the rest half to
/// even before counting; values beyond the `i64` range are dropped as well.
/// Other columns drop blank cells and count values as-is.
#[instrument(level = "debug", skip(table))]
pub fn summarize(table: &Table, column: &str) -> Result<FrequencyTable> {
    let kind = table
        .column_kind(column)
        .ok_or_else(|| ToolError::ColumnNotFound(column.to_string()))?;
    let values = table
        .column_values(column)
        .ok_or_else(|| ToolError::ColumnNotFound(column.to_string()))?;

    let keys = values.filter_map(|cell| match kind {
        ColumnKind::Numeric => numeric_key(cell),
        _ => label_key(cell),
    });
    let entries = count_values(keys);
    debug!(distinct = entries.len(), ?kind, "column summarized");

    Ok(FrequencyTable {
        column: column.to_string(),
        kind,
        entries,
    })
}

fn numeric_key(cell: &CellValue) -> Option<FrequencyKey> {
    let value = cell.as_number()?;
    if !value.is_finite() {
        return None;
    }
    let rounded = value.round_ties_even();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return None;
    }
    Some(FrequencyKey::Integer(rounded as i64))
}

fn label_key(cell: &CellValue) -> Option<FrequencyKey> {
    if cell.is_empty() {
        None
    } else {
        Some(FrequencyKey::Label(cell.to_string()))
    }
}

fn count_values(keys: impl Iterator<Item = FrequencyKey>) -> Vec<FrequencyEntry> {
    let mut index: HashMap<FrequencyKey, usize> = HashMap::new();
    let mut entries: Vec<FrequencyEntry> = Vec::new();
    for key in keys {
        match index.get(&key) {
            Some(&position) => entries[position].count += 1,
            None => {
                index.insert(key.clone(), entries.len());
                entries.push(FrequencyEntry {
                    value: key,
                    count: 1,
                });
            }
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    entries.sort_by(|lhs, rhs| rhs.count.cmp(&lhs.count));
    entries
}
