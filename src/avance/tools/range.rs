use crate::avance::tools::error::{Result, ToolError};

/// Highest column addressable in an xlsx worksheet (`XFD`).
const MAX_COLUMN: usize = 16_383;

/// Parses a spreadsheet column selection such as `"A:D"`, `"C"` or
/// `"A,C:E"` into ascending, de-duplicated zero-based column indices.
pub fn parse_column_range(spec: &str) -> Result<Vec<usize>> {
    let invalid = |reason: &str| ToolError::unreadable(format!("column range '{spec}'"), reason);

    let mut columns: Vec<usize> = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            return Err(invalid("empty range segment"));
        }
        let (lower, upper) = match part.split_once(':') {
            Some((lower, upper)) => (lower.trim(), upper.trim()),
            None => (part, part),
        };
        let lower = column_index(lower).ok_or_else(|| invalid("unrecognised column letters"))?;
        let upper = column_index(upper).ok_or_else(|| invalid("unrecognised column letters"))?;
        if lower > upper {
            return Err(invalid("range end precedes range start"));
        }
        columns.extend(lower..=upper);
    }

    columns.sort_unstable();
    columns.dedup();
    Ok(columns)
}

/// Converts column letters (`A`, `z`, `AA`) into a zero-based index.
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut index = 0usize;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
        if index > MAX_COLUMN + 1 {
            return None;
        }
    }
    Some(index - 1)
}
