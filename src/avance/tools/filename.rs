use crate::avance::tools::error::{Result, ToolError};
use crate::avance::tools::model::DateTag;

/// Extracts the date tag from a dotted file name such as
/// `AvanceVentasINTI.2023.05.10.xlsx`.
///
/// The second, third and fourth dot-separated segments are returned verbatim;
/// no calendar validation takes place.
pub fn parse_date_tag(file_name: &str) -> Result<DateTag> {
    let mut segments = file_name.split('.').skip(1);
    match (segments.next(), segments.next(), segments.next()) {
        (Some(year), Some(month), Some(day)) => Ok(DateTag {
            year: year.to_string(),
            month: month.to_string(),
            day: day.to_string(),
        }),
        _ => Err(ToolError::MalformedFilename(file_name.to_string())),
    }
}
