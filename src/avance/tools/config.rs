/// Worksheet read from every source workbook.
pub const DEFAULT_SHEET: &str = "ITEM_O";
/// Literal prefix a source file name must start with.
pub const DEFAULT_PREFIX: &str = "AvanceVentasINTI";
/// Extension a source file name must end with.
pub const DEFAULT_EXTENSION: &str = ".xlsx";
/// File name of the consolidated workbook, written inside the source folder.
pub const OUTPUT_FILE: &str = "Out.xlsx";
/// Worksheet name used for the consolidated workbook.
pub const OUTPUT_SHEET: &str = "Sheet1";

/// Naming conventions shared by discovery, the window reader, and the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    pub sheet_name: String,
    pub file_prefix: String,
    pub file_extension: String,
    pub output_file: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET.to_string(),
            file_prefix: DEFAULT_PREFIX.to_string(),
            file_extension: DEFAULT_EXTENSION.to_string(),
            output_file: OUTPUT_FILE.to_string(),
        }
    }
}
