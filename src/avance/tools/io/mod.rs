//! File-system adapters: source discovery, workbook reading and writing, and
//! chart images.

pub mod chart;
pub mod discovery;
pub mod excel_read;
pub mod excel_write;
