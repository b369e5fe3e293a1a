//! Interchange
//!
//! JSON and CSV conversion of an area's items, and validated JSON import.

mod csv;
mod json;

pub use self::csv::{export_csv, CSV_HEADERS};
pub use self::json::{export_json, parse_import};

/// Export formats offered for an area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Download name for an area export: whitespace runs become `_`
pub fn export_file_name(area: &str, format: ExportFormat) -> String {
    let stem = area.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}.{}", stem, format.extension())
}
