//! CSV export
//!
//! Fixed column order; ids are not exported. Every data field is quoted.

use crate::domain::MonitoringItem;

pub const CSV_HEADERS: [&str; 7] = [
    "Area",
    "Sub Area",
    "Indikator",
    "Status",
    "Update Terakhir",
    "PIC",
    "Catatan",
];

fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn item_row(item: &MonitoringItem) -> String {
    [
        item.area.as_str(),
        item.sub_area.as_str(),
        item.indicator.as_str(),
        item.status.as_str(),
        item.last_update.as_str(),
        item.pic.as_str(),
        item.notes.as_str(),
    ]
    .iter()
    .map(|field| csv_quote(field))
    .collect::<Vec<_>>()
    .join(",")
}

pub fn export_csv(items: &[MonitoringItem]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    lines.extend(items.iter().map(item_row));
    lines.join("\n")
}
