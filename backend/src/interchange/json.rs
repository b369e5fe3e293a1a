//! JSON export and import

use serde_json::Value;

use crate::domain::{DomainError, DomainResult, MonitoringItem, RawItem};

/// Pretty-printed array of items, ids included
pub fn export_json(items: &[MonitoringItem]) -> DomainResult<String> {
    serde_json::to_string_pretty(items).map_err(|e| DomainError::Internal(e.to_string()))
}

/// Parse import text into untrusted records
///
/// The text must be a JSON array of objects whose required fields pass
/// validation. Any failure rejects the whole document.
pub fn parse_import(text: &str) -> DomainResult<Vec<RawItem>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| DomainError::Validation(format!("invalid JSON: {}", e)))?;

    let Value::Array(elements) = value else {
        return Err(DomainError::Validation(
            "invalid JSON format (must be an array)".to_string(),
        ));
    };

    let mut raw_items = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let raw = RawItem::from_value(element).and_then(|raw| raw.validate().map(|_| raw));
        match raw {
            Ok(raw) => raw_items.push(raw),
            Err(DomainError::Validation(reason)) => {
                return Err(DomainError::Validation(format!(
                    "item {}: {} (area, subArea and status are required)",
                    index + 1,
                    reason
                )));
            }
            Err(other) => return Err(other),
        }
    }
    Ok(raw_items)
}
