//! Export / Import Commands
//!
//! Exports produce a file name and content for one area. Imports replace the
//! target area's items with the file's contents.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::interchange::{self, ExportFormat};
use crate::AppState;

use super::area_cmd::resolve_area;
use super::{to_message, CommandOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub file_name: String,
    pub content: String,
}

/// Render one area in the requested format
///
/// CSV export of an empty area is refused; JSON export yields `[]`.
pub async fn export_area(
    state: &AppState,
    area: Option<&str>,
    format: ExportFormat,
) -> Result<ExportFile, String> {
    let area = resolve_area(state, area);
    let items = {
        let store = state.store.lock().await;
        store.items(&area)
    };

    let content = match format {
        ExportFormat::Json => interchange::export_json(&items).map_err(to_message)?,
        ExportFormat::Csv => {
            if items.is_empty() {
                return Err(format!("No data to export in area {}", area));
            }
            interchange::export_csv(&items)
        }
    };

    Ok(ExportFile {
        file_name: interchange::export_file_name(&area, format),
        content,
    })
}

/// Export an area and write it into `out_dir`
pub async fn save_export(
    state: &AppState,
    area: Option<&str>,
    format: ExportFormat,
    out_dir: &Path,
) -> Result<PathBuf, String> {
    let file = export_area(state, area, format).await?;
    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|e| format!("Failed to create {}: {}", out_dir.display(), e))?;

    let path = out_dir.join(&file.file_name);
    tokio::fs::write(&path, file.content.as_bytes())
        .await
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    log::info!("Exported {}", path.display());
    Ok(path)
}

/// Import JSON text into an area; the value is the number of items imported
pub async fn import_json(
    state: &AppState,
    area: Option<&str>,
    text: &str,
) -> Result<CommandOutcome<usize>, String> {
    let area = resolve_area(state, area);
    let raw_items = interchange::parse_import(text).map_err(|e| {
        log::warn!("Import into '{}' rejected: {}", area, e);
        format!("Import failed: {}", e)
    })?;

    let mut store = state.store.lock().await;
    store
        .import(&raw_items, &area)
        .await
        .map(CommandOutcome::from)
        .map_err(|e| format!("Import failed: {}", e))
}

/// Read a `.json` file and import it into an area
///
/// The file is read before the store is touched; a failed read leaves it as it was.
pub async fn import_file(
    state: &AppState,
    area: Option<&str>,
    path: &Path,
) -> Result<CommandOutcome<usize>, String> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(format!("Only .json files can be imported ({})", path.display()));
    }

    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    import_json(state, area, &text).await
}
