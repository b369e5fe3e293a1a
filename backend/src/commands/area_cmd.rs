//! Area and dashboard commands

use crate::domain::query::{self, DashboardRollup};
use crate::domain::AreaConfig;
use crate::AppState;

use super::PendingConfirmation;

/// The static taxonomy, in display order
pub fn get_areas(state: &AppState) -> Vec<AreaConfig> {
    state.taxonomy.all().to_vec()
}

pub fn get_sub_areas(state: &AppState, area: &str) -> Vec<String> {
    state
        .taxonomy
        .sub_areas(area)
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// The area a command acts on; the first configured area when none is active
pub(crate) fn resolve_area(state: &AppState, area: Option<&str>) -> String {
    match area.map(str::trim) {
        Some(a) if !a.is_empty() => a.to_string(),
        _ => state.taxonomy.default_area().to_string(),
    }
}

/// Cross-area numbers for the dashboard
pub async fn get_dashboard(state: &AppState) -> DashboardRollup {
    let store = state.store.lock().await;
    query::rollup(store.snapshot(), state.config.recent_limit)
}

/// Ask to empty an area; nothing happens until the token is confirmed
pub async fn request_reset(state: &AppState, area: Option<&str>) -> PendingConfirmation {
    let area = resolve_area(state, area);
    let mut store = state.store.lock().await;
    let token = store.request_reset(&area);
    let prompt = store
        .pending()
        .get(token)
        .map(|action| action.prompt())
        .unwrap_or_default();
    PendingConfirmation { token, prompt }
}
