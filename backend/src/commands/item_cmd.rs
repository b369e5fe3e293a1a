//! Item Commands
//!
//! Add/edit/delete and the filtered table view for one area.

use chrono::NaiveDate;

use crate::domain::query::{self, AreaView};
use crate::domain::{FilterCriteria, ItemFields, MonitoringItem};
use crate::store::{today_string, ConfirmationToken, ConfirmedAction};
use crate::AppState;

use super::area_cmd::resolve_area;
use super::{to_message, CommandOutcome, PendingConfirmation};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(value: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|_| format!("Invalid date '{}' (expected YYYY-MM-DD)", value))
}

/// Form dates: empty means today, anything else must be a calendar date
fn normalize_form_date(value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(today_string());
    }
    parse_date(value)
}

fn normalize_filter_date(value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(String::new());
    }
    parse_date(value)
}

/// `current_date` is the stored date of an edited item; kept as is when the edit leaves it alone
fn prepare_fields(
    state: &AppState,
    mut fields: ItemFields,
    current_date: Option<&str>,
) -> Result<ItemFields, String> {
    let unchanged = current_date.is_some_and(|d| !d.is_empty() && d == fields.last_update);
    if !unchanged {
        fields.last_update = normalize_form_date(&fields.last_update)?;
    }
    if !fields.area.is_empty()
        && !fields.sub_area.is_empty()
        && !state.taxonomy.is_known_pair(&fields.area, &fields.sub_area)
    {
        log::warn!(
            "Sub-area '{}' is not configured for area '{}'",
            fields.sub_area,
            fields.area
        );
    }
    Ok(fields)
}

/// Filtered items of one area with their statistics
pub async fn list_items(
    state: &AppState,
    area: Option<&str>,
    mut criteria: FilterCriteria,
) -> Result<AreaView, String> {
    let area = resolve_area(state, area);
    criteria.date_from = normalize_filter_date(&criteria.date_from)?;
    criteria.date_to = normalize_filter_date(&criteria.date_to)?;

    let store = state.store.lock().await;
    Ok(query::area_view(store.snapshot(), &area, &criteria))
}

pub async fn get_item(state: &AppState, id: &str) -> Option<MonitoringItem> {
    let store = state.store.lock().await;
    store.find(id)
}

/// Create an item in `fields.area`, or in the active area when the form left it empty
pub async fn add_item(
    state: &AppState,
    area: Option<&str>,
    mut fields: ItemFields,
) -> Result<CommandOutcome<MonitoringItem>, String> {
    if fields.area.is_empty() {
        fields.area = resolve_area(state, area);
    }
    let fields = prepare_fields(state, fields, None)?;
    let target = fields.area.clone();

    let mut store = state.store.lock().await;
    store
        .add(fields, &target)
        .await
        .map(CommandOutcome::from)
        .map_err(to_message)
}

/// Update an item; `value` is `None` when the item no longer exists
pub async fn edit_item(
    state: &AppState,
    id: &str,
    fields: ItemFields,
) -> Result<CommandOutcome<Option<MonitoringItem>>, String> {
    let mut store = state.store.lock().await;
    let current_date = store.find(id).map(|item| item.last_update);
    let fields = prepare_fields(state, fields, current_date.as_deref())?;
    store
        .edit(id, fields)
        .await
        .map(CommandOutcome::from)
        .map_err(to_message)
}

/// Ask to delete an item; nothing happens until the token is confirmed
pub async fn request_delete(state: &AppState, area: Option<&str>, id: &str) -> PendingConfirmation {
    let area = resolve_area(state, area);
    let mut store = state.store.lock().await;
    let token = store.request_delete(id, &area);
    let prompt = store
        .pending()
        .get(token)
        .map(|action| action.prompt())
        .unwrap_or_default();
    PendingConfirmation { token, prompt }
}

/// Perform a requested delete or reset
pub async fn confirm_action(
    state: &AppState,
    token: ConfirmationToken,
) -> Result<CommandOutcome<ConfirmedAction>, String> {
    let mut store = state.store.lock().await;
    store
        .confirm(token)
        .await
        .map(CommandOutcome::from)
        .map_err(to_message)
}

/// Abandon a requested action; the store is left as it is
pub async fn cancel_action(state: &AppState, token: ConfirmationToken) -> bool {
    let mut store = state.store.lock().await;
    store.cancel(token)
}
