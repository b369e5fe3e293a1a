use std::sync::Arc;

use tempfile::tempdir;

use super::*;
use crate::config::AppConfig;
use crate::domain::{FilterCriteria, ItemFields, Status};
use crate::interchange::ExportFormat;
use crate::repository::MemoryKvStore;
use crate::store::ConfirmedAction;
use crate::AppState;

async fn setup() -> (Arc<MemoryKvStore>, AppState) {
    let kv = Arc::new(MemoryKvStore::new());
    let state = AppState::with_backend(AppConfig::default(), kv.clone()).await;
    (kv, state)
}

fn form(area: &str, sub_area: &str, status: &str, date: &str) -> ItemFields {
    ItemFields {
        area: area.to_string(),
        sub_area: sub_area.to_string(),
        indicator: "Tingkat kepuasan".to_string(),
        status: status.to_string(),
        last_update: date.to_string(),
        pic: "CS Lead".to_string(),
        notes: String::new(),
    }
}

#[tokio::test]
async fn test_login() {
    let (_kv, state) = setup().await;

    let session = login(&state, " admin ", "admin123").unwrap();
    assert_eq!(session.current_user, "admin");
    assert!(login(&state, "admin", "wrong").is_err());
}

#[tokio::test]
async fn test_areas_and_sub_areas() {
    let (_kv, state) = setup().await;

    let areas = get_areas(&state);
    assert_eq!(areas.len(), 7);
    assert_eq!(areas[0].key, "Strategic Management");
    assert!(get_sub_areas(&state, "Finance & Legal").contains(&"Pajak".to_string()));
    assert!(get_sub_areas(&state, "Nowhere").is_empty());
}

#[tokio::test]
async fn test_seeded_dashboard() {
    let (_kv, state) = setup().await;

    let dashboard = get_dashboard(&state).await;
    assert_eq!(dashboard.total_areas, 7);
    assert_eq!(dashboard.overall.total, 5);
    assert_eq!(dashboard.per_area.len(), 7);
    assert_eq!(dashboard.recent_updates.len(), 5);
    let percent_sum = dashboard.overall.green_percent
        + dashboard.overall.yellow_percent
        + dashboard.overall.red_percent;
    assert!((99..=101).contains(&percent_sum));
}

#[tokio::test]
async fn test_add_defaults_area_and_date() {
    let (kv, state) = setup().await;

    let outcome = add_item(&state, Some("Customer Service"), form("", "Komplain", "Kuning", ""))
        .await
        .unwrap();
    assert!(outcome.notice.is_none());
    assert_eq!(outcome.value.area, "Customer Service");
    assert_eq!(outcome.value.last_update.len(), 10);
    assert_eq!(kv.write_count(), 1);

    let fetched = get_item(&state, &outcome.value.id).await;
    assert_eq!(fetched, Some(outcome.value));
}

#[tokio::test]
async fn test_add_rejects_bad_input() {
    let (kv, state) = setup().await;

    let err = add_item(&state, None, form("IT & Digital", "Website/App", "Hijau", "15/01/2025"))
        .await
        .unwrap_err();
    assert!(err.contains("15/01/2025"));

    assert!(add_item(&state, None, form("IT & Digital", "", "Hijau", "2025-01-15")).await.is_err());
    assert!(add_item(&state, None, form("IT & Digital", "Website/App", "Blue", "2025-01-15")).await.is_err());
    assert_eq!(kv.write_count(), 0);
}

#[tokio::test]
async fn test_save_failure_is_a_notice() {
    let kv = Arc::new(MemoryKvStore::with_quota(16));
    let state = AppState::with_backend(AppConfig::default(), kv.clone()).await;

    let outcome = add_item(&state, None, form("IT & Digital", "Website/App", "Hijau", "2025-01-15"))
        .await
        .unwrap();
    assert!(outcome.notice.is_some());
    assert!(get_item(&state, &outcome.value.id).await.is_some());
}

#[tokio::test]
async fn test_list_filters_one_area() {
    let (_kv, state) = setup().await;
    add_item(&state, None, form("Customer Service", "Komplain", "Merah", "2025-01-10")).await.unwrap();
    add_item(&state, None, form("Customer Service", "Response Time", "Hijau", "2025-02-10")).await.unwrap();

    let criteria = FilterCriteria {
        status: "Merah".to_string(),
        ..Default::default()
    };
    let view = list_items(&state, Some("Customer Service"), criteria).await.unwrap();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].sub_area, "Komplain");
    assert_eq!(view.stats.total, 1);

    let criteria = FilterCriteria {
        date_from: "2025-02-01".to_string(),
        ..Default::default()
    };
    let view = list_items(&state, Some("Customer Service"), criteria).await.unwrap();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].status, Status::Green);

    let criteria = FilterCriteria {
        date_to: "yesterday".to_string(),
        ..Default::default()
    };
    assert!(list_items(&state, Some("Customer Service"), criteria).await.is_err());
}

#[tokio::test]
async fn test_edit_moves_item() {
    let (_kv, state) = setup().await;
    let item = add_item(&state, None, form("Customer Service", "Komplain", "Merah", "2025-01-10"))
        .await
        .unwrap()
        .value;

    let mut fields = item.fields();
    fields.area = "Finance & Legal".to_string();
    fields.sub_area = "Pajak".to_string();
    let updated = edit_item(&state, &item.id, fields).await.unwrap().value.unwrap();

    assert_eq!(updated.id, item.id);
    let cs = list_items(&state, Some("Customer Service"), FilterCriteria::default()).await.unwrap();
    assert!(cs.items.is_empty());
    let fin = list_items(&state, Some("Finance & Legal"), FilterCriteria::default()).await.unwrap();
    assert_eq!(fin.items.last(), Some(&updated));
}

#[tokio::test]
async fn test_delete_needs_confirmation() {
    let (_kv, state) = setup().await;
    let item = add_item(&state, None, form("Customer Service", "Komplain", "Merah", "2025-01-10"))
        .await
        .unwrap()
        .value;

    let pending = request_delete(&state, Some("Customer Service"), &item.id).await;
    assert!(pending.prompt.contains(&item.id));
    assert!(get_item(&state, &item.id).await.is_some());

    assert!(cancel_action(&state, pending.token).await);
    assert!(get_item(&state, &item.id).await.is_some());

    let pending = request_delete(&state, Some("Customer Service"), &item.id).await;
    let outcome = confirm_action(&state, pending.token).await.unwrap();
    assert!(matches!(outcome.value, ConfirmedAction::Deleted { removed: true, .. }));
    assert!(get_item(&state, &item.id).await.is_none());
    assert!(confirm_action(&state, pending.token).await.is_err());
}

#[tokio::test]
async fn test_reset_needs_confirmation() {
    let (_kv, state) = setup().await;
    let before = get_dashboard(&state).await.overall.total;

    let pending = request_reset(&state, Some("Marketing & Sales")).await;
    assert!(pending.prompt.contains("Marketing & Sales"));
    let outcome = confirm_action(&state, pending.token).await.unwrap();

    let removed = match outcome.value {
        ConfirmedAction::Reset { removed, .. } => removed,
        other => panic!("unexpected action {:?}", other),
    };
    assert!(removed > 0);
    assert_eq!(get_dashboard(&state).await.overall.total, before - removed);
}

#[tokio::test]
async fn test_export_csv_of_empty_area_fails() {
    let (_kv, state) = setup().await;

    let err = export_area(&state, Some("Customer Service"), ExportFormat::Csv).await.unwrap_err();
    assert!(err.contains("Customer Service"));

    let json = export_area(&state, Some("Customer Service"), ExportFormat::Json).await.unwrap();
    assert_eq!(json.content.trim(), "[]");
    assert_eq!(json.file_name, "Customer_Service.json");
}

#[tokio::test]
async fn test_export_then_import_round_trip() {
    let (_kv, state) = setup().await;
    add_item(&state, None, form("Customer Service", "Komplain", "Merah", "2025-01-10")).await.unwrap();
    add_item(&state, None, form("Customer Service", "Response Time", "Hijau", "2025-02-10")).await.unwrap();

    let dir = tempdir().unwrap();
    let path = save_export(&state, Some("Customer Service"), ExportFormat::Json, dir.path())
        .await
        .unwrap();
    assert!(path.exists());

    let outcome = import_file(&state, Some("IT & Digital"), &path).await.unwrap();
    assert_eq!(outcome.value, 2);

    let it = list_items(&state, Some("IT & Digital"), FilterCriteria::default()).await.unwrap();
    assert_eq!(it.items.len(), 2);
    assert!(it.items.iter().all(|i| i.area == "IT & Digital"));
    assert_eq!(it.items[0].sub_area, "Komplain");

    let cs = list_items(&state, Some("Customer Service"), FilterCriteria::default()).await.unwrap();
    assert_eq!(cs.items.len(), 2);
    assert!(cs.items.iter().all(|i| it.items.iter().all(|j| j.id != i.id)));
}

#[tokio::test]
async fn test_csv_export_writes_file() {
    let (_kv, state) = setup().await;
    let dir = tempdir().unwrap();

    let path = save_export(&state, Some("Finance & Legal"), ExportFormat::Csv, dir.path())
        .await
        .unwrap();
    assert_eq!(path.file_name().unwrap(), "Finance_&_Legal.csv");

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("Area,Sub Area,"));
    assert_eq!(content.lines().count(), 2);
}

#[tokio::test]
async fn test_import_rejects_bad_files() {
    let (kv, state) = setup().await;
    let dir = tempdir().unwrap();

    let txt = dir.path().join("data.txt");
    std::fs::write(&txt, "[]").unwrap();
    assert!(import_file(&state, None, &txt).await.is_err());

    let missing = dir.path().join("missing.json");
    assert!(import_file(&state, None, &missing).await.is_err());

    let err = import_json(&state, Some("Finance & Legal"), r#"{"area": "x"}"#).await.unwrap_err();
    assert!(err.starts_with("Import failed"));

    let batch = r#"[{"area":"x","subArea":"Pajak","status":"Hijau"},{"area":"x","subArea":"Pajak"}]"#;
    let err = import_json(&state, Some("Finance & Legal"), batch).await.unwrap_err();
    assert!(err.contains("item 2"));

    let fin = list_items(&state, Some("Finance & Legal"), FilterCriteria::default()).await.unwrap();
    assert_eq!(fin.items.len(), 1);
    assert_eq!(kv.write_count(), 0);
}

#[tokio::test]
async fn test_edit_keeps_imported_legacy_date() {
    let (_kv, state) = setup().await;
    let batch = r#"[{"area":"x","subArea":"Pajak","status":"Hijau","lastUpdate":"15/01/2025"}]"#;
    import_json(&state, Some("Finance & Legal"), batch).await.unwrap();
    let item = list_items(&state, Some("Finance & Legal"), FilterCriteria::default())
        .await
        .unwrap()
        .items
        .remove(0);
    assert_eq!(item.last_update, "15/01/2025");

    let mut fields = item.fields();
    fields.status = "Merah".to_string();
    let updated = edit_item(&state, &item.id, fields).await.unwrap().value.unwrap();
    assert_eq!(updated.status, Status::Red);
    assert_eq!(updated.last_update, "15/01/2025");

    let mut fields = updated.fields();
    fields.last_update = "16/01/2025".to_string();
    let err = edit_item(&state, &item.id, fields).await.unwrap_err();
    assert!(err.contains("expected YYYY-MM-DD"));
}

#[tokio::test]
async fn test_import_accepts_blank_sub_area() {
    let (_kv, state) = setup().await;
    let batch = r#"[{"area":"x","subArea":" ","status":"Hijau"}]"#;
    let outcome = import_json(&state, Some("Customer Service"), batch).await.unwrap();
    assert_eq!(outcome.value, 1);

    let cs = list_items(&state, Some("Customer Service"), FilterCriteria::default()).await.unwrap();
    assert_eq!(cs.items.len(), 1);
    assert_eq!(cs.items[0].sub_area, " ");
}

#[tokio::test]
async fn test_abandoned_requests_do_not_pile_up() {
    let (_kv, state) = setup().await;
    let first = request_reset(&state, Some("Finance & Legal")).await;
    let second = request_reset(&state, Some("Finance & Legal")).await;
    assert_eq!(state.store.lock().await.pending().len(), 1);

    assert!(confirm_action(&state, first.token).await.is_err());
    let outcome = confirm_action(&state, second.token).await.unwrap();
    assert!(matches!(outcome.value, ConfirmedAction::Reset { removed: 1, .. }));
    assert!(state.store.lock().await.pending().is_empty());
}
