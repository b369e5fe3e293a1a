//! Snapshot and mutation operations
//!
//! A snapshot maps area keys to their ordered items. Every mutation takes the
//! current snapshot by reference and returns a new one; the caller commits it.

use std::collections::HashSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::area::AreaTaxonomy;
use super::entity::{DomainError, DomainResult};
use super::item::{ItemFields, MonitoringItem};
use super::raw_item::RawItem;

/// Source of fresh item ids
pub trait IdSource {
    /// Produce an id not present in `snapshot`
    fn generate_id(&mut self, snapshot: &Snapshot) -> String;
}

/// Area key -> items, in display order
///
/// Stored as a JSON object; key order is kept on both read and write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    areas: Vec<(String, Vec<MonitoringItem>)>,
}

impl Snapshot {
    /// Every configured area mapped to an empty sequence
    pub fn empty_for(taxonomy: &AreaTaxonomy) -> Self {
        let areas = taxonomy.keys().map(|k| (k.to_string(), Vec::new())).collect();
        Self { areas }
    }

    pub fn area_keys(&self) -> impl Iterator<Item = &str> {
        self.areas.iter().map(|(key, _)| key.as_str())
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    pub fn has_area(&self, area: &str) -> bool {
        self.position(area).is_some()
    }

    /// Items of one area; empty for unknown areas
    pub fn items(&self, area: &str) -> &[MonitoringItem] {
        self.position(area)
            .map(|i| self.areas[i].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MonitoringItem])> {
        self.areas.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// All items, area by area
    pub fn all_items(&self) -> impl Iterator<Item = &MonitoringItem> {
        self.areas.iter().flat_map(|(_, items)| items)
    }

    pub fn len(&self) -> usize {
        self.areas.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.all_items().any(|item| item.id == id)
    }

    pub fn ids(&self) -> HashSet<&str> {
        self.all_items().map(|item| item.id.as_str()).collect()
    }

    /// Locate an item anywhere in the snapshot
    pub fn find(&self, id: &str) -> Option<(&str, usize, &MonitoringItem)> {
        self.areas.iter().find_map(|(area, items)| {
            items
                .iter()
                .position(|item| item.id == id)
                .map(|index| (area.as_str(), index, &items[index]))
        })
    }

    fn position(&self, area: &str) -> Option<usize> {
        self.areas.iter().position(|(key, _)| key == area)
    }

    fn area_mut(&mut self, area: &str) -> &mut Vec<MonitoringItem> {
        let index = match self.position(area) {
            Some(index) => index,
            None => {
                self.areas.push((area.to_string(), Vec::new()));
                self.areas.len() - 1
            }
        };
        &mut self.areas[index].1
    }

    /// Append to an area, creating it when absent
    pub(crate) fn push(&mut self, area: &str, item: MonitoringItem) {
        self.area_mut(area).push(item);
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.areas.len()))?;
        for (area, items) in &self.areas {
            map.serialize_entry(area, items)?;
        }
        map.end()
    }
}

struct SnapshotVisitor;

impl<'de> Visitor<'de> for SnapshotVisitor {
    type Value = Snapshot;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping area names to item arrays")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Snapshot, A::Error> {
        let mut snapshot = Snapshot::default();
        while let Some((area, items)) = access.next_entry::<String, Vec<MonitoringItem>>()? {
            // a repeated key replaces the earlier value in place
            *snapshot.area_mut(&area) = items;
        }
        Ok(snapshot)
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SnapshotVisitor)
    }
}

/// Add a new item to `target_area` under a fresh id
pub fn add_item(
    snapshot: &Snapshot,
    fields: ItemFields,
    target_area: &str,
    ids: &mut dyn IdSource,
) -> DomainResult<(Snapshot, MonitoringItem)> {
    let id = ids.generate_id(snapshot);
    let item = MonitoringItem::from_fields(id, fields)?;

    let mut next = snapshot.clone();
    next.push(target_area, item.clone());
    Ok((next, item))
}

/// Replace an item's fields, keeping its id
///
/// A changed area moves the item to the end of the new area. An unknown id
/// leaves the snapshot unchanged.
pub fn edit_item(snapshot: &Snapshot, id: &str, fields: ItemFields) -> DomainResult<Snapshot> {
    let Some((old_area, index, _)) = snapshot.find(id) else {
        log::debug!("edit of unknown item {} ignored", id);
        return Ok(snapshot.clone());
    };
    let updated = MonitoringItem::from_fields(id.to_string(), fields)?;
    let old_area = old_area.to_string();

    let mut next = snapshot.clone();
    if updated.area != old_area {
        next.area_mut(&old_area).remove(index);
        let new_area = updated.area.clone();
        next.push(&new_area, updated);
    } else {
        next.area_mut(&old_area)[index] = updated;
    }
    Ok(next)
}

/// Remove an item from one area; absent ids are ignored
pub fn delete_item(snapshot: &Snapshot, id: &str, area: &str) -> Snapshot {
    let mut next = snapshot.clone();
    if let Some(index) = next.position(area) {
        next.areas[index].1.retain(|item| item.id != id);
    }
    next
}

/// Empty one area's sequence
pub fn reset_area(snapshot: &Snapshot, area: &str) -> Snapshot {
    let mut next = snapshot.clone();
    next.area_mut(area).clear();
    next
}

/// Replace `target_area` with a validated import batch
///
/// All elements are validated before anything changes; one bad element
/// rejects the batch. Imported items get fresh ids, are forced into
/// `target_area` and default `lastUpdate` to `today`.
pub fn import_items(
    snapshot: &Snapshot,
    raw_items: &[RawItem],
    target_area: &str,
    today: &str,
    ids: &mut dyn IdSource,
) -> DomainResult<Snapshot> {
    let mut validated = Vec::with_capacity(raw_items.len());
    for (index, raw) in raw_items.iter().enumerate() {
        let fields = raw.validate().map_err(|e| match e {
            DomainError::Validation(reason) => {
                DomainError::Validation(format!("item {}: {}", index + 1, reason))
            }
            other => other,
        })?;
        validated.push(fields);
    }

    let mut next = snapshot.clone();
    next.area_mut(target_area).clear();
    for mut fields in validated {
        fields.area = target_area.to_string();
        if fields.last_update.is_empty() {
            fields.last_update = today.to_string();
        }
        let id = ids.generate_id(&next);
        let item = MonitoringItem::from_fields(id, fields)?;
        next.push(target_area, item);
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;
    use serde_json::json;

    /// Sequential ids for deterministic tests
    pub(crate) struct CountingIds(pub u32);

    impl IdSource for CountingIds {
        fn generate_id(&mut self, snapshot: &Snapshot) -> String {
            loop {
                self.0 += 1;
                let id = format!("id-{}", self.0);
                if !snapshot.contains_id(&id) {
                    return id;
                }
            }
        }
    }

    fn fields(area: &str, sub: &str, status: &str) -> ItemFields {
        ItemFields {
            area: area.to_string(),
            sub_area: sub.to_string(),
            indicator: format!("{} indicator", sub),
            status: status.to_string(),
            last_update: "2025-01-10".to_string(),
            pic: "Owner".to_string(),
            notes: String::new(),
        }
    }

    fn base() -> Snapshot {
        Snapshot::empty_for(&AreaTaxonomy)
    }

    #[test]
    fn test_empty_snapshot_has_all_areas() {
        let snap = base();
        assert_eq!(snap.area_count(), 7);
        assert!(snap.is_empty());
        assert_eq!(snap.area_keys().next(), Some("Strategic Management"));
    }

    #[test]
    fn test_add_assigns_distinct_ids() {
        let mut ids = CountingIds(0);
        let mut snap = base();
        for _ in 0..5 {
            let (next, _) = add_item(&snap, fields("Finance & Legal", "Pajak", "Hijau"), "Finance & Legal", &mut ids).unwrap();
            snap = next;
        }
        assert_eq!(snap.items("Finance & Legal").len(), 5);
        assert_eq!(snap.ids().len(), 5);
    }

    #[test]
    fn test_add_creates_missing_area() {
        let mut ids = CountingIds(0);
        let (snap, item) = add_item(&Snapshot::default(), fields("New Area", "X", "Merah"), "New Area", &mut ids).unwrap();
        assert_eq!(snap.items("New Area"), &[item]);
    }

    #[test]
    fn test_add_rejects_invalid_status() {
        let mut ids = CountingIds(0);
        let snap = base();
        let result = add_item(&snap, fields("Finance & Legal", "Pajak", "Blue"), "Finance & Legal", &mut ids);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_edit_in_place_keeps_position() {
        let mut ids = CountingIds(0);
        let (snap, first) = add_item(&base(), fields("IT & Digital", "Website/App", "Hijau"), "IT & Digital", &mut ids).unwrap();
        let (snap, _) = add_item(&snap, fields("IT & Digital", "Keamanan Data", "Hijau"), "IT & Digital", &mut ids).unwrap();

        let mut changed = first.fields();
        changed.status = "Merah".to_string();
        let snap = edit_item(&snap, &first.id, changed).unwrap();

        let items = snap.items("IT & Digital");
        assert_eq!(items[0].id, first.id);
        assert_eq!(items[0].status, Status::Red);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_edit_area_change_moves_to_end() {
        let mut ids = CountingIds(0);
        let (snap, moved) = add_item(&base(), fields("Customer Service", "Komplain", "Kuning"), "Customer Service", &mut ids).unwrap();
        let (snap, existing) = add_item(&snap, fields("Finance & Legal", "Pajak", "Hijau"), "Finance & Legal", &mut ids).unwrap();

        let mut changed = moved.fields();
        changed.area = "Finance & Legal".to_string();
        let snap = edit_item(&snap, &moved.id, changed).unwrap();

        assert!(snap.items("Customer Service").is_empty());
        let finance = snap.items("Finance & Legal");
        assert_eq!(finance.len(), 2);
        assert_eq!(finance[0].id, existing.id);
        assert_eq!(finance[1].id, moved.id);
        assert_eq!(finance[1].sub_area, moved.sub_area);
        assert_eq!(finance[1].indicator, moved.indicator);
        assert_eq!(finance[1].status, moved.status);
    }

    #[test]
    fn test_edit_unknown_id_is_noop() {
        let snap = base();
        let next = edit_item(&snap, "missing", fields("IT & Digital", "Website/App", "Hijau")).unwrap();
        assert_eq!(next, snap);
    }

    #[test]
    fn test_delete_and_reset() {
        let mut ids = CountingIds(0);
        let (snap, a) = add_item(&base(), fields("Marketing & Sales", "Penjualan", "Hijau"), "Marketing & Sales", &mut ids).unwrap();
        let (snap, _) = add_item(&snap, fields("Marketing & Sales", "Leads Masuk", "Merah"), "Marketing & Sales", &mut ids).unwrap();
        let (snap, _) = add_item(&snap, fields("IT & Digital", "Website/App", "Hijau"), "IT & Digital", &mut ids).unwrap();

        let after_delete = delete_item(&snap, &a.id, "Marketing & Sales");
        assert_eq!(after_delete.items("Marketing & Sales").len(), 1);
        assert_eq!(delete_item(&after_delete, &a.id, "Marketing & Sales"), after_delete);

        let after_reset = reset_area(&snap, "Marketing & Sales");
        assert!(after_reset.items("Marketing & Sales").is_empty());
        assert_eq!(after_reset.items("IT & Digital"), snap.items("IT & Digital"));
    }

    #[test]
    fn test_import_replaces_area_and_forces_area() {
        let mut ids = CountingIds(0);
        let (snap, _) = add_item(&base(), fields("Customer Service", "Komplain", "Hijau"), "Customer Service", &mut ids).unwrap();

        let raw = vec![
            RawItem::from_value(json!({"area": "Elsewhere", "subArea": "Komplain", "status": "Merah"})).unwrap(),
            RawItem::from_value(json!({"area": "X", "subArea": "Response Time", "status": "Hijau", "lastUpdate": "2025-03-01"})).unwrap(),
        ];
        let next = import_items(&snap, &raw, "Customer Service", "2025-06-30", &mut ids).unwrap();

        let items = next.items("Customer Service");
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.area == "Customer Service"));
        assert_eq!(items[0].last_update, "2025-06-30");
        assert_eq!(items[1].last_update, "2025-03-01");
        assert!(!next.has_area("Elsewhere"));
    }

    #[test]
    fn test_import_all_or_nothing() {
        let mut ids = CountingIds(0);
        let (snap, _) = add_item(&base(), fields("Customer Service", "Komplain", "Hijau"), "Customer Service", &mut ids).unwrap();

        let raw = vec![
            RawItem::from_value(json!({"area": "A", "subArea": "Komplain", "status": "Merah"})).unwrap(),
            RawItem::from_value(json!({"area": "A", "subArea": "Komplain"})).unwrap(),
        ];
        let err = import_items(&snap, &raw, "Customer Service", "2025-06-30", &mut ids).unwrap_err();
        assert_eq!(err, DomainError::Validation("item 2: status is required".to_string()));
    }

    #[test]
    fn test_json_keeps_area_order() {
        let text = r#"{"Zeta":[],"Alpha":[],"Zeta":[{"id":"1","area":"Zeta","subArea":"S","status":"Hijau"}]}"#;
        let snap: Snapshot = serde_json::from_str(text).unwrap();

        assert_eq!(snap.area_keys().collect::<Vec<_>>(), vec!["Zeta", "Alpha"]);
        assert_eq!(snap.items("Zeta").len(), 1);

        let written = serde_json::to_string(&snap).unwrap();
        assert!(written.starts_with(r#"{"Zeta":[{"#));
        assert!(serde_json::from_str::<Snapshot>("[]").is_err());
    }
}
