//! Snapshot Repository
//!
//! Reads and writes the whole snapshot as one JSON document under a single
//! storage key. Anything unreadable is treated as absent and replaced by
//! seed data.

use std::sync::Arc;

use crate::domain::{
    AreaTaxonomy, DomainError, DomainResult, IdSource, MonitoringItem, Snapshot, Status,
};
use super::traits::KeyValueStore;

/// Storage key used by default
pub const DEFAULT_STORAGE_KEY: &str = "monitoring_system_data";

/// Illustrative records inserted into a fresh store:
/// (area, sub-area, indicator, status, pic, notes)
const SEED_RECORDS: [(&str, &str, &str, Status, &str, &str); 5] = [
    (
        "Operations & Assets",
        "Aset Tetap",
        "Daftar aset & nilai buku ter-update",
        Status::Yellow,
        "Asset Admin",
        "Perlu stock opname Q3",
    ),
    (
        "Finance & Legal",
        "Cash Flow",
        "Arus kas positif 3 bulan",
        Status::Green,
        "Finance Lead",
        "Cash flow stabil",
    ),
    (
        "Marketing & Sales",
        "Leads Masuk",
        "Leads mingguan per channel",
        Status::Red,
        "Growth Manager",
        "IG Ads pause, perbaiki funnel",
    ),
    (
        "IT & Digital",
        "Keamanan Data",
        "Backup harian & uji restore",
        Status::Green,
        "IT Ops",
        "Backup otomatis jam 02.00",
    ),
    (
        "Strategic Management",
        "KPI Tahunan",
        "Progress KPI Q1 2025",
        Status::Yellow,
        "Strategic Lead",
        "75% dari target, perlu akselerasi",
    ),
];

pub struct SnapshotRepository {
    kv: Arc<dyn KeyValueStore>,
    storage_key: String,
    taxonomy: AreaTaxonomy,
}

impl SnapshotRepository {
    pub fn new(kv: Arc<dyn KeyValueStore>, storage_key: impl Into<String>) -> Self {
        Self {
            kv,
            storage_key: storage_key.into(),
            taxonomy: AreaTaxonomy,
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Read the persisted snapshot
    ///
    /// `Ok(None)` when nothing is stored; `PersistenceRead` when the stored
    /// value cannot be read or does not have the snapshot shape.
    pub async fn read(&self) -> DomainResult<Option<Snapshot>> {
        let Some(raw) = self.kv.get(&self.storage_key).await? else {
            return Ok(None);
        };
        serde_json::from_str::<Snapshot>(&raw)
            .map(Some)
            .map_err(|e| DomainError::PersistenceRead(e.to_string()))
    }

    /// Persisted snapshot, or seed data when absent or unreadable
    pub async fn load(&self, ids: &mut dyn IdSource, today: &str) -> Snapshot {
        match self.read().await {
            Ok(Some(snapshot)) => {
                log::info!(
                    "Loaded {} items in {} areas from '{}'",
                    snapshot.len(),
                    snapshot.area_count(),
                    self.storage_key
                );
                snapshot
            }
            Ok(None) => {
                log::info!("No stored data under '{}', using seed data", self.storage_key);
                self.seed(ids, today)
            }
            Err(e) => {
                log::warn!("{}; falling back to seed data", e);
                self.seed(ids, today)
            }
        }
    }

    /// Every configured area, empty, plus a few illustrative records
    pub fn seed(&self, ids: &mut dyn IdSource, today: &str) -> Snapshot {
        let mut snapshot = Snapshot::empty_for(&self.taxonomy);
        for (area, sub_area, indicator, status, pic, notes) in SEED_RECORDS {
            let item = MonitoringItem {
                id: ids.generate_id(&snapshot),
                area: area.to_string(),
                sub_area: sub_area.to_string(),
                indicator: indicator.to_string(),
                status,
                last_update: today.to_string(),
                pic: pic.to_string(),
                notes: notes.to_string(),
            };
            snapshot.push(area, item);
        }
        snapshot
    }

    /// Write the full snapshot
    pub async fn save(&self, snapshot: &Snapshot) -> DomainResult<()> {
        let json = serde_json::to_string(snapshot)
            .map_err(|e| DomainError::PersistenceWrite(e.to_string()))?;
        self.kv.set(&self.storage_key, &json).await
    }
}
