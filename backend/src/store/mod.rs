//! Monitor Store
//!
//! The single owned store for a session: the current snapshot, the
//! repository it is persisted through, and the id generator. Every mutation
//! swaps in a new snapshot and saves it before returning.

mod confirm;

use serde::Serialize;

use crate::domain::{
    snapshot, DomainError, DomainResult, ItemFields, MonitoringItem, RawItem, Snapshot,
};
use crate::repository::{IdGenerator, SnapshotRepository};

pub use confirm::{ConfirmationToken, PendingAction, PendingConfirmations};

/// Today's date as `YYYY-MM-DD`
pub fn today_string() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// A mutation that took effect in memory
///
/// `notice` carries a failed save; the in-memory state still stands.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied<T> {
    pub value: T,
    pub notice: Option<DomainError>,
}

/// What a confirmed token did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConfirmedAction {
    Deleted { id: String, area: String, removed: bool },
    Reset { area: String, removed: usize },
}

pub struct MonitorStore {
    snapshot: Snapshot,
    repo: SnapshotRepository,
    ids: IdGenerator,
    pending: PendingConfirmations,
}

impl MonitorStore {
    /// Load the persisted snapshot, seeding when there is none
    pub async fn open(repo: SnapshotRepository) -> Self {
        let mut ids = IdGenerator::new();
        let snapshot = repo.load(&mut ids, &today_string()).await;
        Self {
            snapshot,
            repo,
            ids,
            pending: PendingConfirmations::default(),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Copy of one area's items
    pub fn items(&self, area: &str) -> Vec<MonitoringItem> {
        self.snapshot.items(area).to_vec()
    }

    pub fn find(&self, id: &str) -> Option<MonitoringItem> {
        self.snapshot.find(id).map(|(_, _, item)| item.clone())
    }

    pub fn pending(&self) -> &PendingConfirmations {
        &self.pending
    }

    /// Swap in `next` and persist it; a failed save comes back as the notice
    pub async fn commit(&mut self, next: Snapshot) -> Option<DomainError> {
        self.snapshot = next;
        match self.repo.save(&self.snapshot).await {
            Ok(()) => None,
            Err(e) => {
                log::error!("Save to '{}' failed: {}", self.repo.storage_key(), e);
                Some(e)
            }
        }
    }

    async fn apply<T>(&mut self, next: Snapshot, value: T) -> Applied<T> {
        let notice = self.commit(next).await;
        Applied { value, notice }
    }

    pub async fn add(&mut self, fields: ItemFields, target_area: &str) -> DomainResult<Applied<MonitoringItem>> {
        let (next, item) = snapshot::add_item(&self.snapshot, fields, target_area, &mut self.ids)?;
        log::info!("Added item {} to '{}'", item.id, target_area);
        Ok(self.apply(next, item).await)
    }

    /// Edit an item; `None` when the id no longer exists
    pub async fn edit(&mut self, id: &str, fields: ItemFields) -> DomainResult<Applied<Option<MonitoringItem>>> {
        let next = snapshot::edit_item(&self.snapshot, id, fields)?;
        let updated = next.find(id).map(|(_, _, item)| item.clone());
        if updated.is_some() {
            log::info!("Updated item {}", id);
        }
        Ok(self.apply(next, updated).await)
    }

    /// Delete unconditionally; the value tells whether anything was removed
    pub async fn delete(&mut self, id: &str, area: &str) -> Applied<bool> {
        let before = self.snapshot.items(area).len();
        let next = snapshot::delete_item(&self.snapshot, id, area);
        let removed = next.items(area).len() < before;
        if removed {
            log::info!("Deleted item {} from '{}'", id, area);
        }
        self.apply(next, removed).await
    }

    /// Empty an area unconditionally; the value is the number of items removed
    pub async fn reset(&mut self, area: &str) -> Applied<usize> {
        let removed = self.snapshot.items(area).len();
        let next = snapshot::reset_area(&self.snapshot, area);
        log::info!("Reset area '{}' ({} items removed)", area, removed);
        self.apply(next, removed).await
    }

    /// Replace an area with an import batch; nothing changes unless every item is valid
    pub async fn import(&mut self, raw_items: &[RawItem], target_area: &str) -> DomainResult<Applied<usize>> {
        let next = snapshot::import_items(
            &self.snapshot,
            raw_items,
            target_area,
            &today_string(),
            &mut self.ids,
        )?;
        let replaced = self.snapshot.items(target_area).len();
        log::info!(
            "Imported {} items into '{}' (replaced {})",
            raw_items.len(),
            target_area,
            replaced
        );
        Ok(self.apply(next, raw_items.len()).await)
    }

    fn request(&mut self, action: PendingAction) -> ConfirmationToken {
        let token = self.pending.request(action);
        log::debug!("Confirmation {} requested ({} pending)", token, self.pending.len());
        token
    }

    pub fn request_delete(&mut self, id: &str, area: &str) -> ConfirmationToken {
        self.request(PendingAction::Delete {
            id: id.to_string(),
            area: area.to_string(),
        })
    }

    pub fn request_reset(&mut self, area: &str) -> ConfirmationToken {
        self.request(PendingAction::Reset {
            area: area.to_string(),
        })
    }

    /// Perform a previously requested action
    pub async fn confirm(&mut self, token: ConfirmationToken) -> DomainResult<Applied<ConfirmedAction>> {
        let action = self
            .pending
            .take(token)
            .ok_or_else(|| DomainError::NotFound(format!("no pending confirmation {}", token)))?;

        let applied = match action {
            PendingAction::Delete { id, area } => {
                let Applied { value: removed, notice } = self.delete(&id, &area).await;
                Applied {
                    value: ConfirmedAction::Deleted { id, area, removed },
                    notice,
                }
            }
            PendingAction::Reset { area } => {
                let Applied { value: removed, notice } = self.reset(&area).await;
                Applied {
                    value: ConfirmedAction::Reset { area, removed },
                    notice,
                }
            }
        };
        Ok(applied)
    }

    /// Drop a pending action without touching the store
    pub fn cancel(&mut self, token: ConfirmationToken) -> bool {
        let cancelled = self.pending.cancel(token);
        if cancelled {
            log::debug!("Confirmation {} cancelled", token);
        }
        cancelled
    }
}
