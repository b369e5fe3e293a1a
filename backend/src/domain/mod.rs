//! Domain Layer
//!
//! Contains all domain entities, the snapshot mutations and the query engine.
//! Nothing here performs I/O.

mod entity;
mod item;
mod area;
mod raw_item;
pub mod snapshot;
pub mod query;

pub use entity::{DomainError, DomainResult};
pub use item::{ItemFields, MonitoringItem, Status};
pub use area::{AreaConfig, AreaTaxonomy};
pub use raw_item::RawItem;
pub use snapshot::{IdSource, Snapshot};
pub use query::{AreaSummary, AreaView, DashboardRollup, FilterCriteria, KpiStats};
