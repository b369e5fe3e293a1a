//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod memory;
mod id_gen;
mod snapshot_repo;


pub use traits::KeyValueStore;
pub use db::SqliteKvStore;
pub use memory::MemoryKvStore;
pub use id_gen::IdGenerator;
pub use snapshot_repo::{SnapshotRepository, DEFAULT_STORAGE_KEY};
