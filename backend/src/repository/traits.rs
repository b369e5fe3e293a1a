//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for the persistent key-value backend.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use crate::domain::DomainResult;

/// Whole-value key-value storage
///
/// Values are read and written wholesale; there is no partial update.
/// All operations are async to support various backends.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// Backend failures are reported as `DomainError::PersistenceRead`.
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// Backend failures are reported as `DomainError::PersistenceWrite`.
    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Remove `key`; absent keys are not an error
    async fn remove(&self, key: &str) -> DomainResult<()>;
}
