//! Commands Layer
//!
//! Handlers that bridge the front end to the store. Errors cross this
//! boundary as plain strings.

mod auth_cmd;
mod area_cmd;
mod item_cmd;
mod transfer_cmd;

#[cfg(test)]
mod tests;

use serde::Serialize;

use crate::domain::DomainError;
use crate::store::{Applied, ConfirmationToken};

pub use auth_cmd::*;
pub use area_cmd::*;
pub use item_cmd::*;
pub use transfer_cmd::*;

/// Result of a command that changed the store
///
/// `notice` is set when the change applied but could not be saved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutcome<T> {
    pub value: T,
    pub notice: Option<String>,
}

impl<T> From<Applied<T>> for CommandOutcome<T> {
    fn from(applied: Applied<T>) -> Self {
        Self {
            value: applied.value,
            notice: applied.notice.map(|e| e.to_string()),
        }
    }
}

/// A destructive action waiting for the user's answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingConfirmation {
    pub token: ConfirmationToken,
    pub prompt: String,
}

fn to_message(e: DomainError) -> String {
    e.to_string()
}
