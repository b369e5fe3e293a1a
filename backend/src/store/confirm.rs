//! Pending confirmations
//!
//! Destructive operations are requested first and performed only when the
//! returned token is confirmed. Dropping or cancelling a token changes nothing.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationToken(u64);

impl fmt::Display for ConfirmationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "confirm-{}", self.0)
    }
}

/// What a token will do once confirmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PendingAction {
    Delete { id: String, area: String },
    Reset { area: String },
}

impl PendingAction {
    /// Question shown to the user before confirming
    pub fn prompt(&self) -> String {
        match self {
            PendingAction::Delete { id, .. } => format!("Delete item {}?", id),
            PendingAction::Reset { area } => format!("Delete all data in area {}?", area),
        }
    }
}

#[derive(Debug, Default)]
pub struct PendingConfirmations {
    next: u64,
    pending: HashMap<ConfirmationToken, PendingAction>,
}

impl PendingConfirmations {
    /// Issue a token for `action`, replacing any earlier token for the same action
    pub fn request(&mut self, action: PendingAction) -> ConfirmationToken {
        self.pending.retain(|_, existing| *existing != action);
        self.next += 1;
        let token = ConfirmationToken(self.next);
        self.pending.insert(token, action);
        token
    }

    pub fn get(&self, token: ConfirmationToken) -> Option<&PendingAction> {
        self.pending.get(&token)
    }

    /// Remove and return the action; a token can be used once
    pub fn take(&mut self, token: ConfirmationToken) -> Option<PendingAction> {
        self.pending.remove(&token)
    }

    pub fn cancel(&mut self, token: ConfirmationToken) -> bool {
        self.pending.remove(&token).is_some()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
