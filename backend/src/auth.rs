//! Sign-in collaborator
//!
//! The dashboard has no real access control; the front end only needs a
//! session carrying the user name it displays.

use serde::Serialize;

use crate::config::Credentials;
use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub current_user: String,
    pub signed_in_at: String,
}

pub trait Authenticator: Send + Sync {
    fn authenticate(&self, username: &str, password: &str) -> DomainResult<Session>;
}

/// Checks against the credential pair from configuration
pub struct ConfiguredCredentials {
    credentials: Credentials,
}

impl ConfiguredCredentials {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl Authenticator for ConfiguredCredentials {
    fn authenticate(&self, username: &str, password: &str) -> DomainResult<Session> {
        if username != self.credentials.username || password != self.credentials.password {
            return Err(DomainError::Unauthorized(
                "wrong username or password".to_string(),
            ));
        }
        Ok(Session {
            current_user: username.to_string(),
            signed_in_at: chrono::Local::now().to_rfc3339(),
        })
    }
}
