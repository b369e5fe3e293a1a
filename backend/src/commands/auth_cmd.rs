//! Sign-in command

use crate::auth::Session;
use crate::AppState;

use super::to_message;

/// Check credentials and open a session for the front end
pub fn login(state: &AppState, username: &str, password: &str) -> Result<Session, String> {
    let session = state
        .authenticator()
        .authenticate(username.trim(), password)
        .map_err(to_message)?;
    log::info!("User '{}' signed in", session.current_user);
    Ok(session)
}
