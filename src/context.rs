//! Session Context
//!
//! What every subcommand needs: the loaded state, the signed-in session and
//! the global flags.

use std::io::{self, BufRead, Write};

use area_monitor_lib::auth::Session;
use area_monitor_lib::commands;
use area_monitor_lib::AppState;

pub struct CliContext {
    pub state: AppState,
    pub session: Session,
    assume_yes: bool,
    pub json: bool,
}

impl CliContext {
    /// Sign in with the given credentials, asking for whichever is missing
    pub fn sign_in(
        state: AppState,
        user: Option<String>,
        password: Option<String>,
        assume_yes: bool,
        json: bool,
    ) -> Result<Self, String> {
        let user = match user {
            Some(user) => user,
            None => ask("Username: ")?,
        };
        let password = match password {
            Some(password) => password,
            None => ask("Password: ")?,
        };
        let session = commands::login(&state, &user, &password)?;
        Ok(Self {
            state,
            session,
            assume_yes,
            json,
        })
    }

    /// `y/N` prompt; `--yes` answers for the user
    pub fn confirm(&self, prompt: &str) -> Result<bool, String> {
        if self.assume_yes {
            return Ok(true);
        }
        let answer = ask(&format!("{} [y/N] ", prompt))?;
        Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

fn ask(prompt: &str) -> Result<String, String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", prompt).map_err(|e| e.to_string())?;
    stdout.flush().map_err(|e| e.to_string())?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| format!("Failed to read input: {}", e))?;
    Ok(line.trim().to_string())
}
