//! Area Monitor command-line entry point

mod app;
mod cli;
mod context;
mod render;

use std::process::ExitCode;

use area_monitor_lib::config::{AppConfig, ConfigOverrides};
use area_monitor_lib::AppState;
use clap::Parser;

use cli::Cli;
use context::CliContext;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = rolling_logger::error(&e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let overrides = ConfigOverrides {
        data_dir: cli.data_dir.clone(),
        backend: cli.backend,
        ..Default::default()
    };
    let loaded = AppConfig::load(&overrides);

    if let Err(e) = area_monitor_lib::init_logging(&loaded.config) {
        eprintln!("warning: file logging disabled: {}", e);
    }
    for warning in &loaded.warnings {
        if rolling_logger::warn(warning).is_err() {
            eprintln!("warning: {}", warning);
        }
    }
    let _ = rolling_logger::info(&format!(
        "Starting with data dir {} ({:?} backend)",
        loaded.config.data_dir.display(),
        loaded.config.backend
    ));

    let state = AppState::init(loaded.config).await?;
    let ctx = CliContext::sign_in(state, cli.user, cli.password, cli.yes, cli.json)?;
    app::run(&ctx, cli.command).await
}
