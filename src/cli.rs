//! Command-line definitions

use std::path::PathBuf;

use area_monitor_lib::config::BackendKind;
use area_monitor_lib::domain::Status;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "area-monitor")]
#[command(about = "Monitor business areas by indicator status", version)]
pub struct Cli {
    /// Directory holding the database, config.json and logs
    #[arg(long, global = true, env = "AREA_MONITOR_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true, value_parser = parse_backend)]
    pub backend: Option<BackendKind>,

    #[arg(long, global = true, env = "AREA_MONITOR_USER")]
    pub user: Option<String>,

    #[arg(long, global = true, env = "AREA_MONITOR_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Answer yes to confirmation prompts
    #[arg(long, short = 'y', global = true, default_value_t = false)]
    pub yes: bool,

    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List configured areas and their sub-areas
    Areas,
    /// Totals, per-area status and recent updates
    Dashboard,
    /// Show one area's items
    List {
        area: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Add an item
    Add(ItemArgs),
    /// Change an item; omitted fields keep their value
    Edit {
        id: String,
        #[command(flatten)]
        fields: ItemArgs,
    },
    /// Delete an item
    Delete { area: String, id: String },
    /// Delete every item in an area
    Reset { area: String },
    /// Write an area to a file
    Export {
        area: String,
        #[arg(long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Replace an area with the items of a JSON file
    Import { area: String, file: PathBuf },
    /// Show the most recent log lines
    Logs {
        #[arg(long, default_value_t = 50)]
        lines: usize,
    },
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Status label or green/yellow/red/all
    #[arg(long, value_parser = parse_status_filter)]
    pub status: Option<String>,
    /// Matches sub-area, indicator or PIC
    #[arg(long)]
    pub search: Option<String>,
    /// Earliest update date, YYYY-MM-DD
    #[arg(long)]
    pub from: Option<String>,
    /// Latest update date, YYYY-MM-DD
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ItemArgs {
    #[arg(long)]
    pub area: Option<String>,
    #[arg(long)]
    pub sub_area: Option<String>,
    #[arg(long)]
    pub indicator: Option<String>,
    #[arg(long, value_parser = parse_status)]
    pub status: Option<String>,
    /// YYYY-MM-DD; today when omitted
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub pic: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Json,
    Csv,
}

fn parse_backend(value: &str) -> Result<BackendKind, String> {
    value.parse()
}

/// Status labels plus their English names
pub fn parse_status(value: &str) -> Result<String, String> {
    let status = match value.trim().to_ascii_lowercase().as_str() {
        "green" => Status::Green,
        "yellow" => Status::Yellow,
        "red" => Status::Red,
        _ => value.trim().parse::<Status>().map_err(|e| e.to_string())?,
    };
    Ok(status.as_str().to_string())
}

fn parse_status_filter(value: &str) -> Result<String, String> {
    if value.trim().eq_ignore_ascii_case("all") {
        return Ok("all".to_string());
    }
    parse_status(value)
}
