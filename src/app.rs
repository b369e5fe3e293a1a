//! Subcommand dispatch

use std::path::Path;

use area_monitor_lib::commands::{self, CommandOutcome, PendingConfirmation};
use area_monitor_lib::domain::{FilterCriteria, ItemFields};
use area_monitor_lib::interchange::ExportFormat;
use area_monitor_lib::store::ConfirmedAction;

use crate::cli::{Command, FilterArgs, FormatArg, ItemArgs};
use crate::context::CliContext;
use crate::render;

pub async fn run(ctx: &CliContext, command: Command) -> Result<(), String> {
    match command {
        Command::Areas => {
            let areas = commands::get_areas(&ctx.state);
            emit(ctx, &areas, || render::areas(&areas))
        }
        Command::Dashboard => {
            let rollup = commands::get_dashboard(&ctx.state).await;
            emit(ctx, &rollup, || render::dashboard(&rollup, &ctx.session.current_user))
        }
        Command::List { area, filter } => {
            let view = commands::list_items(&ctx.state, Some(&area), criteria(filter)).await?;
            emit(ctx, &view, || render::area_view(&view))
        }
        Command::Add(args) => {
            let area = args.area.clone();
            let outcome = commands::add_item(&ctx.state, area.as_deref(), new_fields(args)).await?;
            report_notice(&outcome);
            emit(ctx, &outcome.value, || format!("Added {}", render::item(&outcome.value)))
        }
        Command::Edit { id, fields } => edit(ctx, &id, fields).await,
        Command::Delete { area, id } => {
            let pending = commands::request_delete(&ctx.state, Some(&area), &id).await;
            confirm(ctx, pending).await
        }
        Command::Reset { area } => {
            let pending = commands::request_reset(&ctx.state, Some(&area)).await;
            confirm(ctx, pending).await
        }
        Command::Export { area, format, out } => {
            let format = match format {
                FormatArg::Json => ExportFormat::Json,
                FormatArg::Csv => ExportFormat::Csv,
            };
            let path = commands::save_export(&ctx.state, Some(&area), format, &out).await?;
            println!("Exported {} to {}", area, path.display());
            Ok(())
        }
        Command::Import { area, file } => import(ctx, &area, &file).await,
        Command::Logs { lines } => show_logs(lines),
    }
}

fn emit<T, F>(ctx: &CliContext, value: &T, text: F) -> Result<(), String>
where
    T: serde::Serialize,
    F: FnOnce() -> String,
{
    if ctx.json {
        println!("{}", render::to_json(value)?);
    } else {
        println!("{}", text().trim_end());
    }
    Ok(())
}

fn report_notice<T>(outcome: &CommandOutcome<T>) {
    if let Some(notice) = &outcome.notice {
        eprintln!("warning: change applied but not saved: {}", notice);
    }
}

fn criteria(filter: FilterArgs) -> FilterCriteria {
    FilterCriteria {
        status: filter.status.unwrap_or_default(),
        search: filter.search.unwrap_or_default(),
        date_from: filter.from.unwrap_or_default(),
        date_to: filter.to.unwrap_or_default(),
    }
}

fn new_fields(args: ItemArgs) -> ItemFields {
    ItemFields {
        area: args.area.unwrap_or_default(),
        sub_area: args.sub_area.unwrap_or_default(),
        indicator: args.indicator.unwrap_or_default(),
        status: args.status.unwrap_or_default(),
        last_update: args.date.unwrap_or_default(),
        pic: args.pic.unwrap_or_default(),
        notes: args.notes.unwrap_or_default(),
    }
}

/// Overlay the given flags on an item's current values
fn merge_fields(mut fields: ItemFields, args: ItemArgs) -> ItemFields {
    if let Some(area) = args.area {
        fields.area = area;
    }
    if let Some(sub_area) = args.sub_area {
        fields.sub_area = sub_area;
    }
    if let Some(indicator) = args.indicator {
        fields.indicator = indicator;
    }
    if let Some(status) = args.status {
        fields.status = status;
    }
    if let Some(date) = args.date {
        fields.last_update = date;
    }
    if let Some(pic) = args.pic {
        fields.pic = pic;
    }
    if let Some(notes) = args.notes {
        fields.notes = notes;
    }
    fields
}

async fn edit(ctx: &CliContext, id: &str, args: ItemArgs) -> Result<(), String> {
    let current = commands::get_item(&ctx.state, id)
        .await
        .ok_or_else(|| format!("No item with id {}", id))?;

    let outcome = commands::edit_item(&ctx.state, id, merge_fields(current.fields(), args)).await?;
    report_notice(&outcome);
    match &outcome.value {
        Some(item) => emit(ctx, item, || format!("Updated {}", render::item(item))),
        None => Err(format!("Item {} disappeared before it could be updated", id)),
    }
}

async fn confirm(ctx: &CliContext, pending: PendingConfirmation) -> Result<(), String> {
    if !ctx.confirm(&pending.prompt)? {
        commands::cancel_action(&ctx.state, pending.token).await;
        println!("Cancelled");
        return Ok(());
    }

    let outcome = commands::confirm_action(&ctx.state, pending.token).await?;
    report_notice(&outcome);
    emit(ctx, &outcome.value, || match &outcome.value {
        ConfirmedAction::Deleted { id, removed: true, .. } => format!("Deleted {}", id),
        ConfirmedAction::Deleted { id, area, removed: false } => {
            format!("No item {} in {}", id, area)
        }
        ConfirmedAction::Reset { area, removed } => {
            format!("Removed {} items from {}", removed, area)
        }
    })
}

async fn import(ctx: &CliContext, area: &str, file: &Path) -> Result<(), String> {
    let existing = commands::list_items(&ctx.state, Some(area), FilterCriteria::default())
        .await?
        .items
        .len();
    if existing > 0 {
        let prompt = format!("Replace the {} items in {}?", existing, area);
        if !ctx.confirm(&prompt)? {
            println!("Cancelled");
            return Ok(());
        }
    }

    let outcome = commands::import_file(&ctx.state, Some(area), file).await?;
    report_notice(&outcome);
    emit(ctx, &outcome.value, || {
        format!("Imported {} items into {}", outcome.value, area)
    })
}

fn show_logs(lines: usize) -> Result<(), String> {
    if rolling_logger::log_file_path().is_none() {
        return Err("Logging is not initialized".to_string());
    }
    let recent = rolling_logger::recent_lines();
    for line in last_lines(&recent, lines) {
        println!("{}", line);
    }
    Ok(())
}

fn last_lines(lines: &[String], count: usize) -> &[String] {
    &lines[lines.len().saturating_sub(count)..]
}
