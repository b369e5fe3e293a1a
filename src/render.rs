//! Plain-text rendering of command results

use area_monitor_lib::domain::{
    AreaConfig, AreaView, DashboardRollup, KpiStats, MonitoringItem, Status,
};
use serde::Serialize;

pub fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| e.to_string())
}

pub fn areas(areas: &[AreaConfig]) -> String {
    let mut out = String::new();
    for area in areas {
        out.push_str(area.label);
        out.push('\n');
        for sub in area.subs {
            out.push_str("  - ");
            out.push_str(sub);
            out.push('\n');
        }
    }
    out
}

fn stats_line(stats: &KpiStats) -> String {
    let mut out = format!("{} items", stats.total);
    for status in Status::ALL {
        out.push_str(&format!(
            " | {} {} ({}%)",
            status.as_str(),
            stats.count(status),
            stats.percent(status)
        ));
    }
    out
}

pub fn dashboard(rollup: &DashboardRollup, user: &str) -> String {
    let mut out = format!("Signed in as {}\n\n", user);
    out.push_str(&format!("Areas: {}\n", rollup.total_areas));
    out.push_str(&format!("Overall: {}\n\n", stats_line(&rollup.overall)));

    let width = rollup
        .per_area
        .iter()
        .map(|a| a.area.chars().count())
        .max()
        .unwrap_or(0);
    for summary in &rollup.per_area {
        out.push_str(&format!(
            "{:<width$}  {:>3}  H {:>3}  K {:>3}  M {:>3}\n",
            summary.area,
            summary.stats.total,
            summary.stats.count(Status::Green),
            summary.stats.count(Status::Yellow),
            summary.stats.count(Status::Red),
            width = width
        ));
    }

    out.push_str("\nRecent updates\n");
    if rollup.recent_updates.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in &rollup.recent_updates {
        out.push_str(&format!(
            "  {}  {:<7} {} / {}: {}\n",
            item.last_update,
            item.status.as_str(),
            item.area,
            item.sub_area,
            item.indicator
        ));
    }
    out
}

const COLUMNS: [&str; 6] = ["ID", "Sub Area", "Indikator", "Status", "Update", "PIC"];

fn row(item: &MonitoringItem) -> [String; 6] {
    [
        item.id.clone(),
        item.sub_area.clone(),
        item.indicator.clone(),
        item.status.as_str().to_string(),
        item.last_update.clone(),
        item.pic.clone(),
    ]
}

fn table(items: &[MonitoringItem]) -> String {
    let rows: Vec<[String; 6]> = items.iter().map(row).collect();
    let mut widths = COLUMNS.map(|c| c.chars().count());
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let format_row = |cells: &[&str]| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = format_row(&COLUMNS[..]);
    out.push('\n');
    for r in &rows {
        let cells: Vec<&str> = r.iter().map(String::as_str).collect();
        out.push_str(&format_row(&cells[..]));
        out.push('\n');
    }
    out
}

pub fn area_view(view: &AreaView) -> String {
    let mut out = format!("{}\n{}\n\n", view.area, stats_line(&view.stats));
    if view.items.is_empty() {
        out.push_str("No items match.\n");
    } else {
        out.push_str(&table(&view.items));
    }
    out
}

pub fn item(item: &MonitoringItem) -> String {
    format!(
        "{} [{}] {} / {}: {} (PIC {}, {})",
        item.id,
        item.status.as_str(),
        item.area,
        item.sub_area,
        item.indicator,
        item.pic,
        item.last_update
    )
}
