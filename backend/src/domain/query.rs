//! Query and aggregation
//!
//! Filtering for the per-area table and statistic rollups for the dashboard.
//! Everything here is recomputed from a snapshot on demand and never stored.

use serde::{Deserialize, Serialize};

use super::item::{MonitoringItem, Status};
use super::snapshot::Snapshot;

/// Number of entries in the dashboard's recent updates list
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Table filter; empty strings disable a criterion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// A status label, or `""` / `"all"`
    pub status: String,
    /// Case-insensitive substring of subArea, indicator or pic
    pub search: String,
    /// Inclusive lower bound on lastUpdate
    pub date_from: String,
    /// Inclusive upper bound on lastUpdate
    pub date_to: String,
}

impl FilterCriteria {
    pub fn matches(&self, item: &MonitoringItem) -> bool {
        if !self.status.is_empty() && self.status != "all" && item.status.as_str() != self.status {
            return false;
        }
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let hit = [&item.sub_area, &item.indicator, &item.pic]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if !self.date_from.is_empty() && item.last_update.as_str() < self.date_from.as_str() {
            return false;
        }
        if !self.date_to.is_empty() && item.last_update.as_str() > self.date_to.as_str() {
            return false;
        }
        true
    }
}

/// Items passing every criterion, in their original order
pub fn filter(items: &[MonitoringItem], criteria: &FilterCriteria) -> Vec<MonitoringItem> {
    items.iter().filter(|item| criteria.matches(item)).cloned().collect()
}

/// Counts and rounded percentages per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiStats {
    pub total: usize,
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
    pub green_percent: u32,
    pub yellow_percent: u32,
    pub red_percent: u32,
}

impl KpiStats {
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Green => self.green,
            Status::Yellow => self.yellow,
            Status::Red => self.red,
        }
    }

    pub fn percent(&self, status: Status) -> u32 {
        match status {
            Status::Green => self.green_percent,
            Status::Yellow => self.yellow_percent,
            Status::Red => self.red_percent,
        }
    }
}

fn percent_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

/// Aggregate any collection of items
pub fn aggregate<'a, I>(items: I) -> KpiStats
where
    I: IntoIterator<Item = &'a MonitoringItem>,
{
    let mut stats = KpiStats::default();
    for item in items {
        stats.total += 1;
        match item.status {
            Status::Green => stats.green += 1,
            Status::Yellow => stats.yellow += 1,
            Status::Red => stats.red += 1,
        }
    }
    stats.green_percent = percent_of(stats.green, stats.total);
    stats.yellow_percent = percent_of(stats.yellow, stats.total);
    stats.red_percent = percent_of(stats.red, stats.total);
    stats
}

/// Filtered table rows with the header numbers for that selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaView {
    pub area: String,
    pub items: Vec<MonitoringItem>,
    pub stats: KpiStats,
}

pub fn area_view(snapshot: &Snapshot, area: &str, criteria: &FilterCriteria) -> AreaView {
    let items = filter(snapshot.items(area), criteria);
    let stats = aggregate(&items);
    AreaView {
        area: area.to_string(),
        items,
        stats,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSummary {
    pub area: String,
    pub stats: KpiStats,
}

/// Cross-area dashboard numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRollup {
    pub overall: KpiStats,
    pub total_areas: usize,
    pub per_area: Vec<AreaSummary>,
    pub recent_updates: Vec<MonitoringItem>,
}

pub fn rollup(snapshot: &Snapshot, recent_limit: usize) -> DashboardRollup {
    let per_area = snapshot
        .iter()
        .map(|(area, items)| AreaSummary {
            area: area.to_string(),
            stats: aggregate(items),
        })
        .collect();

    DashboardRollup {
        overall: aggregate(snapshot.all_items()),
        total_areas: snapshot.area_count(),
        per_area,
        recent_updates: recent_updates(snapshot, recent_limit),
    }
}

/// Dated items across all areas, newest first
///
/// The sort is stable, so equal dates keep store order.
pub fn recent_updates(snapshot: &Snapshot, limit: usize) -> Vec<MonitoringItem> {
    let mut dated: Vec<&MonitoringItem> = snapshot
        .all_items()
        .filter(|item| !item.last_update.is_empty())
        .collect();
    dated.sort_by(|a, b| b.last_update.cmp(&a.last_update));
    dated.into_iter().take(limit).cloned().collect()
}
