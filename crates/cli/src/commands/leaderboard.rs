//! Leaderboard and summary views.

use chrono::Utc;
use leaderboard_core::{LeaderboardSource, PODIUM_SIZE, RankedStore, SortKey};
use leaderboard_storage::DataStore;
use tracing::info;

use crate::format;

const MEDALS: [&str; PODIUM_SIZE] = ["Gold", "Silver", "Bronze"];

fn podium_line(medal: &str, entry: Option<&RankedStore>) -> String {
    entry.map_or_else(
        || format!("{medal:<7} Your store here   0 pts"),
        |r| {
            format!(
                "{medal:<7} {} ({})  {}",
                r.store.name,
                r.store.display_url(),
                format::points(r.stats.total_revenue)
            )
        },
    )
}

/// Print the podium and the ranked table under `sort_key`.
pub fn show(store: &DataStore, sort_key: SortKey) {
    let standings = store.standings(sort_key, Utc::now());
    info!("Leaderboard (sorted by {sort_key})");

    for (medal, entry) in MEDALS.iter().zip(&standings.podium) {
        info!("{}", podium_line(medal, entry.as_ref()));
    }

    if standings.table.is_empty() {
        return;
    }
    info!(
        "{:>4}  {:<24} {:>8} {:>18} {:>10}",
        "#", "Store", "Orders", "Performance", "Growth"
    );
    for row in &standings.table {
        info!(
            "{:>4}  {:<24} {:>8} {:>18} {:>10}",
            row.rank,
            row.entry.store.name,
            format::count(row.entry.stats.total_orders),
            format::points(row.entry.stats.total_revenue),
            format::growth_badge(row.entry.growth_percent)
        );
    }
}

/// Print the header counters and the monthly revenue chart.
pub fn summary(store: &DataStore) {
    let totals = store.summary();
    info!("Stores: {}", format::count(totals.total_stores));
    info!("Orders: {}", format::count(totals.total_orders));

    let chart = store.monthly_revenue();
    info!("Monthly revenue (axis max {})", format::points(chart.axis_max));
    for (month, revenue) in chart.iter() {
        info!("  {month}  {}", format::points(revenue));
    }
}
