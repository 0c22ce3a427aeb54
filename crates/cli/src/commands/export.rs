//! CSV export of every store with its aggregates.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::Utc;
use leaderboard_core::LeaderboardSource;
use tracing::info;

use super::CommandError;
use crate::format;

const HEADERS: [&str; 8] = [
    "Store ID",
    "Store Name",
    "Email",
    "Store URL",
    "Currency",
    "Status",
    "Total Orders",
    "Total Revenue (DOP)",
];

/// Render the export document, one row per store in registration order.
///
/// # Errors
///
/// Returns [`CommandError::NothingToExport`] when no store is registered.
pub fn to_csv(source: &impl LeaderboardSource) -> Result<String, CommandError> {
    let stores = source.all_stores();
    if stores.is_empty() {
        return Err(CommandError::NothingToExport);
    }

    let mut csv = HEADERS.join(",");
    csv.push('\n');
    for store in stores.iter() {
        let stats = source.stats_for(&store.id);
        // Writing to a String cannot fail.
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{},{},{}",
            store.id,
            format::csv_quoted(&store.name),
            store.email,
            store.url,
            store.currency,
            store.status,
            stats.total_orders,
            stats.total_revenue
        );
    }
    Ok(csv)
}

/// Default file name, stamped with today's date.
fn default_path() -> PathBuf {
    PathBuf::from(format!(
        "ecom-leaderboard-stores-{}.csv",
        Utc::now().format("%Y-%m-%d")
    ))
}

/// Write the export to `output`, or to a dated file in the working directory.
///
/// # Errors
///
/// Returns an error if there are no stores or the file cannot be written.
pub fn run(source: &impl LeaderboardSource, output: Option<&Path>) -> Result<(), CommandError> {
    let csv = to_csv(source)?;
    let path = output.map_or_else(default_path, Path::to_path_buf);
    std::fs::write(&path, csv)?;
    info!(path = %path.display(), "Stores exported");
    Ok(())
}
