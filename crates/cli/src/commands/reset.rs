//! Wipe all leaderboard data.

use leaderboard_core::LeaderboardSource;
use leaderboard_storage::DataStore;
use tracing::info;

use super::CommandError;

/// Delete every document and reseed.
///
/// # Errors
///
/// Returns an error if a document cannot be removed or rewritten.
pub fn run(store: &mut DataStore) -> Result<(), CommandError> {
    store.reset()?;
    info!(
        "Data reset: {} store(s), {} transaction(s)",
        store.all_stores().len(),
        store.all_transactions().len()
    );
    Ok(())
}
