//! Settings commands.

use leaderboard_core::{ExchangeRate, LeaderboardSource};
use leaderboard_storage::DataStore;
use tracing::info;

use super::CommandError;

/// Show the exchange rate, or replace it when `rate` is given.
///
/// A new rate only affects transactions recorded from now on.
///
/// # Errors
///
/// Returns an error if the settings document cannot be written.
pub fn rate(store: &mut DataStore, rate: Option<ExchangeRate>) -> Result<(), CommandError> {
    match rate {
        Some(rate) => {
            store.set_exchange_rate(rate)?;
            info!("Exchange rate set: 1 USD = {rate} DOP");
        }
        None => info!("Exchange rate: 1 USD = {} DOP", store.exchange_rate()),
    }
    Ok(())
}
