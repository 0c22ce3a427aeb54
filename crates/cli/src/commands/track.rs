//! Tracking-snippet commands.
//!
//! `track purchase` stands in for the JavaScript snippet a store installs on
//! its checkout page; `track status` is the dashboard's "test connection".

use chrono::Utc;
use leaderboard_core::{OrderId, StoreId};
use leaderboard_storage::DataStore;
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::CommandError;
use crate::format;

/// Report a purchase as the tracking snippet would.
///
/// # Errors
///
/// Returns an error if the API key is blank or matches no store.
pub fn purchase(
    store: &mut DataStore,
    api_key: &str,
    order_id: OrderId,
    amount: Decimal,
    url: Option<String>,
) -> Result<(), CommandError> {
    let tx = store.track_purchase(api_key, order_id, amount, Utc::now(), url)?;
    info!(
        "Purchase {} recorded for store {}: {}",
        tx.order_id,
        tx.store_id,
        format::points(tx.normalized_revenue)
    );
    Ok(())
}

/// Check whether the snippet has reported anything for a store.
///
/// # Errors
///
/// Returns [`CommandError::UnknownStore`] for an unknown id.
pub fn status(store: &DataStore, id: &StoreId) -> Result<(), CommandError> {
    if store.store_by_id(id).is_none() {
        return Err(CommandError::UnknownStore(id.clone()));
    }

    if store.connection_detected(id) {
        let last = store
            .tracking_log()
            .iter()
            .rev()
            .find(|event| event.api_key == id.as_str());
        if let Some(event) = last {
            info!(
                "Connection detected: last {} event at {}",
                event.event_type,
                event.timestamp.to_rfc3339()
            );
        }
    } else {
        warn!("No tracking events received for store {id} yet");
    }
    Ok(())
}
