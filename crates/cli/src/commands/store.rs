//! Store registry commands.
//!
//! # Usage
//!
//! ```bash
//! # Register a store selling in US dollars
//! lb-cli store register --id 29311384 --name "Digital Gadgets DR" \
//!     --email contact@digitalgadgetsdr.com --url https://digitalgadgetsdr.com --currency USD
//!
//! # Mark it verified
//! lb-cli store update 29311384 --status verified
//!
//! # Dashboard view of one store
//! lb-cli store show 29311384
//! ```

use leaderboard_core::{
    CurrencyCode, Email, LeaderboardSource, NewStore, REPORTING_CURRENCY, StoreId, StoreUpdate,
    Transaction,
};
use leaderboard_storage::DataStore;
use tracing::info;

use super::CommandError;
use crate::format;

/// Number of transactions shown under "recent activity".
const RECENT_ACTIVITY: usize = 5;

/// Register a new store.
///
/// # Errors
///
/// Returns an error if the id or email is taken or a field is blank.
pub fn register(store: &mut DataStore, new: NewStore) -> Result<(), CommandError> {
    let created = store.register_store(new)?;
    info!(
        "Store registered: {} ({}), API key {}",
        created.name,
        created.display_url(),
        created.id
    );
    Ok(())
}

/// Fields accepted by `store update`.
pub struct UpdateArgs {
    pub name: Option<String>,
    pub url: Option<String>,
    pub email: Option<Email>,
    pub currency: Option<String>,
    pub status: Option<leaderboard_core::VerificationStatus>,
}

/// Apply an admin edit to a store.
///
/// # Errors
///
/// Returns an error if no field is given, the store is unknown or the new
/// email is taken.
pub fn update(store: &mut DataStore, id: &StoreId, args: UpdateArgs) -> Result<(), CommandError> {
    let update = StoreUpdate {
        name: args.name,
        url: args.url,
        email: args.email,
        currency: args.currency.as_deref().map(CurrencyCode::from),
        status: args.status,
    };
    if update.is_empty() {
        return Err(CommandError::EmptyUpdate);
    }

    let updated = store.update_store(id, update)?;
    info!(
        "Store {} updated: {} <{}> {} {} [{}]",
        updated.id,
        updated.name,
        updated.email,
        updated.display_url(),
        updated.currency,
        updated.status
    );
    Ok(())
}

/// Delete a store and its transactions.
///
/// # Errors
///
/// Returns an error if the store is unknown.
pub fn delete(store: &mut DataStore, id: &StoreId) -> Result<(), CommandError> {
    let removed = store.delete_store(id)?;
    info!("Store {id} deleted along with {removed} transaction(s)");
    Ok(())
}

/// List every registered store with its aggregates.
pub fn list(store: &DataStore) {
    let stores = store.all_stores();
    if stores.is_empty() {
        info!("No stores registered");
        return;
    }

    for s in stores.iter() {
        let stats = store.stats_for(&s.id);
        info!(
            "{:<10} {:<24} {:<32} {:<4} {:<10} {:>6} orders  {}",
            s.id.as_str(),
            s.name,
            s.email.as_str(),
            s.currency.code(),
            s.status.tag(),
            format::count(stats.total_orders),
            format::money(stats.total_revenue, &REPORTING_CURRENCY)
        );
    }
}

/// Dashboard view of one store: totals, rank and recent activity.
///
/// # Errors
///
/// Returns [`CommandError::UnknownStore`] for an unknown id.
pub fn show(store: &DataStore, id: &StoreId) -> Result<(), CommandError> {
    let s = store
        .store_by_id(id)
        .ok_or_else(|| CommandError::UnknownStore(id.clone()))?;
    let stats = store.stats_for(id);
    let position = store
        .position_of(id)
        .map_or_else(|| "-".to_owned(), |p| format!("#{p}"));

    info!("{} ({}) [{}]", s.name, s.display_url(), s.status);
    info!("  API key:          {}", s.id);
    info!("  Email:            {}", s.email);
    info!("  Currency:         {}", s.currency);
    info!("  Position:         {position}");
    info!("  Total orders:     {}", format::count(stats.total_orders));
    info!(
        "  Total revenue:    {}",
        format::money(stats.total_revenue, &REPORTING_CURRENCY)
    );
    info!(
        "  Avg order value:  {}",
        format::money(stats.avg_order_value, &REPORTING_CURRENCY)
    );
    info!(
        "  Tracking:         {}",
        if store.connection_detected(id) {
            "connected"
        } else {
            "no events received yet"
        }
    );

    let recent = store.recent_activity(id, RECENT_ACTIVITY);
    if recent.is_empty() {
        info!("  No recent activity");
    }
    for tx in recent {
        info!("  {}", activity_line(tx));
    }
    Ok(())
}

/// One "recent activity" row, with the revenue the order counted for.
fn activity_line(tx: &Transaction) -> String {
    format!(
        "{}  {:<20} {}",
        tx.date.format("%Y-%m-%d"),
        tx.order_id.as_str(),
        format::money(tx.normalized_revenue, &REPORTING_CURRENCY)
    )
}
