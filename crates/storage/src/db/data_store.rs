//! The leaderboard repository.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use leaderboard_core::{
    ExchangeRate, LeaderboardSource, NewStore, NewTransaction, OrderId, Store, StoreId,
    StoreUpdate, Transaction,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::RepositoryError;
use super::documents::{self, SETTINGS, STORES, TRACKING, TRANSACTIONS};
use super::tracking::{TrackingEvent, push_capped};
use crate::config::StorageConfig;
use crate::seed;

/// Contents of `settings.json`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Settings {
    exchange_rate: ExchangeRate,
}

/// Stores, transactions, settings and the tracking log, loaded from a data
/// directory and written back whole on every change.
#[derive(Debug)]
pub struct DataStore {
    dir: PathBuf,
    seed_demo: bool,
    default_exchange_rate: ExchangeRate,
    stores: Vec<Store>,
    transactions: Vec<Transaction>,
    settings: Settings,
    tracking: Vec<TrackingEvent>,
    session_id: Uuid,
}

impl DataStore {
    /// Open (creating if needed) the data directory and load every document.
    ///
    /// An empty store collection is seeded with the demo data set when
    /// `config.seed_demo` is set. All documents are written back afterwards,
    /// so a fresh directory is fully initialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, a document is
    /// unreadable or corrupt, or the initial write fails.
    #[instrument(skip(config), fields(data_dir = %config.data_dir.display()))]
    pub fn open(config: &StorageConfig) -> Result<Self, RepositoryError> {
        std::fs::create_dir_all(&config.data_dir)?;
        let dir = config.data_dir.clone();

        let mut store = Self {
            stores: documents::read(&dir, STORES)?.unwrap_or_default(),
            transactions: documents::read(&dir, TRANSACTIONS)?.unwrap_or_default(),
            settings: documents::read(&dir, SETTINGS)?.unwrap_or(Settings {
                exchange_rate: config.default_exchange_rate,
            }),
            tracking: documents::read(&dir, TRACKING)?.unwrap_or_default(),
            dir,
            seed_demo: config.seed_demo,
            default_exchange_rate: config.default_exchange_rate,
            session_id: Uuid::new_v4(),
        };

        if store.stores.is_empty() && store.seed_demo {
            (store.stores, store.transactions) = Self::seed(store.settings.exchange_rate)?;
        }

        store.save()?;
        info!(
            stores = store.stores.len(),
            transactions = store.transactions.len(),
            "Data store opened"
        );
        Ok(store)
    }

    /// The directory the documents live in.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.dir
    }

    fn seed(rate: ExchangeRate) -> Result<(Vec<Store>, Vec<Transaction>), RepositoryError> {
        info!("Seeding demo data");
        seed::demo_dataset(&mut rand::rng(), Utc::now(), rate)
    }

    fn save(&self) -> Result<(), RepositoryError> {
        write_all(&self.dir, &self.stores, &self.transactions, &self.settings, &self.tracking)
    }

    // Each mutation builds the new collection, writes it, and only then
    // replaces the in-memory copy, so a failed write leaves both unchanged.

    fn commit_stores(&mut self, stores: Vec<Store>) -> Result<(), RepositoryError> {
        documents::write(&self.dir, STORES, &stores)?;
        self.stores = stores;
        Ok(())
    }

    fn commit_transactions(&mut self, transactions: Vec<Transaction>) -> Result<(), RepositoryError> {
        documents::write(&self.dir, TRANSACTIONS, &transactions)?;
        self.transactions = transactions;
        Ok(())
    }

    fn commit_settings(&mut self, settings: Settings) -> Result<(), RepositoryError> {
        documents::write(&self.dir, SETTINGS, &settings)?;
        self.settings = settings;
        Ok(())
    }

    fn commit_tracking(&mut self, tracking: Vec<TrackingEvent>) -> Result<(), RepositoryError> {
        documents::write(&self.dir, TRACKING, &tracking)?;
        self.tracking = tracking;
        Ok(())
    }

    /// Replace every document with a fresh state, reseeding the demo data
    /// when seeding is enabled. The exchange rate returns to its default.
    ///
    /// # Errors
    ///
    /// Returns an error if the demo data cannot be built or a document
    /// cannot be rewritten. The in-memory state is only replaced once every
    /// document has been written.
    pub fn reset(&mut self) -> Result<(), RepositoryError> {
        let settings = Settings {
            exchange_rate: self.default_exchange_rate,
        };
        let (stores, transactions) = if self.seed_demo {
            Self::seed(settings.exchange_rate)?
        } else {
            (Vec::new(), Vec::new())
        };
        let tracking = Vec::new();

        write_all(&self.dir, &stores, &transactions, &settings, &tracking)?;

        self.stores = stores;
        self.transactions = transactions;
        self.settings = settings;
        self.tracking = tracking;
        info!("Data reset");
        Ok(())
    }

    // =========================================================================
    // Stores
    // =========================================================================

    /// Look up a store by id.
    #[must_use]
    pub fn store_by_id(&self, id: &StoreId) -> Option<&Store> {
        self.stores.iter().find(|s| &s.id == id)
    }

    /// Look up a store by email, ignoring case.
    #[must_use]
    pub fn store_by_email(&self, email: &str) -> Option<&Store> {
        self.stores.iter().find(|s| s.email.matches(email))
    }

    /// Register a new, unverified store.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::Validation`] if the name or URL is blank
    /// - [`RepositoryError::Conflict`] if the id or email is already taken
    #[instrument(skip(self, new), fields(store_id = %new.id))]
    pub fn register_store(&mut self, new: NewStore) -> Result<Store, RepositoryError> {
        if new.name.trim().is_empty() {
            return Err(RepositoryError::Validation("store name is required".to_string()));
        }
        if new.url.trim().is_empty() {
            return Err(RepositoryError::Validation("store URL is required".to_string()));
        }
        if self.store_by_id(&new.id).is_some() {
            return Err(RepositoryError::Conflict(format!(
                "a store with id {} already exists",
                new.id
            )));
        }
        if self.store_by_email(new.email.as_str()).is_some() {
            return Err(RepositoryError::Conflict(format!(
                "a store with email {} already exists",
                new.email
            )));
        }
        if !new.currency.is_recognized() {
            warn!(currency = %new.currency, "Unrecognized currency, amounts will not be converted");
        }

        let store = Store::register(new, Utc::now());
        let mut stores = self.stores.clone();
        stores.push(store.clone());
        self.commit_stores(stores)?;
        info!("Store registered");
        Ok(store)
    }

    /// Apply an admin edit to a store.
    ///
    /// Existing transactions keep their normalized revenue even when the
    /// currency changes.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::NotFound`] for an unknown id
    /// - [`RepositoryError::Conflict`] if the new email belongs to another store
    #[instrument(skip(self, update))]
    pub fn update_store(
        &mut self,
        id: &StoreId,
        update: StoreUpdate,
    ) -> Result<Store, RepositoryError> {
        if let Some(email) = &update.email {
            if self
                .stores
                .iter()
                .any(|s| &s.id != id && s.email.eq_ignore_case(email))
            {
                return Err(RepositoryError::Conflict(format!(
                    "a store with email {email} already exists"
                )));
            }
        }

        let mut stores = self.stores.clone();
        let store = stores
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("store {id}")))?;
        store.apply(update);
        let updated = store.clone();

        self.commit_stores(stores)?;
        info!("Store updated");
        Ok(updated)
    }

    /// Delete a store and every transaction recorded for it.
    ///
    /// Returns the number of transactions removed.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] for an unknown id.
    #[instrument(skip(self))]
    pub fn delete_store(&mut self, id: &StoreId) -> Result<usize, RepositoryError> {
        if self.store_by_id(id).is_none() {
            return Err(RepositoryError::NotFound(format!("store {id}")));
        }

        let stores: Vec<Store> = self.stores.iter().filter(|s| &s.id != id).cloned().collect();
        let transactions: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|tx| &tx.store_id != id)
            .cloned()
            .collect();
        let removed = self.transactions.len() - transactions.len();

        documents::write(&self.dir, TRANSACTIONS, &transactions)?;
        if let Err(e) = documents::write(&self.dir, STORES, &stores) {
            // The store is still on disk; put its transactions back.
            if let Err(restore) = documents::write(&self.dir, TRANSACTIONS, &self.transactions) {
                error!(error = %restore, "Failed to restore transactions after a failed delete");
            }
            return Err(e);
        }

        self.stores = stores;
        self.transactions = transactions;
        info!(transactions_removed = removed, "Store deleted");
        Ok(removed)
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Record a purchase, normalizing it with the current exchange rate.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::NotFound`] if the store does not exist
    /// - [`RepositoryError::Validation`] if the amount is negative, above
    ///   [`MAX_ORDER_AMOUNT`](leaderboard_core::MAX_ORDER_AMOUNT) or cannot
    ///   be converted at the current rate
    #[instrument(skip(self, new), fields(store_id = %new.store_id, order_id = %new.order_id))]
    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<Transaction, RepositoryError> {
        let rate = self.settings.exchange_rate;
        let store = self
            .store_by_id(&new.store_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("store {}", new.store_id)))?;
        if !store.currency.is_recognized() {
            warn!(
                currency = %store.currency,
                "Unrecognized store currency, recording amount as reporting currency"
            );
        }

        let tx = Transaction::ingest(new, store, rate)
            .map_err(|e| RepositoryError::Validation(e.to_string()))?;
        let mut transactions = self.transactions.clone();
        transactions.push(tx.clone());
        self.commit_transactions(transactions)?;
        info!(normalized_revenue = %tx.normalized_revenue, "Transaction recorded");
        Ok(tx)
    }

    /// The `limit` most recent transactions of a store, newest first.
    #[must_use]
    pub fn recent_activity(&self, store_id: &StoreId, limit: usize) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .rev()
            .filter(|tx| &tx.store_id == store_id)
            .take(limit)
            .collect()
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Change the rate used for future ingestion. Already recorded
    /// transactions are not touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings document cannot be written.
    #[instrument(skip(self, rate), fields(rate = %rate))]
    pub fn set_exchange_rate(&mut self, rate: ExchangeRate) -> Result<(), RepositoryError> {
        self.commit_settings(Settings {
            exchange_rate: rate,
        })?;
        info!("Exchange rate updated");
        Ok(())
    }

    // =========================================================================
    // Tracking
    // =========================================================================

    /// Append an event to the tracking log.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::Validation`] if `api_key` is blank
    /// - an I/O error if the log cannot be written
    pub fn track(
        &mut self,
        api_key: &str,
        event_type: &str,
        event_data: serde_json::Value,
        url: Option<String>,
    ) -> Result<(), RepositoryError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(RepositoryError::Validation(
                "tracking API key is not set".to_string(),
            ));
        }

        let mut tracking = self.tracking.clone();
        push_capped(
            &mut tracking,
            TrackingEvent {
                api_key: api_key.to_string(),
                event_type: event_type.to_string(),
                event_data,
                session_id: self.session_id,
                url,
                timestamp: Utc::now(),
            },
        );
        self.commit_tracking(tracking)?;
        tracing::debug!(api_key, event_type, "Tracking event stored");
        Ok(())
    }

    /// Handle a purchase reported by the tracking snippet: ingest the order
    /// for the store whose id is the API key, then log the event.
    ///
    /// Nothing is kept unless both the transaction and the event are written.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::Validation`] if the API key is not a valid store id
    ///   or the amount is rejected
    /// - [`RepositoryError::NotFound`] if no store has that id
    pub fn track_purchase(
        &mut self,
        api_key: &str,
        order_id: OrderId,
        amount: Decimal,
        date: DateTime<Utc>,
        url: Option<String>,
    ) -> Result<Transaction, RepositoryError> {
        let store_id = StoreId::parse(api_key)
            .map_err(|_| RepositoryError::Validation("tracking API key is not set".to_string()))?;
        let currency = self
            .store_by_id(&store_id)
            .map(|s| s.currency.code().to_owned())
            .ok_or_else(|| RepositoryError::NotFound(format!("store {store_id}")))?;

        let event_data = serde_json::json!({
            "order_id": order_id,
            "total_value": amount,
            "currency": currency,
            "items": [],
        });

        let previous = self.transactions.clone();
        let tx = self.add_transaction(NewTransaction {
            store_id,
            order_id,
            amount,
            date,
        })?;

        if let Err(e) = self.track(tx.store_id.as_str(), "purchase", event_data, url) {
            if let Err(restore) = self.commit_transactions(previous) {
                error!(error = %restore, "Failed to roll back a tracked purchase");
            }
            return Err(e);
        }
        Ok(tx)
    }

    /// Whether the tracking snippet has reported any event for this store.
    #[must_use]
    pub fn connection_detected(&self, store_id: &StoreId) -> bool {
        self.tracking
            .iter()
            .any(|event| event.api_key == store_id.as_str())
    }

    /// The tracking log, oldest first.
    #[must_use]
    pub fn tracking_log(&self) -> &[TrackingEvent] {
        &self.tracking
    }
}

impl LeaderboardSource for DataStore {
    fn all_stores(&self) -> Cow<'_, [Store]> {
        Cow::Borrowed(&self.stores)
    }

    fn all_transactions(&self) -> Cow<'_, [Transaction]> {
        Cow::Borrowed(&self.transactions)
    }

    fn exchange_rate(&self) -> ExchangeRate {
        self.settings.exchange_rate
    }
}

fn write_all(
    dir: &Path,
    stores: &[Store],
    transactions: &[Transaction],
    settings: &Settings,
    tracking: &[TrackingEvent],
) -> Result<(), RepositoryError> {
    documents::write(dir, STORES, stores)?;
    documents::write(dir, TRANSACTIONS, transactions)?;
    documents::write(dir, SETTINGS, settings)?;
    documents::write(dir, TRACKING, tracking)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use leaderboard_core::{CurrencyCode, Email, SortKey, VerificationStatus};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    use super::*;

    fn empty_store() -> (TempDir, DataStore) {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: dir.path().to_path_buf(),
            seed_demo: false,
            default_exchange_rate: ExchangeRate::default(),
        };
        let store = DataStore::open(&config).unwrap();
        (dir, store)
    }

    fn new_store(id: &str, email: &str, currency: CurrencyCode) -> NewStore {
        NewStore {
            id: StoreId::parse(id).unwrap(),
            name: format!("Store {id}"),
            email: Email::parse(email).unwrap(),
            url: format!("https://{id}.example.com"),
            currency,
        }
    }

    fn purchase(store: &str, order: &str, amount: Decimal) -> NewTransaction {
        NewTransaction {
            store_id: StoreId::parse(store).unwrap(),
            order_id: OrderId::parse(order).unwrap(),
            amount,
            date: Utc::now(),
        }
    }

    #[test]
    fn test_open_seeds_demo_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::default().with_data_dir(dir.path());
        let store = DataStore::open(&config).unwrap();

        assert_eq!(store.all_stores().len(), 6);
        assert_eq!(
            store.all_transactions().len(),
            3 + seed::RANDOM_ORDERS
        );
        let standings = store.standings(SortKey::Performance, Utc::now());
        let podium: Vec<&str> = standings
            .podium_entries()
            .map(|r| r.store.name.as_str())
            .collect();
        assert_eq!(podium, ["Gold Store", "Silver Store", "Bronze Store"]);
        assert!(dir.path().join("stores.json").exists());
    }

    #[test]
    fn test_open_reloads_persisted_data() {
        let (dir, mut store) = empty_store();
        store
            .register_store(new_store("1", "a@example.com", CurrencyCode::Dop))
            .unwrap();
        store.add_transaction(purchase("1", "o-1", dec!(250))).unwrap();
        drop(store);

        let config = StorageConfig {
            data_dir: dir.path().to_path_buf(),
            seed_demo: true,
            default_exchange_rate: ExchangeRate::default(),
        };
        let reopened = DataStore::open(&config).unwrap();
        assert_eq!(reopened.all_stores().len(), 1);
        assert_eq!(
            reopened.stats_for(&StoreId::parse("1").unwrap()).total_revenue,
            dec!(250)
        );
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let (_dir, mut store) = empty_store();
        store
            .register_store(new_store("1", "Owner@Example.com", CurrencyCode::Dop))
            .unwrap();

        let same_id = store.register_store(new_store("1", "other@example.com", CurrencyCode::Dop));
        assert!(matches!(same_id, Err(RepositoryError::Conflict(_))));

        let same_email = store.register_store(new_store("2", "owner@example.com", CurrencyCode::Dop));
        assert!(matches!(same_email, Err(RepositoryError::Conflict(_))));
    }

    #[test]
    fn test_register_requires_name_and_url() {
        let (_dir, mut store) = empty_store();
        let mut new = new_store("1", "a@example.com", CurrencyCode::Dop);
        new.url = " ".to_string();
        assert!(matches!(
            store.register_store(new),
            Err(RepositoryError::Validation(_))
        ));
    }

    #[test]
    fn test_store_by_email_ignores_case() {
        let (_dir, mut store) = empty_store();
        store
            .register_store(new_store("1", "Ventas@ModaTropical.com", CurrencyCode::Dop))
            .unwrap();
        assert!(store.store_by_email("ventas@modatropical.com").is_some());
        assert!(store.store_by_email("nobody@modatropical.com").is_none());
    }

    #[test]
    fn test_update_store() {
        let (_dir, mut store) = empty_store();
        store
            .register_store(new_store("1", "a@example.com", CurrencyCode::Dop))
            .unwrap();
        store
            .register_store(new_store("2", "b@example.com", CurrencyCode::Dop))
            .unwrap();
        let id = StoreId::parse("1").unwrap();

        let updated = store
            .update_store(
                &id,
                StoreUpdate {
                    status: Some(VerificationStatus::Verified),
                    ..StoreUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, VerificationStatus::Verified);

        let taken = store.update_store(
            &id,
            StoreUpdate {
                email: Some(Email::parse("B@example.com").unwrap()),
                ..StoreUpdate::default()
            },
        );
        assert!(matches!(taken, Err(RepositoryError::Conflict(_))));

        let missing = store.update_store(&StoreId::parse("9").unwrap(), StoreUpdate::default());
        assert!(matches!(missing, Err(RepositoryError::NotFound(_))));
    }

    #[test]
    fn test_delete_cascades_to_own_transactions_only() {
        let (_dir, mut store) = empty_store();
        for (id, email) in [("1", "a@example.com"), ("2", "b@example.com")] {
            store
                .register_store(new_store(id, email, CurrencyCode::Dop))
                .unwrap();
        }
        store.add_transaction(purchase("1", "o-1", dec!(10))).unwrap();
        store.add_transaction(purchase("2", "o-2", dec!(20))).unwrap();
        store.add_transaction(purchase("1", "o-3", dec!(30))).unwrap();
        let other = StoreId::parse("2").unwrap();
        let before = store.stats_for(&other);

        let removed = store.delete_store(&StoreId::parse("1").unwrap()).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(store.all_transactions().len(), 1);
        assert_eq!(store.stats_for(&other), before);
        assert!(matches!(
            store.delete_store(&StoreId::parse("1").unwrap()),
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[test]
    fn test_rate_change_is_not_retroactive() {
        let (_dir, mut store) = empty_store();
        store
            .register_store(new_store("usd", "usd@example.com", CurrencyCode::Usd))
            .unwrap();
        store.add_transaction(purchase("usd", "o-1", dec!(100))).unwrap();
        store
            .set_exchange_rate(ExchangeRate::new(dec!(60)).unwrap())
            .unwrap();
        store.add_transaction(purchase("usd", "o-2", dec!(100))).unwrap();

        let txs = store.transactions_by_store(&StoreId::parse("usd").unwrap());
        assert_eq!(txs[0].normalized_revenue, dec!(5950));
        assert_eq!(txs[1].normalized_revenue, dec!(6000));
        assert_eq!(store.exchange_rate().value(), dec!(60));
    }

    #[test]
    fn test_add_transaction_for_unknown_store() {
        let (_dir, mut store) = empty_store();
        let result = store.add_transaction(purchase("ghost", "o-1", dec!(1)));
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
        assert!(store.all_transactions().is_empty());
    }

    #[test]
    fn test_recent_activity_is_newest_first() {
        let (_dir, mut store) = empty_store();
        store
            .register_store(new_store("1", "a@example.com", CurrencyCode::Dop))
            .unwrap();
        for n in 0..7 {
            store
                .add_transaction(purchase("1", &format!("o-{n}"), Decimal::from(n)))
                .unwrap();
        }
        let recent = store.recent_activity(&StoreId::parse("1").unwrap(), 5);
        let orders: Vec<&str> = recent.iter().map(|tx| tx.order_id.as_str()).collect();
        assert_eq!(orders, ["o-6", "o-5", "o-4", "o-3", "o-2"]);
    }

    #[test]
    fn test_track_purchase_detects_connection() {
        let (_dir, mut store) = empty_store();
        store
            .register_store(new_store("29311384", "c@example.com", CurrencyCode::Usd))
            .unwrap();
        let id = StoreId::parse("29311384").unwrap();
        assert!(!store.connection_detected(&id));

        let tx = store
            .track_purchase(
                "29311384",
                OrderId::parse("ORDER_ID_12345").unwrap(),
                dec!(99.99),
                Utc::now(),
                Some("https://digitalgadgetsdr.com/checkout".to_string()),
            )
            .unwrap();

        assert_eq!(tx.normalized_revenue, dec!(5949.405));
        assert!(store.connection_detected(&id));
        assert_eq!(store.tracking_log()[0].event_type, "purchase");
    }

    #[test]
    fn test_track_rejects_missing_api_key() {
        let (_dir, mut store) = empty_store();
        let result = store.track(" ", "page_view", serde_json::Value::Null, None);
        assert!(matches!(result, Err(RepositoryError::Validation(_))));
        let purchase = store.track_purchase(
            "",
            OrderId::parse("o").unwrap(),
            dec!(1),
            Utc::now(),
            None,
        );
        assert!(matches!(purchase, Err(RepositoryError::Validation(_))));
    }

    #[test]
    fn test_add_transaction_rejects_out_of_range_amounts() {
        let (_dir, mut store) = empty_store();
        store
            .register_store(new_store("usd", "usd@example.com", CurrencyCode::Usd))
            .unwrap();
        store
            .register_store(new_store("dop", "dop@example.com", CurrencyCode::Dop))
            .unwrap();

        let negative = store.add_transaction(purchase("dop", "o-1", dec!(-5)));
        assert!(matches!(negative, Err(RepositoryError::Validation(_))));
        let huge_usd =
            store.add_transaction(purchase("usd", "o-2", dec!(2000000000000000000000000000)));
        assert!(matches!(huge_usd, Err(RepositoryError::Validation(_))));
        for order in ["o-3", "o-4"] {
            let huge_dop =
                store.add_transaction(purchase("dop", order, dec!(50000000000000000000000000000)));
            assert!(matches!(huge_dop, Err(RepositoryError::Validation(_))));
        }
        assert!(store.all_transactions().is_empty());

        store
            .add_transaction(purchase("usd", "o-5", leaderboard_core::MAX_ORDER_AMOUNT))
            .unwrap();
        let ranked = store.ranked(SortKey::Performance, Utc::now());
        assert_eq!(ranked[0].store.id.as_str(), "usd");
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let (dir, mut store) = empty_store();
        store
            .register_store(new_store("1", "a@example.com", CurrencyCode::Dop))
            .unwrap();
        store.add_transaction(purchase("1", "o-1", dec!(10))).unwrap();
        let one = StoreId::parse("1").unwrap();
        let two = StoreId::parse("2").unwrap();

        std::fs::remove_dir_all(dir.path()).unwrap();

        let registered = store.register_store(new_store("2", "b@example.com", CurrencyCode::Dop));
        assert!(matches!(registered, Err(RepositoryError::Io(_))));
        assert!(store.store_by_id(&two).is_none());

        assert!(store.add_transaction(purchase("1", "o-2", dec!(5))).is_err());
        assert_eq!(store.all_transactions().len(), 1);

        assert!(store.delete_store(&one).is_err());
        assert!(store.store_by_id(&one).is_some());
        assert_eq!(store.transactions_by_store(&one).len(), 1);

        let tracked = store.track_purchase(
            "1",
            OrderId::parse("o-3").unwrap(),
            dec!(5),
            Utc::now(),
            None,
        );
        assert!(tracked.is_err());
        assert!(!store.connection_detected(&one));
        assert_eq!(store.all_transactions().len(), 1);

        assert!(store
            .set_exchange_rate(ExchangeRate::new(dec!(60)).unwrap())
            .is_err());
        assert_eq!(store.exchange_rate(), ExchangeRate::default());

        std::fs::create_dir_all(dir.path()).unwrap();
        store
            .register_store(new_store("2", "b@example.com", CurrencyCode::Dop))
            .unwrap();
        assert!(store.store_by_id(&two).is_some());
    }

    #[test]
    fn test_track_purchase_rolls_back_when_event_cannot_be_written() {
        let (dir, mut store) = empty_store();
        store
            .register_store(new_store("1", "a@example.com", CurrencyCode::Dop))
            .unwrap();
        let tracking = dir.path().join(TRACKING);
        std::fs::remove_file(&tracking).unwrap();
        std::fs::create_dir(&tracking).unwrap();

        let tracked = store.track_purchase(
            "1",
            OrderId::parse("o-1").unwrap(),
            dec!(5),
            Utc::now(),
            None,
        );
        assert!(tracked.is_err());
        assert!(store.all_transactions().is_empty());
        let on_disk: Vec<Transaction> = documents::read(dir.path(), TRANSACTIONS).unwrap().unwrap();
        assert!(on_disk.is_empty());
    }

    #[test]
    fn test_delete_restores_transactions_when_stores_cannot_be_written() {
        let (dir, mut store) = empty_store();
        store
            .register_store(new_store("1", "a@example.com", CurrencyCode::Dop))
            .unwrap();
        store.add_transaction(purchase("1", "o-1", dec!(10))).unwrap();
        let stores = dir.path().join(STORES);
        std::fs::remove_file(&stores).unwrap();
        std::fs::create_dir(&stores).unwrap();

        assert!(store.delete_store(&StoreId::parse("1").unwrap()).is_err());
        assert_eq!(store.all_stores().len(), 1);
        assert_eq!(store.all_transactions().len(), 1);
        let on_disk: Vec<Transaction> = documents::read(dir.path(), TRANSACTIONS).unwrap().unwrap();
        assert_eq!(on_disk.len(), 1);
    }

    #[test]
    fn test_reset_restores_demo_state() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::default().with_data_dir(dir.path());
        let mut store = DataStore::open(&config).unwrap();
        store.delete_store(&StoreId::parse("10000001").unwrap()).unwrap();
        store
            .set_exchange_rate(ExchangeRate::new(dec!(1)).unwrap())
            .unwrap();

        store.reset().unwrap();

        assert_eq!(store.all_stores().len(), 6);
        assert_eq!(store.exchange_rate(), ExchangeRate::default());
        assert!(store.tracking_log().is_empty());
    }
}
