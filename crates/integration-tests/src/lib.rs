//! Integration tests for the eCOM leaderboard.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p leaderboard-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `store_lifecycle` - Registry, cascade delete and persistence across reopen
//! - `ranking` - Podium/table split and the three sort keys over a real store
//! - `tracking` - Purchases reported through the tracking snippet
//! - `properties` - Population properties of the ranking engine
//!
//! Every test gets its own [`TestContext`]: a data store in a fresh temporary
//! directory, without demo data.

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::{DateTime, Utc};
use leaderboard_core::{
    CurrencyCode, Email, ExchangeRate, NewStore, NewTransaction, OrderId, Store, StoreId,
    Transaction,
};
use leaderboard_storage::{DataStore, StorageConfig};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// An isolated, empty data store.
pub struct TestContext {
    pub store: DataStore,
    dir: TempDir,
}

impl TestContext {
    /// Open a data store in a new temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory or the store cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = DataStore::open(&Self::config_for(&dir)).expect("Failed to open data store");
        Self { store, dir }
    }

    fn config_for(dir: &TempDir) -> StorageConfig {
        StorageConfig {
            data_dir: dir.path().to_path_buf(),
            seed_demo: false,
            default_exchange_rate: ExchangeRate::default(),
        }
    }

    /// Drop the in-memory state and load the documents again from disk.
    ///
    /// # Panics
    ///
    /// Panics if the documents cannot be read.
    pub fn reopen(&mut self) {
        self.store = DataStore::open(&Self::config_for(&self.dir)).expect("Failed to reopen data store");
    }

    /// Register a store named `Store {id}` with a matching email and URL.
    ///
    /// # Panics
    ///
    /// Panics if registration fails.
    pub fn register(&mut self, id: &str, currency: CurrencyCode) -> Store {
        self.store
            .register_store(new_store(id, currency))
            .expect("Failed to register store")
    }

    /// Record a purchase dated now.
    ///
    /// # Panics
    ///
    /// Panics if the store does not exist.
    pub fn purchase(&mut self, store_id: &str, order_id: &str, amount: Decimal) -> Transaction {
        self.purchase_at(store_id, order_id, amount, Utc::now())
    }

    /// Record a purchase with an explicit date.
    ///
    /// # Panics
    ///
    /// Panics if the store does not exist.
    pub fn purchase_at(
        &mut self,
        store_id: &str,
        order_id: &str,
        amount: Decimal,
        date: DateTime<Utc>,
    ) -> Transaction {
        self.store
            .add_transaction(NewTransaction {
                store_id: store_id.parse().expect("Invalid store id"),
                order_id: order_id.parse().expect("Invalid order id"),
                amount,
                date,
            })
            .expect("Failed to record purchase")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration data for a store named after its id.
///
/// # Panics
///
/// Panics if `id` is blank.
#[must_use]
pub fn new_store(id: &str, currency: CurrencyCode) -> NewStore {
    NewStore {
        id: StoreId::parse(id).expect("Invalid store id"),
        name: format!("Store {id}"),
        email: Email::parse(&format!("owner-{id}@example.com")).expect("Invalid email"),
        url: format!("https://store-{id}.example.com/"),
        currency,
    }
}

/// Parse a store id, for assertions.
///
/// # Panics
///
/// Panics if `id` is blank.
#[must_use]
pub fn store_id(id: &str) -> StoreId {
    StoreId::parse(id).expect("Invalid store id")
}

/// Parse an order id, for assertions.
///
/// # Panics
///
/// Panics if `id` is blank.
#[must_use]
pub fn order_id(id: &str) -> OrderId {
    OrderId::parse(id).expect("Invalid order id")
}
