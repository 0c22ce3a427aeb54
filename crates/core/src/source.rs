//! The read interface a persistence layer offers the ranking engine.

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::ranking::{
    GlobalSummary, MonthlyRevenue, RankedStore, SortKey, Standings, StoreStats, compute_stats,
    monthly_revenue, partition, rank, revenue_position,
};
use crate::types::{ExchangeRate, Store, StoreId, Transaction};

/// Read access to stores, transactions and the exchange rate.
///
/// Implementors provide the four accessors; the leaderboard queries come for
/// free and are recomputed from a fresh snapshot on every call.
pub trait LeaderboardSource {
    /// Every registered store, in registration order.
    fn all_stores(&self) -> Cow<'_, [Store]>;

    /// Every recorded transaction, in ingestion order.
    fn all_transactions(&self) -> Cow<'_, [Transaction]>;

    /// The rate new transactions are normalized with.
    fn exchange_rate(&self) -> ExchangeRate;

    /// Transactions of one store, in ingestion order.
    fn transactions_by_store(&self, store_id: &StoreId) -> Vec<Transaction> {
        self.all_transactions()
            .iter()
            .filter(|tx| &tx.store_id == store_id)
            .cloned()
            .collect()
    }

    /// Aggregates for one store; zeroed for an unknown store.
    fn stats_for(&self, store_id: &StoreId) -> StoreStats {
        compute_stats(store_id, &self.all_transactions())
    }

    /// All stores ranked under `sort_key` as of `now`.
    fn ranked(&self, sort_key: SortKey, now: DateTime<Utc>) -> Vec<RankedStore> {
        rank(&self.all_stores(), &self.all_transactions(), sort_key, now)
    }

    /// The ranked stores split into podium and table.
    fn standings(&self, sort_key: SortKey, now: DateTime<Utc>) -> Standings {
        partition(self.ranked(sort_key, now))
    }

    /// 1-based revenue position of one store.
    fn position_of(&self, store_id: &StoreId) -> Option<usize> {
        revenue_position(&self.all_stores(), &self.all_transactions(), store_id)
    }

    fn summary(&self) -> GlobalSummary {
        GlobalSummary::new(&self.all_stores(), &self.all_transactions())
    }

    fn monthly_revenue(&self) -> MonthlyRevenue {
        monthly_revenue(&self.all_transactions())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::types::{CurrencyCode, Email, NewStore, NewTransaction, OrderId};

    struct Snapshot {
        stores: Vec<Store>,
        transactions: Vec<Transaction>,
    }

    impl LeaderboardSource for Snapshot {
        fn all_stores(&self) -> Cow<'_, [Store]> {
            Cow::Borrowed(&self.stores)
        }

        fn all_transactions(&self) -> Cow<'_, [Transaction]> {
            Cow::Borrowed(&self.transactions)
        }

        fn exchange_rate(&self) -> ExchangeRate {
            ExchangeRate::default()
        }
    }

    fn snapshot() -> Snapshot {
        let now: DateTime<Utc> = "2025-01-01T00:00:00Z".parse().unwrap();
        let stores: Vec<Store> = [("1", CurrencyCode::Dop), ("2", CurrencyCode::Usd)]
            .into_iter()
            .map(|(id, currency)| {
                Store::register(
                    NewStore {
                        id: StoreId::parse(id).unwrap(),
                        name: format!("Store {id}"),
                        email: Email::parse(&format!("s{id}@example.com")).unwrap(),
                        url: String::new(),
                        currency,
                    },
                    now,
                )
            })
            .collect();
        let transactions = vec![
            Transaction::ingest(
                NewTransaction {
                    store_id: stores[0].id.clone(),
                    order_id: OrderId::parse("a").unwrap(),
                    amount: dec!(1000),
                    date: now,
                },
                &stores[0],
                ExchangeRate::default(),
            )
            .unwrap(),
            Transaction::ingest(
                NewTransaction {
                    store_id: stores[1].id.clone(),
                    order_id: OrderId::parse("b").unwrap(),
                    amount: dec!(20),
                    date: now,
                },
                &stores[1],
                ExchangeRate::default(),
            )
            .unwrap(),
        ];
        Snapshot {
            stores,
            transactions,
        }
    }

    #[test]
    fn test_provided_queries() {
        let source = snapshot();
        let usd = StoreId::parse("2").unwrap();

        assert_eq!(source.stats_for(&usd).total_revenue, dec!(1190));
        assert_eq!(source.transactions_by_store(&usd).len(), 1);
        assert_eq!(source.position_of(&usd), Some(1));
        assert_eq!(source.summary().total_orders, 2);

        let now = "2025-01-02T00:00:00Z".parse().unwrap();
        let standings = source.standings(SortKey::Performance, now);
        assert_eq!(standings.podium_entries().count(), 2);
        assert!(standings.table.is_empty());
    }
}
