use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{StoreId, Transaction};

/// Per-store aggregates, recomputed on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_orders: usize,
    /// Sum of normalized revenue, in the reporting currency.
    pub total_revenue: Decimal,
    /// `total_revenue / total_orders`, or zero for a store without orders.
    pub avg_order_value: Decimal,
}

impl StoreStats {
    fn from_totals(total_orders: usize, total_revenue: Decimal) -> Self {
        let avg_order_value = if total_orders == 0 {
            Decimal::ZERO
        } else {
            total_revenue / Decimal::from(total_orders)
        };
        Self {
            total_orders,
            total_revenue,
            avg_order_value,
        }
    }
}

/// Aggregate the transactions belonging to `store_id`.
///
/// An unknown store simply has no transactions and yields zeroed stats.
/// Revenue saturates at [`Decimal::MAX`].
#[must_use]
pub fn compute_stats(store_id: &StoreId, transactions: &[Transaction]) -> StoreStats {
    let (orders, revenue) = transactions
        .iter()
        .filter(|tx| &tx.store_id == store_id)
        .fold((0usize, Decimal::ZERO), |(orders, revenue), tx| {
            (orders + 1, revenue.saturating_add(tx.normalized_revenue))
        });
    StoreStats::from_totals(orders, revenue)
}

/// Aggregate every store's transactions in a single pass.
///
/// Gives the same result as calling [`compute_stats`] once per store.
pub(crate) fn tally(transactions: &[Transaction]) -> HashMap<&StoreId, StoreStats> {
    let mut totals: HashMap<&StoreId, (usize, Decimal)> = HashMap::new();
    for tx in transactions {
        let entry = totals.entry(&tx.store_id).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 = entry.1.saturating_add(tx.normalized_revenue);
    }
    totals
        .into_iter()
        .map(|(id, (orders, revenue))| (id, StoreStats::from_totals(orders, revenue)))
        .collect()
}
