//! Figures shown around the leaderboard: the store dashboard position, the
//! global counters and the monthly revenue chart.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::stats::tally;
use crate::types::{Store, StoreId, Transaction};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Chart axis step; the axis maximum is rounded up to a multiple of this.
const AXIS_STEP: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Axis maximum used when there is no revenue at all.
const EMPTY_AXIS_MAX: Decimal = Decimal::from_parts(50_000, 0, 0, false, 0);

/// Counters shown in the leaderboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSummary {
    pub total_stores: usize,
    /// Every recorded transaction, including any whose store was removed
    /// outside the cascade.
    pub total_orders: usize,
}

impl GlobalSummary {
    #[must_use]
    pub const fn new(stores: &[Store], transactions: &[Transaction]) -> Self {
        Self {
            total_stores: stores.len(),
            total_orders: transactions.len(),
        }
    }
}

/// Normalized revenue per calendar month, all years folded together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    /// January first.
    pub months: [Decimal; 12],
    /// Chart axis maximum: the best month rounded up to the next 100,000,
    /// or 50,000 when every month is empty.
    pub axis_max: Decimal,
}

impl MonthlyRevenue {
    /// `(month name, revenue)` pairs, January first.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Decimal)> + '_ {
        MONTH_NAMES.iter().copied().zip(self.months.iter().copied())
    }
}

/// Bucket every transaction's normalized revenue by calendar month (UTC).
#[must_use]
pub fn monthly_revenue(transactions: &[Transaction]) -> MonthlyRevenue {
    let mut months = [Decimal::ZERO; 12];
    for tx in transactions {
        if let Some(bucket) = months.get_mut(tx.date.month0() as usize) {
            *bucket = bucket.saturating_add(tx.normalized_revenue);
        }
    }

    let best = months.iter().copied().max().unwrap_or(Decimal::ZERO);
    let axis_max = if best > Decimal::ZERO {
        (best / AXIS_STEP).ceil().checked_mul(AXIS_STEP).unwrap_or(best)
    } else {
        EMPTY_AXIS_MAX
    };

    MonthlyRevenue { months, axis_max }
}

/// 1-based position of `store_id` when all stores are ordered by revenue.
///
/// Returns `None` for an unknown store.
#[must_use]
pub fn revenue_position(
    stores: &[Store],
    transactions: &[Transaction],
    store_id: &StoreId,
) -> Option<usize> {
    let tallied = tally(transactions);
    let mut by_revenue: Vec<(&StoreId, Decimal)> = stores
        .iter()
        .map(|store| {
            let revenue = tallied
                .get(&store.id)
                .map_or(Decimal::ZERO, |stats| stats.total_revenue);
            (&store.id, revenue)
        })
        .collect();
    by_revenue.sort_by(|a, b| b.1.cmp(&a.1));
    by_revenue
        .iter()
        .position(|(id, _)| *id == store_id)
        .map(|index| index + 1)
}
