use core::cmp::Ordering;
use core::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::stats::{StoreStats, tally};
use crate::types::{Store, Transaction};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Leaderboard ordering selected by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Total normalized revenue ("performance points").
    #[default]
    Performance,
    /// Total order count.
    Orders,
    /// Revenue per day since the store joined.
    Growth,
}

impl SortKey {
    /// Descending comparison of two ranked stores under this key.
    fn descending(self, a: &RankedStore, b: &RankedStore) -> Ordering {
        match self {
            Self::Performance => b.stats.total_revenue.cmp(&a.stats.total_revenue),
            Self::Orders => b.stats.total_orders.cmp(&a.stats.total_orders),
            Self::Growth => b.growth.cmp(&a.growth),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Performance => write!(f, "performance"),
            Self::Orders => write!(f, "orders"),
            Self::Growth => write!(f, "growth"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "performance" | "revenue" => Ok(Self::Performance),
            "orders" => Ok(Self::Orders),
            "growth" => Ok(Self::Growth),
            _ => Err(format!("invalid sort key: {s}")),
        }
    }
}

/// A store annotated with its stats and growth figures for one ranking pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedStore {
    pub store: Store,
    pub stats: StoreStats,
    /// Normalized revenue per day since creation (at least one day).
    pub growth: Decimal,
    /// Percentage by which `growth` exceeds (or trails) the population mean.
    /// Zero for every store when the mean is zero.
    pub growth_percent: Decimal,
}

/// Rank every store under `sort_key`.
///
/// Each store appears exactly once, including stores without transactions.
/// Ties keep the order of `stores`. `now` anchors the days-active figure so
/// that a fixed snapshot always ranks the same way.
#[must_use]
pub fn rank(
    stores: &[Store],
    transactions: &[Transaction],
    sort_key: SortKey,
    now: DateTime<Utc>,
) -> Vec<RankedStore> {
    let tallied = tally(transactions);

    let annotated: Vec<(StoreStats, Decimal)> = stores
        .iter()
        .map(|store| {
            let stats = tallied.get(&store.id).copied().unwrap_or_default();
            let growth = stats.total_revenue / days_active(store.created_at, now);
            (stats, growth)
        })
        .collect();

    let mean_growth = mean(annotated.iter().map(|(_, growth)| *growth));

    let mut ranked: Vec<RankedStore> = stores
        .iter()
        .zip(annotated)
        .map(|(store, (stats, growth))| RankedStore {
            store: store.clone(),
            stats,
            growth,
            growth_percent: growth_percent(growth, mean_growth),
        })
        .collect();

    // `sort_by` is stable, which is the only tiebreak.
    ranked.sort_by(|a, b| sort_key.descending(a, b));
    ranked
}

/// Fractional days between `created_at` and `now`, floored at one day.
fn days_active(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Decimal {
    let elapsed = Decimal::from((now - created_at).num_milliseconds()) / Decimal::from(MILLIS_PER_DAY);
    elapsed.max(Decimal::ONE)
}

fn mean(values: impl ExactSizeIterator<Item = Decimal>) -> Decimal {
    let count = values.len();
    if count == 0 {
        return Decimal::ZERO;
    }
    values.fold(Decimal::ZERO, Decimal::saturating_add) / Decimal::from(count)
}

fn growth_percent(growth: Decimal, mean_growth: Decimal) -> Decimal {
    if mean_growth <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    growth
        .saturating_sub(mean_growth)
        .checked_div(mean_growth)
        .map_or(Decimal::ZERO, |ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED))
}
