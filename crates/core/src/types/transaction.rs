//! Purchase transactions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AmountError, ExchangeRate, OrderId, Store, StoreId, checked_normalize};

/// A recorded purchase.
///
/// `normalized_revenue` is computed once, at ingestion, with the exchange
/// rate in effect at that moment. It is never recomputed, so a dataset that
/// spans a rate change carries revenue converted at different rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub store_id: StoreId,
    pub order_id: OrderId,
    /// Amount in the store's native currency.
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    /// Amount in the reporting currency.
    pub normalized_revenue: Decimal,
}

/// A purchase as reported by the tracking snippet, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub store_id: StoreId,
    pub order_id: OrderId,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
}

impl Transaction {
    /// Fix the normalized revenue of `new` using the store's currency and `rate`.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError`] for a negative or out-of-range amount.
    pub fn ingest(
        new: NewTransaction,
        store: &Store,
        rate: ExchangeRate,
    ) -> Result<Self, AmountError> {
        let normalized_revenue = checked_normalize(new.amount, &store.currency, rate)?;
        Ok(Self {
            store_id: new.store_id,
            order_id: new.order_id,
            amount: new.amount,
            date: new.date,
            normalized_revenue,
        })
    }
}
