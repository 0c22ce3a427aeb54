//! Core types for the leaderboard.
//!
//! This module provides type-safe wrappers for common domain concepts and the
//! two persisted records, [`Store`] and [`Transaction`].

pub mod currency;
pub mod email;
pub mod id;
pub mod status;
pub mod store;
pub mod transaction;

pub use currency::{
    AmountError, CurrencyCode, DEFAULT_EXCHANGE_RATE, ExchangeRate, ExchangeRateError,
    MAX_ORDER_AMOUNT, REPORTING_CURRENCY, checked_normalize, normalize,
};
pub use email::{Email, EmailError};
pub use id::*;
pub use status::*;
pub use store::{NewStore, Store, StoreUpdate};
pub use transaction::{NewTransaction, Transaction};
