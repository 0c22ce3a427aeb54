//! Currency codes, the exchange rate and revenue normalization.
//!
//! All leaderboard figures are reported in Dominican pesos (DOP). Stores may
//! sell in DOP or in US dollars; a dollar amount is converted with a single
//! exchange rate (pesos per dollar). The conversion happens once, when a
//! transaction is ingested, and the result is stored with the transaction.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The currency every leaderboard figure is reported in.
pub const REPORTING_CURRENCY: CurrencyCode = CurrencyCode::Dop;

/// Pesos per dollar used when no rate has been configured.
pub const DEFAULT_EXCHANGE_RATE: ExchangeRate = ExchangeRate(Decimal::from_parts(5950, 0, 0, false, 2));

/// Largest single order amount accepted at ingestion, in the store's
/// native currency.
pub const MAX_ORDER_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// ISO 4217 code of a store's native currency.
///
/// Codes other than DOP and USD are kept verbatim as
/// [`CurrencyCode::Unrecognized`] and are treated as already being in the
/// reporting currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum CurrencyCode {
    /// Dominican peso, the reporting currency.
    #[default]
    Dop,
    /// US dollar, converted with the exchange rate.
    Usd,
    /// Any other code.
    Unrecognized(String),
}

impl CurrencyCode {
    /// The ISO code as written in stored records.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Dop => "DOP",
            Self::Usd => "USD",
            Self::Unrecognized(code) => code,
        }
    }

    /// Whether amounts in this currency are converted with the exchange rate.
    #[must_use]
    pub const fn is_foreign(&self) -> bool {
        matches!(self, Self::Usd)
    }

    /// Whether the code is one the leaderboard knows how to handle.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "DOP" => Self::Dop,
            "USD" => Self::Usd,
            _ => Self::Unrecognized(trimmed.to_owned()),
        }
    }
}

impl From<String> for CurrencyCode {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.code().to_owned()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors that can occur when constructing an [`ExchangeRate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeRateError {
    /// The rate is zero or negative.
    #[error("exchange rate must be positive (got {0})")]
    NotPositive(Decimal),
}

/// Reporting-currency units per unit of foreign currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    /// Create a rate.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeRateError::NotPositive`] for zero or negative values.
    pub fn new(rate: Decimal) -> Result<Self, ExchangeRateError> {
        if rate <= Decimal::ZERO {
            return Err(ExchangeRateError::NotPositive(rate));
        }
        Ok(Self(rate))
    }

    /// The rate as a decimal.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        DEFAULT_EXCHANGE_RATE
    }
}

impl TryFrom<Decimal> for ExchangeRate {
    type Error = ExchangeRateError;

    fn try_from(rate: Decimal) -> Result<Self, Self::Error> {
        Self::new(rate)
    }
}

impl From<ExchangeRate> for Decimal {
    fn from(rate: ExchangeRate) -> Self {
        rate.0
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur when an order amount is ingested.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The amount is below zero.
    #[error("order amount cannot be negative (got {0})")]
    Negative(Decimal),
    /// The amount exceeds [`MAX_ORDER_AMOUNT`].
    #[error("order amount must be at most {max} (got {0})", max = MAX_ORDER_AMOUNT)]
    TooLarge(Decimal),
    /// The converted amount does not fit in a decimal.
    #[error("order amount {0} cannot be converted at the current exchange rate")]
    Overflow(Decimal),
}

/// Convert an amount in `currency` to the reporting currency.
///
/// Reporting-currency and unrecognized amounts are returned unchanged;
/// foreign amounts are multiplied by `rate`. No rounding is applied. A
/// product beyond the decimal range saturates instead of panicking; use
/// [`checked_normalize`] to reject such amounts.
#[must_use]
pub fn normalize(amount: Decimal, currency: &CurrencyCode, rate: ExchangeRate) -> Decimal {
    if currency.is_foreign() {
        amount.saturating_mul(rate.value())
    } else {
        amount
    }
}

/// Validate an order amount and convert it to the reporting currency.
///
/// # Errors
///
/// Returns [`AmountError`] if the amount is negative, larger than
/// [`MAX_ORDER_AMOUNT`], or overflows when multiplied by `rate`.
pub fn checked_normalize(
    amount: Decimal,
    currency: &CurrencyCode,
    rate: ExchangeRate,
) -> Result<Decimal, AmountError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AmountError::Negative(amount));
    }
    if amount > MAX_ORDER_AMOUNT {
        return Err(AmountError::TooLarge(amount));
    }
    if currency.is_foreign() {
        amount
            .checked_mul(rate.value())
            .ok_or(AmountError::Overflow(amount))
    } else {
        Ok(amount)
    }
}
