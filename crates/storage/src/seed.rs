//! Demo data set seeded into an empty leaderboard.
//!
//! Three podium stores get a single large order each so the podium is
//! always Gold, Silver, Bronze. The other three stores share 50 random
//! orders spread over the last 180 days.

use chrono::{DateTime, Duration, Utc};
use leaderboard_core::{
    CurrencyCode, Email, ExchangeRate, NewStore, NewTransaction, OrderId, Store, StoreId,
    Transaction, VerificationStatus,
};
use rand::Rng;
use rust_decimal::Decimal;

use crate::db::RepositoryError;

/// Number of random orders generated for the non-podium stores.
pub const RANDOM_ORDERS: usize = 50;

const RANDOM_WINDOW_DAYS: i64 = 180;

struct DemoStore {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    url: &'static str,
    currency: CurrencyCode,
    created_at: &'static str,
    status: VerificationStatus,
}

fn demo(
    id: &'static str,
    name: &'static str,
    email: &'static str,
    url: &'static str,
    currency: CurrencyCode,
    created_at: &'static str,
    status: VerificationStatus,
) -> DemoStore {
    DemoStore {
        id,
        name,
        email,
        url,
        currency,
        created_at,
        status,
    }
}

#[rustfmt::skip]
fn demo_stores() -> [DemoStore; 6] {
    use VerificationStatus::{Unverified, Verified};
    [
        demo("10000001", "Gold Store", "gold@example.com", "https://goldstore.com", CurrencyCode::Dop, "2024-01-10T10:00:00Z", Verified),
        demo("10000002", "Silver Store", "silver@example.com", "https://silverstore.com", CurrencyCode::Dop, "2024-02-15T11:00:00Z", Verified),
        demo("10000003", "Bronze Store", "bronze@example.com", "https://bronzestore.com", CurrencyCode::Dop, "2024-03-01T12:00:00Z", Unverified),
        demo("29311384", "Digital Gadgets DR", "contact@digitalgadgetsdr.com", "https://digitalgadgetsdr.com", CurrencyCode::Usd, "2024-01-15T10:00:00Z", Unverified),
        demo("84113922", "Moda Tropical RD", "ventas@modatropical.com", "https://modatropical.com", CurrencyCode::Dop, "2024-02-20T11:00:00Z", Unverified),
        demo("30248192", "Casa Bonita Hogar", "info@casabonitahogar.do", "https://casabonitahogar.do", CurrencyCode::Dop, "2024-03-10T12:00:00Z", Unverified),
    ]
}

/// Podium orders: `(store id, order id, amount in DOP)`.
const PODIUM_ORDERS: [(&str, &str, i64); 3] = [
    ("10000001", "tx-gold", 10_000_000),
    ("10000002", "tx-silver", 5_000_000),
    ("10000003", "tx-bronze", 1_000_000),
];

fn invalid(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Validation(format!("demo data: {e}"))
}

fn build_store(demo: DemoStore) -> Result<Store, RepositoryError> {
    let created_at = DateTime::parse_from_rfc3339(demo.created_at)
        .map_err(invalid)?
        .with_timezone(&Utc);
    let mut store = Store::register(
        NewStore {
            id: StoreId::parse(demo.id).map_err(invalid)?,
            name: demo.name.to_owned(),
            email: Email::parse(demo.email).map_err(invalid)?,
            url: demo.url.to_owned(),
            currency: demo.currency,
        },
        created_at,
    );
    store.status = demo.status;
    Ok(store)
}

/// Random order amount in the store's native currency, in whole cents:
/// USD 10.00-160.00, anything else 500.00-8,500.00.
fn random_amount<R: Rng + ?Sized>(rng: &mut R, currency: &CurrencyCode) -> Decimal {
    let cents = if currency.is_foreign() {
        rng.random_range(1_000..16_000)
    } else {
        rng.random_range(50_000..850_000)
    };
    Decimal::new(cents, 2)
}

/// Build the demo stores and transactions.
///
/// Transactions are normalized with `rate`, exactly as live ingestion would.
///
/// # Errors
///
/// Returns [`RepositoryError::Validation`] if the built-in demo records fail
/// to parse or cannot be converted at `rate`.
pub fn demo_dataset<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    rate: ExchangeRate,
) -> Result<(Vec<Store>, Vec<Transaction>), RepositoryError> {
    let stores = demo_stores()
        .into_iter()
        .map(build_store)
        .collect::<Result<Vec<_>, _>>()?;

    let mut transactions = Vec::with_capacity(PODIUM_ORDERS.len() + RANDOM_ORDERS);

    for (store_id, order_id, amount) in PODIUM_ORDERS {
        let store = stores
            .iter()
            .find(|s| s.id.as_str() == store_id)
            .ok_or_else(|| invalid(format!("unknown podium store {store_id}")))?;
        transactions.push(Transaction::ingest(
            NewTransaction {
                store_id: store.id.clone(),
                order_id: OrderId::parse(order_id).map_err(invalid)?,
                amount: Decimal::from(amount),
                date: now,
            },
            store,
            rate,
        )
        .map_err(invalid)?);
    }

    let others = stores.get(PODIUM_ORDERS.len()..).unwrap_or_default();
    if !others.is_empty() {
        let window_ms = Duration::days(RANDOM_WINDOW_DAYS).num_milliseconds();
        for i in 0..RANDOM_ORDERS {
            let Some(store) = others.get(rng.random_range(0..others.len())) else {
                continue;
            };
            let date = now - Duration::milliseconds(rng.random_range(0..window_ms));
            transactions.push(Transaction::ingest(
                NewTransaction {
                    store_id: store.id.clone(),
                    order_id: OrderId::parse(&format!("demo-{}-{i}", now.timestamp_millis()))
                        .map_err(invalid)?,
                    amount: random_amount(rng, &store.currency),
                    date,
                },
                store,
                rate,
            )
            .map_err(invalid)?);
        }
    }

    Ok((stores, transactions))
}
