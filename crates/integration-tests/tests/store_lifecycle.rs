//! Store registry, cascade delete and persistence across reopen.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use leaderboard_core::{
    CurrencyCode, Email, ExchangeRate, LeaderboardSource, StoreUpdate, VerificationStatus,
};
use leaderboard_integration_tests::{TestContext, new_store, store_id};
use leaderboard_storage::RepositoryError;
use rust_decimal_macros::dec;

#[test]
fn test_delete_removes_exactly_the_store_transactions() {
    let mut ctx = TestContext::new();
    ctx.register("a", CurrencyCode::Dop);
    ctx.register("b", CurrencyCode::Usd);
    ctx.register("c", CurrencyCode::Dop);
    ctx.purchase("a", "a-1", dec!(1000));
    ctx.purchase("b", "b-1", dec!(20));
    ctx.purchase("a", "a-2", dec!(500));
    ctx.purchase("c", "c-1", dec!(750));

    let b_before = ctx.store.stats_for(&store_id("b"));
    let c_before = ctx.store.stats_for(&store_id("c"));

    let removed = ctx.store.delete_store(&store_id("a")).unwrap();

    assert_eq!(removed, 2);
    assert!(ctx.store.store_by_id(&store_id("a")).is_none());
    assert!(ctx.store.transactions_by_store(&store_id("a")).is_empty());
    assert_eq!(ctx.store.stats_for(&store_id("b")), b_before);
    assert_eq!(ctx.store.stats_for(&store_id("c")), c_before);

    let summary = ctx.store.summary();
    assert_eq!(summary.total_stores, 2);
    assert_eq!(summary.total_orders, 2);
}

#[test]
fn test_deleted_store_stays_deleted_after_reopen() {
    let mut ctx = TestContext::new();
    ctx.register("a", CurrencyCode::Dop);
    ctx.register("b", CurrencyCode::Dop);
    ctx.purchase("a", "a-1", dec!(1));
    ctx.purchase("b", "b-1", dec!(2));
    ctx.store.delete_store(&store_id("a")).unwrap();

    ctx.reopen();

    assert_eq!(ctx.store.all_stores().len(), 1);
    assert_eq!(ctx.store.all_transactions().len(), 1);
    assert_eq!(ctx.store.all_transactions()[0].store_id, store_id("b"));
}

#[test]
fn test_rate_change_keeps_recorded_revenue() {
    let mut ctx = TestContext::new();
    ctx.register("usd", CurrencyCode::Usd);
    let first = ctx.purchase("usd", "o-1", dec!(10));

    ctx.store
        .set_exchange_rate(ExchangeRate::new(dec!(61.25)).unwrap())
        .unwrap();
    ctx.reopen();
    let second = ctx.purchase("usd", "o-2", dec!(10));

    assert_eq!(first.normalized_revenue, dec!(595));
    assert_eq!(second.normalized_revenue, dec!(612.5));
    assert_eq!(
        ctx.store.stats_for(&store_id("usd")).total_revenue,
        dec!(1207.5)
    );
    assert_eq!(ctx.store.exchange_rate().value(), dec!(61.25));
}

#[test]
fn test_currency_change_is_not_retroactive() {
    let mut ctx = TestContext::new();
    ctx.register("s", CurrencyCode::Dop);
    ctx.purchase("s", "o-1", dec!(100));

    ctx.store
        .update_store(
            &store_id("s"),
            StoreUpdate {
                currency: Some(CurrencyCode::Usd),
                ..StoreUpdate::default()
            },
        )
        .unwrap();
    ctx.purchase("s", "o-2", dec!(100));

    let txs = ctx.store.transactions_by_store(&store_id("s"));
    assert_eq!(txs[0].normalized_revenue, dec!(100));
    assert_eq!(txs[1].normalized_revenue, dec!(5950));
}

#[test]
fn test_unrecognized_currency_is_treated_as_reporting_currency() {
    let mut ctx = TestContext::new();
    ctx.register("eu", CurrencyCode::from("EUR"));
    let tx = ctx.purchase("eu", "o-1", dec!(80));
    assert_eq!(tx.normalized_revenue, dec!(80));

    ctx.reopen();
    let store = ctx.store.store_by_id(&store_id("eu")).unwrap();
    assert_eq!(store.currency, CurrencyCode::Unrecognized("EUR".to_owned()));
}

#[test]
fn test_email_uniqueness_ignores_case() {
    let mut ctx = TestContext::new();
    ctx.register("1", CurrencyCode::Dop);

    let mut duplicate = new_store("2", CurrencyCode::Dop);
    duplicate.email = Email::parse("OWNER-1@EXAMPLE.COM").unwrap();
    assert!(matches!(
        ctx.store.register_store(duplicate),
        Err(RepositoryError::Conflict(_))
    ));
    assert!(ctx.store.store_by_email("Owner-1@Example.com").is_some());
}

#[test]
fn test_admin_edit_persists() {
    let mut ctx = TestContext::new();
    ctx.register("1", CurrencyCode::Dop);

    ctx.store
        .update_store(
            &store_id("1"),
            StoreUpdate {
                name: Some("Renamed".to_owned()),
                status: Some(VerificationStatus::Verified),
                ..StoreUpdate::default()
            },
        )
        .unwrap();
    ctx.reopen();

    let store = ctx.store.store_by_id(&store_id("1")).unwrap();
    assert_eq!(store.name, "Renamed");
    assert_eq!(store.status, VerificationStatus::Verified);
    assert_eq!(store.display_url(), "store-1.example.com");
}

#[test]
fn test_reset_without_demo_data_empties_everything() {
    let mut ctx = TestContext::new();
    ctx.register("1", CurrencyCode::Dop);
    ctx.purchase("1", "o-1", dec!(5));
    ctx.store
        .set_exchange_rate(ExchangeRate::new(dec!(1)).unwrap())
        .unwrap();

    ctx.store.reset().unwrap();
    ctx.reopen();

    assert!(ctx.store.all_stores().is_empty());
    assert!(ctx.store.all_transactions().is_empty());
    assert_eq!(ctx.store.exchange_rate(), ExchangeRate::default());
}
