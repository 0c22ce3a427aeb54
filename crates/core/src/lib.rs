//! eCOM Leaderboard Core - Shared types and the ranking engine.
//!
//! This crate provides the types and calculations used across all leaderboard
//! components:
//! - `storage` - Local JSON document store, demo seeding, tracking log
//! - `cli` - Command-line dashboards, admin table, settings and export
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure calculations - no I/O,
//! no clock reads, no global state. The exchange rate and the current time
//! are always passed in, so every result is a deterministic function of its
//! inputs.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for store IDs, emails, currencies and statuses,
//!   plus the persisted `Store` and `Transaction` records
//! - [`ranking`] - Statistics aggregation, ranking, podium partitioning
//! - [`source`] - The `LeaderboardSource` trait implemented by persistence layers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod ranking;
pub mod source;
pub mod types;

pub use ranking::{
    GlobalSummary, MonthlyRevenue, PODIUM_SIZE, RankedStore, SortKey, Standings, StoreStats,
    TableRow, compute_stats, monthly_revenue, partition, rank, revenue_position,
};
pub use source::LeaderboardSource;
pub use types::*;
