//! eCOM Leaderboard storage library.
//!
//! Local persistence for the leaderboard: a directory of JSON documents that
//! plays the part of the browser's local storage. Every write replaces a
//! whole document, so a reader sees either the old or the new collection.
//!
//! # Documents
//!
//! - `stores.json` - Registered stores
//! - `transactions.json` - Ingested purchases with their normalized revenue
//! - `settings.json` - The exchange rate
//! - `tracking.json` - The last 20 tracking-snippet events

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod seed;

pub use config::{ConfigError, StorageConfig};
pub use db::{DataStore, RepositoryError, TRACKING_LOG_LIMIT, TrackingEvent};
