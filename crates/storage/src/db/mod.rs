//! Document-backed repository.
//!
//! # Documents
//!
//! - `stores.json` - Registered stores (unique id, case-insensitive unique email)
//! - `transactions.json` - Purchases; deleted together with their store
//! - `settings.json` - Exchange rate
//! - `tracking.json` - Capped log of tracking-snippet events
//!
//! Each operation reads nothing from disk: the collections are loaded once by
//! [`DataStore::open`], mutated in memory and written back whole.

mod data_store;
mod documents;
mod tracking;

use thiserror::Error;

pub use data_store::DataStore;
pub use tracking::{TRACKING_LOG_LIMIT, TrackingEvent};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing a document failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A document on disk could not be parsed.
    #[error("data corruption in {document}: {source}")]
    DataCorruption {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A collection could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Requested entity was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Constraint violation (e.g., duplicate store id or email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Input rejected before touching any document.
    #[error("invalid input: {0}")]
    Validation(String),
}
