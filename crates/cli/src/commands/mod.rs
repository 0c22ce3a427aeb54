//! Subcommand implementations.
//!
//! Each command takes an opened [`DataStore`](leaderboard_storage::DataStore)
//! and reports its result through `tracing` events.

pub mod export;
pub mod leaderboard;
pub mod reset;
pub mod settings;
pub mod store;
pub mod track;

use leaderboard_core::StoreId;
use leaderboard_storage::RepositoryError;
use thiserror::Error;

/// Errors raised by the subcommands themselves.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Storage operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// No store with this id is registered.
    #[error("Store not found: {0}")]
    UnknownStore(StoreId),

    /// Export requested on an empty leaderboard.
    #[error("No stores to export")]
    NothingToExport,

    /// An update with no fields set.
    #[error("Nothing to update: pass at least one field")]
    EmptyUpdate,

    /// Writing the export failed.
    #[error("Could not write export: {0}")]
    Io(#[from] std::io::Error),
}
