//! Whole-document JSON reads and atomic replaces.

use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use super::RepositoryError;

pub(super) const STORES: &str = "stores.json";
pub(super) const TRANSACTIONS: &str = "transactions.json";
pub(super) const SETTINGS: &str = "settings.json";
pub(super) const TRACKING: &str = "tracking.json";

/// Read a document, returning `None` if it does not exist yet.
pub(super) fn read<T: DeserializeOwned>(
    dir: &Path,
    document: &'static str,
) -> Result<Option<T>, RepositoryError> {
    let bytes = match std::fs::read(dir.join(document)) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| RepositoryError::DataCorruption { document, source })
}

/// Replace a document.
///
/// The value is written to a temporary file in the same directory and then
/// renamed over the target.
pub(super) fn write<T: Serialize + ?Sized>(
    dir: &Path,
    document: &'static str,
    value: &T,
) -> Result<(), RepositoryError> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
    }
    tmp.persist(dir.join(document)).map_err(|e| e.error)?;
    tracing::debug!(document, "Document written");
    Ok(())
}
