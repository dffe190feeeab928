//! Persistence for the record set.
//!
//! A [`RecordStore`] keeps the whole sequence of postings as one JSON blob.
//! Loading never fails: a missing or unreadable blob, or one that is not a
//! JSON array, is treated as an empty board. Individual array elements that
//! are not valid postings are skipped. Saving is best effort and failures are only logged, so
//! a broken disk never interrupts matching.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::domain::TicketRequest;

/// Somewhere to keep the record set between runs.
pub trait RecordStore {
    /// Loads the stored postings.
    ///
    /// Returns an empty sequence if nothing is stored or the stored content
    /// is not an array. Elements that are not valid postings are dropped.
    fn load(&self) -> Vec<TicketRequest>;

    /// Replaces the stored postings. Failures are logged, not returned.
    fn save(&mut self, requests: &[TicketRequest]);

    /// Removes everything that is stored. Failures are logged, not returned.
    fn clear(&mut self);
}

/// Failure reading or writing a record blob.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The file could not be read or written.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The content is not a JSON array.
    #[error("malformed record data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parses a stored blob.
///
/// Elements of the array that are not well-formed postings are skipped with a
/// warning, so one bad record never takes the rest of the board with it.
///
/// # Errors
///
/// Returns an error unless `blob` is a JSON array.
pub fn decode(blob: &str) -> Result<Vec<TicketRequest>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(blob)?;
    Ok(values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(request) => Some(request),
            Err(e) => {
                tracing::warn!("Skipping stored record {index}: {e}");
                None
            }
        })
        .collect())
}

/// Serializes postings into a blob that [`decode`] accepts.
///
/// # Errors
///
/// Serialization of postings does not fail in practice; the error is passed
/// through from `serde_json`.
pub fn encode(requests: &[TicketRequest]) -> Result<String, serde_json::Error> {
    serde_json::to_string(requests)
}

/// Stores the record set as a single JSON file.
///
/// The file is `<dir>/<key>.json`. The directory is created when the first
/// save happens.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for `key` inside `dir`.
    #[must_use]
    pub fn new(dir: &Path, key: &str) -> Self {
        Self {
            path: dir.join(format!("{key}.json")),
        }
    }

    /// The file the records live in.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored postings, reporting why that failed.
    ///
    /// A missing file is not an error; it loads as an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn try_load(&self) -> Result<Vec<TicketRequest>, StoreError> {
        let blob = match fs::read_to_string(&self.path) {
            Ok(blob) => blob,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        Ok(decode(&blob)?)
    }

    /// Writes the postings, reporting why that failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn try_save(&self, requests: &[TicketRequest]) -> Result<(), StoreError> {
        let blob = encode(requests)?;
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(io_error)?;
        }
        fs::write(&self.path, blob).map_err(io_error)
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Vec<TicketRequest> {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!("Discarding stored records: {e}");
            Vec::new()
        })
    }

    fn save(&mut self, requests: &[TicketRequest]) {
        match self.try_save(requests) {
            Ok(()) => tracing::debug!("Saved {} records to {}", requests.len(), self.path.display()),
            Err(e) => tracing::warn!("Failed to save records: {e}"),
        }
    }

    fn clear(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("Removed {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove {}: {e}", self.path.display()),
        }
    }
}

/// Keeps the record blob in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { blob: None }
    }

    /// Creates a store that already holds `blob`, valid or not.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }

    /// The stored blob, if any.
    #[must_use]
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Vec<TicketRequest> {
        let Some(blob) = &self.blob else {
            return Vec::new();
        };
        decode(blob).unwrap_or_else(|e| {
            tracing::warn!("Discarding stored records: {e}");
            Vec::new()
        })
    }

    fn save(&mut self, requests: &[TicketRequest]) {
        match encode(requests) {
            Ok(blob) => self.blob = Some(blob),
            Err(e) => tracing::warn!("Failed to save records: {e}"),
        }
    }

    fn clear(&mut self) {
        self.blob = None;
    }
}
