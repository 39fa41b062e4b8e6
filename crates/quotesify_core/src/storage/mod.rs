//! Persistence collaborators.
//!
//! # Responsibility
//! - Restore the whole [`Library`] once at startup and persist it after
//!   mutating commands.
//! - Keep snapshot format and location private to each implementation.
//!
//! # Invariants
//! - `save` replaces the previous snapshot atomically: readers observe either
//!   the old or the new snapshot, never a mix.
//! - `load` returns a library whose links are consistent on both sides.

use crate::library::Library;
use std::path::PathBuf;
use thiserror::Error;

mod json_file;
mod memory;
mod sqlite;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use sqlite::{SqliteStorage, SCHEMA_VERSION};

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid snapshot json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("not saving to {0}: its snapshot could not be loaded; move it aside or confirm overwrite")]
    SaveBlocked(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Snapshot/restore interface used by the session.
pub trait Storage {
    /// Restores every collection. A missing snapshot yields an empty library.
    fn load(&self) -> StorageResult<Library>;

    /// Persists every collection.
    fn save(&self, library: &Library) -> StorageResult<()>;

    /// Short human-readable location for logs.
    fn describe(&self) -> String;
}

impl<T: Storage + ?Sized> Storage for Box<T> {
    fn load(&self) -> StorageResult<Library> {
        (**self).load()
    }

    fn save(&self, library: &Library) -> StorageResult<()> {
        (**self).save(library)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Backend selection derived from the data file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Json,
    Sqlite,
}

impl StorageBackend {
    pub fn for_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("db" | "sqlite" | "sqlite3") => Self::Sqlite,
            _ => Self::Json,
        }
    }
}

/// Opens the storage matching `path`'s extension.
pub fn open_storage(path: impl Into<PathBuf>) -> Box<dyn Storage> {
    let path = path.into();
    match StorageBackend::for_path(&path) {
        StorageBackend::Sqlite => Box::new(SqliteStorage::new(path)),
        StorageBackend::Json => Box::new(JsonFileStorage::new(path)),
    }
}
