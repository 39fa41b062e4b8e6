//! JSON snapshot file.

use super::{Storage, StorageError, StorageResult};
use crate::library::Library;
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> StorageResult<Library> {
        let started_at = Instant::now();
        if !self.path.exists() {
            info!(
                "event=storage_load module=storage status=ok backend=json snapshot=missing path={}",
                self.path.display()
            );
            return Ok(Library::new());
        }

        let content =
            fs::read_to_string(&self.path).map_err(|err| StorageError::io(&self.path, err))?;
        let mut library: Library = serde_json::from_str(&content).map_err(|err| {
            error!(
                "event=storage_load module=storage status=error backend=json error_code=invalid_json error={}",
                err
            );
            StorageError::from(err)
        })?;

        let repairs = library.repair_links();
        if repairs > 0 {
            warn!(
                "event=storage_load module=storage status=repaired backend=json repairs={}",
                repairs
            );
        }
        info!(
            "event=storage_load module=storage status=ok backend=json duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(library)
    }

    /// Writes a sibling temp file, then renames it over the snapshot.
    fn save(&self, library: &Library) -> StorageResult<()> {
        let started_at = Instant::now();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;
        }

        let content = serde_json::to_string_pretty(library)?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, content).map_err(|err| StorageError::io(&temp_path, err))?;
        fs::rename(&temp_path, &self.path).map_err(|err| StorageError::io(&self.path, err))?;

        info!(
            "event=storage_save module=storage status=ok backend=json duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}
