//! In-process storage for tests and ephemeral sessions.

use super::{Storage, StorageError, StorageResult};
use crate::library::Library;
use std::cell::{Cell, RefCell};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshot: RefCell<Option<Library>>,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing snapshot.
    pub fn with_snapshot(library: Library) -> Self {
        Self {
            snapshot: RefCell::new(Some(library)),
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Option<Library> {
        self.snapshot.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Makes every following `save` fail, to exercise error reporting.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> StorageResult<Library> {
        let mut library = self.snapshot.borrow().clone().unwrap_or_default();
        library.repair_links();
        Ok(library)
    }

    fn save(&self, library: &Library) -> StorageResult<()> {
        if self.fail_saves.get() {
            return Err(StorageError::Unavailable("memory storage is read-only".to_string()));
        }
        *self.snapshot.borrow_mut() = Some(library.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
