//! Command session: registry + persistence wiring for one shell run.
//!
//! # Responsibility
//! - Restore the library once before the first command.
//! - Parse, execute and persist one input line at a time.
//!
//! # Invariants
//! - `save` runs after every successful mutating command; its failure is
//!   reported alongside the command result and never rolls back memory.
//! - After a failed `load`, `save` is refused until `confirm_overwrite`, so an
//!   unreadable snapshot is never replaced by the empty fallback library.

use crate::command::Report;
use crate::error::CommandResult;
use crate::library::Library;
use crate::parser::parse_command;
use crate::registry::{ListRegistry, RegistryResult};
use crate::storage::{Storage, StorageError, StorageResult};
use log::{error, info, warn};

/// Result of handling one input line.
#[derive(Debug)]
pub enum LineOutcome {
    /// Unknown verb or blank line.
    Invalid,
    Executed {
        result: CommandResult<Vec<Report>>,
        /// Set when the follow-up save failed.
        save_error: Option<StorageError>,
        exit: bool,
    },
}

impl LineOutcome {
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Executed { exit: true, .. })
    }
}

pub struct Session<S: Storage> {
    registry: ListRegistry,
    storage: S,
    load_failed: bool,
}

impl<S: Storage> Session<S> {
    /// Creates a session with an uninitialised registry.
    pub fn new(storage: S) -> Self {
        Self {
            registry: ListRegistry::new(),
            storage,
            load_failed: false,
        }
    }

    /// Initialises the registry from storage.
    ///
    /// On failure the registry still starts, empty, so the shell stays usable;
    /// the error is returned for reporting and saving stays blocked.
    pub fn load(&mut self) -> StorageResult<()> {
        match self.storage.load() {
            Ok(library) => {
                self.registry.initialise_with(library);
                self.load_failed = false;
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=session_load module=session status=error storage={} error={}",
                    self.storage.describe(),
                    err
                );
                self.registry.initialise();
                self.load_failed = true;
                Err(err)
            }
        }
    }

    pub fn handle_line(&mut self, line: &str) -> LineOutcome {
        let Some(command) = parse_command(line) else {
            info!("event=command_parse module=session status=invalid");
            return LineOutcome::Invalid;
        };

        let result = command.execute(&mut self.registry);
        let save_error = if command.is_mutating() && result.is_ok() {
            self.save().err()
        } else {
            None
        };

        LineOutcome::Executed {
            result,
            save_error,
            exit: command.is_exit(),
        }
    }

    /// Persists the current library.
    ///
    /// # Errors
    /// - `SaveBlocked` after a failed `load` that was not confirmed.
    pub fn save(&self) -> StorageResult<()> {
        if self.load_failed {
            warn!(
                "event=storage_save module=session status=blocked storage={}",
                self.storage.describe()
            );
            return Err(StorageError::SaveBlocked(self.storage.describe()));
        }
        let library = self
            .registry
            .library()
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;
        self.storage.save(library).inspect_err(|err| {
            error!(
                "event=storage_save module=session status=error storage={} error={}",
                self.storage.describe(),
                err
            );
        })
    }

    /// Allows saves to replace a snapshot that failed to load.
    pub fn confirm_overwrite(&mut self) {
        if self.load_failed {
            warn!(
                "event=storage_overwrite module=session status=confirmed storage={}",
                self.storage.describe()
            );
        }
        self.load_failed = false;
    }

    pub fn is_save_blocked(&self) -> bool {
        self.load_failed
    }

    pub fn registry(&self) -> &ListRegistry {
        &self.registry
    }

    pub fn library(&self) -> RegistryResult<&Library> {
        self.registry.library()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
