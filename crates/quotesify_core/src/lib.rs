//! Core domain logic for Quotesify.
//! This crate owns the entity model, its cross-reference invariants and the
//! command interpreter that mutates it.

pub mod command;
pub mod config;
pub mod error;
pub mod library;
pub mod list;
pub mod logging;
pub mod model;
pub mod parser;
pub mod registry;
pub mod session;
pub mod storage;

pub use command::{BookmarkEntry, CategorySummary, Report};
pub use config::{AppConfig, ConfigError};
pub use error::{CommandError, CommandResult};
pub use library::Library;
pub use list::{
    BookList, BookmarkList, CategoryList, EntityList, ListError, ListKind, QuoteList, RatingList,
    ToDoList,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{Author, Book, BookId};
pub use model::bookmark::Bookmark;
pub use model::category::{Category, CategoryId};
pub use model::quote::{Quote, QuoteId};
pub use model::rating::Rating;
pub use model::todo::ToDo;
pub use parser::{parse_command, Command, TypedArgs};
pub use registry::{ListRegistry, ListView, RegistryError};
pub use session::{LineOutcome, Session};
pub use storage::{
    open_storage, JsonFileStorage, MemoryStorage, SqliteStorage, Storage, StorageBackend,
    StorageError, StorageResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
