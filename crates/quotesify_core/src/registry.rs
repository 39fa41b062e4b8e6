//! Session-wide list registry.
//!
//! # Responsibility
//! - Hold the single [`Library`] of the running session.
//! - Address each collection by its [`ListKind`].
//!
//! # Invariants
//! - Collections are created once by `initialise`; later calls keep the
//!   existing state.
//! - Any access before initialisation fails with `RegistryError::NotInitialised`.

use crate::library::Library;
use crate::list::{
    BookList, BookmarkList, CategoryList, EntityList, ListKind, QuoteList, RatingList, ToDoList,
};
use log::{info, warn};
use thiserror::Error;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("list registry used before initialisation")]
    NotInitialised,
}

/// Borrowed view of one collection, selected by kind.
#[derive(Debug, Clone, Copy)]
pub enum ListView<'a> {
    Book(&'a BookList),
    Quote(&'a QuoteList),
    Category(&'a CategoryList),
    Rating(&'a RatingList),
    ToDo(&'a ToDoList),
    Bookmark(&'a BookmarkList),
}

impl ListView<'_> {
    pub fn kind(&self) -> ListKind {
        match self {
            Self::Book(_) => ListKind::Book,
            Self::Quote(_) => ListKind::Quote,
            Self::Category(_) => ListKind::Category,
            Self::Rating(_) => ListKind::Rating,
            Self::ToDo(_) => ListKind::ToDo,
            Self::Bookmark(_) => ListKind::Bookmark,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Book(list) => list.len(),
            Self::Quote(list) => list.len(),
            Self::Category(list) => list.len(),
            Self::Rating(list) => list.len(),
            Self::ToDo(list) => list.len(),
            Self::Bookmark(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct ListRegistry {
    library: Option<Library>,
}

impl ListRegistry {
    /// Creates an uninitialised registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates empty collections for every kind.
    pub fn initialise(&mut self) {
        if self.library.is_some() {
            warn!("event=registry_init module=registry status=skipped reason=already_initialised");
            return;
        }
        self.library = Some(Library::new());
        info!("event=registry_init module=registry status=ok source=empty");
    }

    /// Initialises from a restored snapshot, replacing nothing if already set.
    pub fn initialise_with(&mut self, library: Library) {
        if self.library.is_some() {
            warn!("event=registry_init module=registry status=skipped reason=already_initialised");
            return;
        }
        info!(
            "event=registry_init module=registry status=ok source=snapshot books={} quotes={}",
            library.books().len(),
            library.quotes().len()
        );
        self.library = Some(library);
    }

    pub fn is_initialised(&self) -> bool {
        self.library.is_some()
    }

    pub fn get(&self, kind: ListKind) -> RegistryResult<ListView<'_>> {
        let library = self.library()?;
        Ok(match kind {
            ListKind::Book => ListView::Book(library.books()),
            ListKind::Quote => ListView::Quote(library.quotes()),
            ListKind::Category => ListView::Category(library.categories()),
            ListKind::Rating => ListView::Rating(library.ratings()),
            ListKind::ToDo => ListView::ToDo(library.todos()),
            ListKind::Bookmark => ListView::Bookmark(library.bookmarks()),
        })
    }

    pub fn library(&self) -> RegistryResult<&Library> {
        self.library.as_ref().ok_or(RegistryError::NotInitialised)
    }

    pub fn library_mut(&mut self) -> RegistryResult<&mut Library> {
        self.library.as_mut().ok_or(RegistryError::NotInitialised)
    }
}

#[cfg(test)]
mod tests {
    use super::{ListRegistry, RegistryError};
    use crate::list::ListKind;

    #[test]
    fn get_before_initialise_fails() {
        let registry = ListRegistry::new();
        assert_eq!(
            registry.get(ListKind::Book).unwrap_err(),
            RegistryError::NotInitialised
        );
    }

    #[test]
    fn every_kind_is_addressable_after_initialise() {
        let mut registry = ListRegistry::new();
        registry.initialise();
        for kind in ListKind::ALL {
            let view = registry.get(kind).unwrap();
            assert_eq!(view.kind(), kind);
            assert!(view.is_empty());
        }
    }
}
