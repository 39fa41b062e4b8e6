//! Ordered entity collections.
//!
//! # Responsibility
//! - Own every entity of one kind in insertion order.
//! - Provide index and key lookups used by command handlers.
//!
//! # Invariants
//! - Insertion order defines the user-facing 1-based index.
//! - Removing an element shifts every later element down by one; callers must
//!   re-resolve indices after any deletion.
//! - Cross-collection cascades live in [`crate::library::Library`], never here.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

mod book_list;
mod bookmark_list;
mod category_list;
mod quote_list;
mod rating_list;
mod todo_list;

pub use book_list::BookList;
pub use bookmark_list::BookmarkList;
pub use category_list::CategoryList;
pub use quote_list::QuoteList;
pub use rating_list::RatingList;
pub use todo_list::ToDoList;

pub type ListResult<T> = Result<T, ListError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("index {index} is out of range for {kind} list of size {len}")]
    OutOfRange {
        kind: ListKind,
        index: usize,
        len: usize,
    },
}

/// Closed set of collection kinds, also used as the command type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Book,
    Quote,
    Category,
    Rating,
    ToDo,
    Bookmark,
}

impl ListKind {
    pub const ALL: [ListKind; 6] = [
        Self::Book,
        Self::Quote,
        Self::Category,
        Self::Rating,
        Self::ToDo,
        Self::Bookmark,
    ];

    /// Type tag as typed by users.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Quote => "quote",
            Self::Category => "category",
            Self::Rating => "rating",
            Self::ToDo => "todo",
            Self::Bookmark => "bookmark",
        }
    }
}

impl Display for ListKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for ListKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_tag() == value)
            .ok_or_else(|| value.to_string())
    }
}

/// Shared contract of every ordered collection.
pub trait EntityList {
    type Item;

    const KIND: ListKind;

    fn items(&self) -> &[Self::Item];

    fn items_mut(&mut self) -> &mut Vec<Self::Item>;

    /// Appends `item`, preserving insertion order.
    fn add(&mut self, item: Self::Item) {
        self.items_mut().push(item);
    }

    fn len(&self) -> usize {
        self.items().len()
    }

    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Returns the element at 0-based `index`.
    fn get(&self, index: usize) -> ListResult<&Self::Item> {
        let len = self.len();
        self.items().get(index).ok_or(ListError::OutOfRange {
            kind: Self::KIND,
            index,
            len,
        })
    }

    fn get_mut(&mut self, index: usize) -> ListResult<&mut Self::Item> {
        let len = self.len();
        self.items_mut()
            .get_mut(index)
            .ok_or(ListError::OutOfRange {
                kind: Self::KIND,
                index,
                len,
            })
    }

    /// Removes and returns the element at 0-based `index`.
    fn delete_by_index(&mut self, index: usize) -> ListResult<Self::Item> {
        let len = self.len();
        if index >= len {
            return Err(ListError::OutOfRange {
                kind: Self::KIND,
                index,
                len,
            });
        }
        Ok(self.items_mut().remove(index))
    }

    /// Removes the first element equal to `item`; returns whether one was removed.
    fn delete_by_value(&mut self, item: &Self::Item) -> bool
    where
        Self::Item: PartialEq,
    {
        match self.items().iter().position(|candidate| candidate == item) {
            Some(index) => {
                self.items_mut().remove(index);
                true
            }
            None => false,
        }
    }
}

/// Case-insensitive substring match used by `find`.
pub(crate) fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    haystack.to_lowercase().contains(&keyword.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{EntityList, ListError, ListKind, ToDoList};
    use crate::model::todo::ToDo;

    #[test]
    fn kind_tags_round_trip() {
        for kind in ListKind::ALL {
            assert_eq!(kind.as_tag().parse::<ListKind>().unwrap(), kind);
        }
        assert!("Book".parse::<ListKind>().is_err());
    }

    #[test]
    fn delete_by_index_shifts_later_elements() {
        let mut todos = ToDoList::default();
        todos.add(ToDo::new("first", None));
        todos.add(ToDo::new("second", None));
        todos.add(ToDo::new("third", None));

        let removed = todos.delete_by_index(0).unwrap();
        assert_eq!(removed.description, "first");
        assert_eq!(todos.get(0).unwrap().description, "second");
        assert_eq!(todos.get(1).unwrap().description, "third");
    }

    #[test]
    fn get_out_of_range_reports_size() {
        let todos = ToDoList::default();
        let err = todos.get(0).unwrap_err();
        assert_eq!(
            err,
            ListError::OutOfRange {
                kind: ListKind::ToDo,
                index: 0,
                len: 0
            }
        );
    }

    #[test]
    fn delete_by_value_removes_only_first_match() {
        let mut todos = ToDoList::default();
        todos.add(ToDo::new("same", None));
        todos.add(ToDo::new("same", None));
        assert!(todos.delete_by_value(&ToDo::new("same", None)));
        assert_eq!(todos.len(), 1);
        assert!(!todos.delete_by_value(&ToDo::new("missing", None)));
    }
}
