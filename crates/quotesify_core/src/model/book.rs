//! Book and author records.

use crate::model::category::CategoryId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a Book, independent of its (editable) title.
pub type BookId = Uuid;

/// Author of a book or quote. Owned by exactly one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A tracked book.
///
/// `title` is the lookup key inside [`crate::list::BookList`]; ratings refer to
/// a book through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: Author,
    /// Non-owning link; the owning side is `Category::books`.
    #[serde(default)]
    pub category: Option<CategoryId>,
}

impl Book {
    /// Creates an untagged book with a fresh id.
    pub fn new(title: impl Into<String>, author: Author) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            author,
            category: None,
        }
    }

    /// Exact, case-sensitive match on both title and author name.
    pub fn matches(&self, title: &str, author: &str) -> bool {
        self.title == title && self.author.name == author
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} by {}", self.title, self.author)
    }
}
