//! Category records.
//!
//! # Invariants
//! - `name` is unique inside [`crate::list::CategoryList`].
//! - `books`/`quotes` mirror the `category` field of the tagged records; both
//!   sides are only written through [`crate::library::Library`] link helpers.

use crate::model::book::BookId;
use crate::model::quote::QuoteId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

pub type CategoryId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Back-references into `BookList`. Set semantics: tagging twice is a no-op.
    #[serde(default)]
    pub books: BTreeSet<BookId>,
    #[serde(default)]
    pub quotes: BTreeSet<QuoteId>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            books: BTreeSet::new(),
            quotes: BTreeSet::new(),
        }
    }

    /// Number of tagged books plus tagged quotes.
    pub fn size(&self) -> usize {
        self.books.len() + self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.quotes.is_empty()
    }
}
