//! Page bookmarks.

use crate::model::book::BookId;
use serde::{Deserialize, Serialize};

/// Page marker for one book. At most one bookmark exists per `book`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub book: BookId,
    pub page: u32,
}

impl Bookmark {
    pub fn new(book: BookId, page: u32) -> Self {
        Self { book, page }
    }
}
