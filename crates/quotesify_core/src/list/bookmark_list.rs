use super::{EntityList, ListKind};
use crate::model::book::BookId;
use crate::model::bookmark::Bookmark;
use serde::{Deserialize, Serialize};

/// Bookmarks, at most one per book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkList {
    bookmarks: Vec<Bookmark>,
}

impl EntityList for BookmarkList {
    type Item = Bookmark;

    const KIND: ListKind = ListKind::Bookmark;

    fn items(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    fn items_mut(&mut self) -> &mut Vec<Bookmark> {
        &mut self.bookmarks
    }
}

impl BookmarkList {
    pub fn find_by_book(&self, book: BookId) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|bookmark| bookmark.book == book)
    }

    pub fn find_by_book_mut(&mut self, book: BookId) -> Option<&mut Bookmark> {
        self.bookmarks
            .iter_mut()
            .find(|bookmark| bookmark.book == book)
    }

    pub fn remove_by_book(&mut self, book: BookId) -> Option<Bookmark> {
        let index = self
            .bookmarks
            .iter()
            .position(|bookmark| bookmark.book == book)?;
        Some(self.bookmarks.remove(index))
    }
}
