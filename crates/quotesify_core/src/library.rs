//! Entity arena and cross-reference maintenance.
//!
//! # Responsibility
//! - Hold exactly one collection of each kind.
//! - Own every operation that touches both sides of a link or cascades a
//!   removal across collections.
//!
//! # Invariants
//! - `book.category == Some(c)` iff `c.books` contains `book.id` (same for
//!   quotes).
//! - Removing a Book clears its category membership, its rating (keyed on the
//!   exact title) and its bookmark.
//! - Removing a Category clears the `category` field of every member.

use crate::list::{
    BookList, BookmarkList, CategoryList, EntityList, ListResult, QuoteList, RatingList, ToDoList,
};
use crate::model::book::{Book, BookId};
use crate::model::category::{Category, CategoryId};
use crate::model::quote::{Quote, QuoteId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub(crate) books: BookList,
    #[serde(default)]
    pub(crate) quotes: QuoteList,
    #[serde(default)]
    pub(crate) categories: CategoryList,
    #[serde(default)]
    pub(crate) ratings: RatingList,
    #[serde(default)]
    pub(crate) todos: ToDoList,
    #[serde(default)]
    pub(crate) bookmarks: BookmarkList,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn books(&self) -> &BookList {
        &self.books
    }

    pub fn quotes(&self) -> &QuoteList {
        &self.quotes
    }

    pub fn categories(&self) -> &CategoryList {
        &self.categories
    }

    pub fn ratings(&self) -> &RatingList {
        &self.ratings
    }

    pub fn todos(&self) -> &ToDoList {
        &self.todos
    }

    pub fn bookmarks(&self) -> &BookmarkList {
        &self.bookmarks
    }

    /// Tags `book` with `category`, moving it out of any previous category.
    ///
    /// Returns `false` without mutating anything when either id is unknown.
    pub fn link_book(&mut self, book: BookId, category: CategoryId) -> bool {
        if self.categories.find_by_id(category).is_none() {
            return false;
        }
        let previous = match self.books.find_by_id_mut(book) {
            Some(record) => record.category.replace(category),
            None => return false,
        };
        if let Some(old) = previous.filter(|old| *old != category) {
            if let Some(old) = self.categories.find_by_id_mut(old) {
                old.books.remove(&book);
            }
        }
        if let Some(target) = self.categories.find_by_id_mut(category) {
            target.books.insert(book);
        }
        true
    }

    /// Clears the link only when `book` is currently tagged with `category`.
    pub fn unlink_book(&mut self, book: BookId, category: CategoryId) -> bool {
        match self.books.find_by_id_mut(book) {
            Some(record) if record.category == Some(category) => record.category = None,
            _ => return false,
        }
        if let Some(target) = self.categories.find_by_id_mut(category) {
            target.books.remove(&book);
        }
        true
    }

    pub fn link_quote(&mut self, quote: QuoteId, category: CategoryId) -> bool {
        if self.categories.find_by_id(category).is_none() {
            return false;
        }
        let previous = match self.quotes.find_by_id_mut(quote) {
            Some(record) => record.category.replace(category),
            None => return false,
        };
        if let Some(old) = previous.filter(|old| *old != category) {
            if let Some(old) = self.categories.find_by_id_mut(old) {
                old.quotes.remove(&quote);
            }
        }
        if let Some(target) = self.categories.find_by_id_mut(category) {
            target.quotes.insert(quote);
        }
        true
    }

    pub fn unlink_quote(&mut self, quote: QuoteId, category: CategoryId) -> bool {
        match self.quotes.find_by_id_mut(quote) {
            Some(record) if record.category == Some(category) => record.category = None,
            _ => return false,
        }
        if let Some(target) = self.categories.find_by_id_mut(category) {
            target.quotes.remove(&quote);
        }
        true
    }

    /// Removes the book at 0-based `index` together with its dependents.
    pub fn remove_book_at(&mut self, index: usize) -> ListResult<Book> {
        let mut book = self.books.delete_by_index(index)?;
        if let Some(category) = book.category.take() {
            if let Some(category) = self.categories.find_by_id_mut(category) {
                category.books.remove(&book.id);
            }
        }
        self.ratings.remove_by_title(&book.title);
        self.bookmarks.remove_by_book(book.id);
        Ok(book)
    }

    /// Removes the quote at 0-based `index`, severing its category link.
    pub fn remove_quote_at(&mut self, index: usize) -> ListResult<Quote> {
        let mut quote = self.quotes.delete_by_index(index)?;
        if let Some(category) = quote.category.take() {
            if let Some(category) = self.categories.find_by_id_mut(category) {
                category.quotes.remove(&quote.id);
            }
        }
        Ok(quote)
    }

    /// Removes a whole category and untags every member.
    pub fn remove_category(&mut self, id: CategoryId) -> Option<Category> {
        let index = self
            .categories
            .items()
            .iter()
            .position(|category| category.id == id)?;
        let category = self.categories.delete_by_index(index).ok()?;
        for book in &category.books {
            if let Some(book) = self.books.find_by_id_mut(*book) {
                book.category = None;
            }
        }
        for quote in &category.quotes {
            if let Some(quote) = self.quotes.find_by_id_mut(*quote) {
                quote.category = None;
            }
        }
        Some(category)
    }

    /// Renames the book at 0-based `index`, carrying its rating to the new
    /// title. Returns the previous title.
    pub fn retitle_book(&mut self, index: usize, new_title: &str) -> ListResult<String> {
        let book = self.books.get_mut(index)?;
        let old_title = std::mem::replace(&mut book.title, new_title.to_string());
        if let Some(rating) = self.ratings.find_by_title_mut(&old_title) {
            rating.title = new_title.to_string();
        }
        Ok(old_title)
    }

    /// Whether every link is mirrored on both sides and no bookmark dangles.
    pub fn is_consistent(&self) -> bool {
        let books_ok = self.books.items().iter().all(|book| match book.category {
            Some(category) => self
                .categories
                .find_by_id(category)
                .is_some_and(|category| category.books.contains(&book.id)),
            None => true,
        });
        let quotes_ok = self.quotes.items().iter().all(|quote| match quote.category {
            Some(category) => self
                .categories
                .find_by_id(category)
                .is_some_and(|category| category.quotes.contains(&quote.id)),
            None => true,
        });
        let categories_ok = self.categories.items().iter().all(|category| {
            category.books.iter().all(|book| {
                self.books
                    .find_by_id(*book)
                    .is_some_and(|book| book.category == Some(category.id))
            }) && category.quotes.iter().all(|quote| {
                self.quotes
                    .find_by_id(*quote)
                    .is_some_and(|quote| quote.category == Some(category.id))
            })
        });
        let bookmarks_ok = self
            .bookmarks
            .items()
            .iter()
            .all(|bookmark| self.books.find_by_id(bookmark.book).is_some());
        books_ok && quotes_ok && categories_ok && bookmarks_ok
    }

    /// Rebuilds category membership from the Book/Quote side and drops
    /// references to missing records. Returns the number of repairs.
    ///
    /// Used after restoring a snapshot, whose two sides may disagree.
    pub fn repair_links(&mut self) -> usize {
        let mut repairs = 0;
        let known: Vec<CategoryId> = self.categories.items().iter().map(|c| c.id).collect();

        for book in self.books.items_mut() {
            if book.category.is_some_and(|id| !known.contains(&id)) {
                book.category = None;
                repairs += 1;
            }
        }
        for quote in self.quotes.items_mut() {
            if quote.category.is_some_and(|id| !known.contains(&id)) {
                quote.category = None;
                repairs += 1;
            }
        }

        let book_links: Vec<(BookId, CategoryId)> = self
            .books
            .items()
            .iter()
            .filter_map(|book| book.category.map(|category| (book.id, category)))
            .collect();
        let quote_links: Vec<(QuoteId, CategoryId)> = self
            .quotes
            .items()
            .iter()
            .filter_map(|quote| quote.category.map(|category| (quote.id, category)))
            .collect();

        for category in self.categories.items_mut() {
            let books: BTreeSet<BookId> = book_links
                .iter()
                .filter(|(_, owner)| *owner == category.id)
                .map(|(book, _)| *book)
                .collect();
            let quotes: BTreeSet<QuoteId> = quote_links
                .iter()
                .filter(|(_, owner)| *owner == category.id)
                .map(|(quote, _)| *quote)
                .collect();
            if category.books != books {
                category.books = books;
                repairs += 1;
            }
            if category.quotes != quotes {
                category.quotes = quotes;
                repairs += 1;
            }
        }

        let before = self.bookmarks.len();
        let book_ids: Vec<BookId> = self.books.items().iter().map(|book| book.id).collect();
        self.bookmarks
            .items_mut()
            .retain(|bookmark| book_ids.contains(&bookmark.book));
        repairs += before - self.bookmarks.len();

        repairs
    }
}
