//! Success details handed to the presentation layer.

use crate::error::CommandError;
use crate::model::book::Book;
use crate::model::quote::Quote;
use crate::model::rating::Rating;
use crate::model::todo::ToDo;

/// Read model for one category in `list`/`find` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub book_titles: Vec<String>,
    pub quotes: Vec<String>,
}

/// Read model for one bookmark in `list` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkEntry {
    pub title: String,
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    BookAdded(Book),
    QuoteAdded { number: usize, quote: Quote },
    CategoryCreated(String),
    CategoryTaggedBook { category: String, title: String },
    CategoryTaggedQuote { category: String, quote: String },
    CategorySize { category: String, books: usize, quotes: usize },
    RatingAdded { score: u8, title: String },
    ToDoAdded { number: usize, todo: ToDo },
    BookmarkAdded { title: String, page: u32 },
    BookmarkUpdated { title: String, page: u32 },

    BookEdited { old_title: String, new_title: String },
    QuoteEdited { old: Quote, new: Quote },
    CategoryRenamed { old_name: String, new_name: String },
    RatingUpdated { score: u8, title: String },

    BookDeleted(Book),
    QuoteDeleted(Quote),
    CategoryDeleted(String),
    CategoryRemovedFromBook { category: String, title: String },
    CategoryRemovedFromQuote { category: String, quote: String },
    RatingDeleted(String),
    ToDoDeleted(ToDo),
    BookmarkDeleted { title: String, page: u32 },

    ToDoCompleted { number: usize, todo: ToDo },

    Books(Vec<Book>),
    Quotes(Vec<(usize, Quote)>),
    Categories(Vec<CategorySummary>),
    Ratings(Vec<Rating>),
    ToDos(Vec<(usize, ToDo)>),
    Bookmarks(Vec<BookmarkEntry>),

    /// A sub-step failed while the rest of the command applied.
    Warning(CommandError),
}

impl Report {
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }
}
