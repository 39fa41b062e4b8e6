use super::{contains_keyword, EntityList, ListKind};
use crate::model::book::{Book, BookId};
use crate::model::category::CategoryId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookList {
    books: Vec<Book>,
}

impl EntityList for BookList {
    type Item = Book;

    const KIND: ListKind = ListKind::Book;

    fn items(&self) -> &[Book] {
        &self.books
    }

    fn items_mut(&mut self) -> &mut Vec<Book> {
        &mut self.books
    }
}

impl BookList {
    /// Exact, case-sensitive title lookup.
    pub fn find_by_title(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.title == title)
    }

    pub fn position_by_title(&self, title: &str) -> Option<usize> {
        self.books.iter().position(|book| book.title == title)
    }

    pub fn position_by_title_and_author(&self, title: &str, author: &str) -> Option<usize> {
        self.books.iter().position(|book| book.matches(title, author))
    }

    pub fn find_by_id(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: BookId) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| book.id == id)
    }

    pub fn position_by_id(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    /// Books whose title or author contains `keyword`, ignoring case.
    pub fn filter_by_keyword(&self, keyword: &str) -> Vec<Book> {
        self.books
            .iter()
            .filter(|book| {
                contains_keyword(&book.title, keyword) || contains_keyword(&book.author.name, keyword)
            })
            .cloned()
            .collect()
    }

    pub fn filter_by_category(&self, category: CategoryId) -> Vec<Book> {
        self.books
            .iter()
            .filter(|book| book.category == Some(category))
            .cloned()
            .collect()
    }
}
