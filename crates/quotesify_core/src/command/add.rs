//! `add <type> <payload>` handlers.

use super::Report;
use crate::error::{CommandError, CommandResult};
use crate::library::Library;
use crate::list::{EntityList, ListKind};
use crate::model::book::{Author, Book};
use crate::model::bookmark::Bookmark;
use crate::model::quote::Quote;
use crate::model::rating::{is_valid_score, Rating};
use crate::model::todo::ToDo;
use crate::parser::grammar::{
    parse_category_args, parse_integer, parse_rating_args, to_index, tokenize, BOOKMARK_ADD,
    BOOK_ADD, QUOTE_ADD, TODO_ADD,
};

pub(super) fn execute(
    kind: ListKind,
    payload: &str,
    library: &mut Library,
) -> CommandResult<Vec<Report>> {
    match kind {
        ListKind::Book => add_book(payload, library).map(|report| vec![report]),
        ListKind::Quote => add_quote(payload, library).map(|report| vec![report]),
        ListKind::Category => add_category(payload, library),
        ListKind::Rating => add_rating(payload, library).map(|report| vec![report]),
        ListKind::ToDo => add_todo(payload, library).map(|report| vec![report]),
        ListKind::Bookmark => add_bookmark(payload, library).map(|report| vec![report]),
    }
}

fn add_book(payload: &str, library: &mut Library) -> CommandResult<Report> {
    let fields = tokenize(&BOOK_ADD, payload)?;
    let title = fields.head();
    let author = fields.required("author")?;
    if library.books.find_by_title(title).is_some() {
        return Err(CommandError::DuplicateBook(title.to_string()));
    }

    let book = Book::new(title, Author::new(author));
    library.books.add(book.clone());
    Ok(Report::BookAdded(book))
}

fn add_quote(payload: &str, library: &mut Library) -> CommandResult<Report> {
    let fields = tokenize(&QUOTE_ADD, payload)?;
    let quote = Quote::new(
        fields.head(),
        fields.optional_owned("reference"),
        fields.get("author").map(Author::new),
    );
    library.quotes.add(quote.clone());
    Ok(Report::QuoteAdded {
        number: library.quotes.len(),
        quote,
    })
}

/// Get-or-creates the category, then applies the book and quote links
/// independently: a bad quote number does not undo the book link.
fn add_category(payload: &str, library: &mut Library) -> CommandResult<Vec<Report>> {
    let args = parse_category_args(payload)?;
    let (category_id, created) = library.categories.get_or_create(&args.name);

    let mut reports = Vec::new();
    if created {
        reports.push(Report::CategoryCreated(args.name.clone()));
    }

    if let Some(title) = args.book_title.as_deref() {
        match library.books.find_by_title(title).map(|book| book.id) {
            Some(book_id) => {
                library.link_book(book_id, category_id);
                reports.push(Report::CategoryTaggedBook {
                    category: args.name.clone(),
                    title: title.to_string(),
                });
            }
            None => reports.push(Report::Warning(CommandError::not_found(
                ListKind::Book,
                title,
            ))),
        }
    }

    if let Some(number) = args.quote_number {
        let quote = to_index(number, library.quotes.len())
            .and_then(|index| library.quotes.get(index).ok())
            .map(|quote| (quote.id, quote.text.clone()));
        match quote {
            Some((quote_id, text)) => {
                library.link_quote(quote_id, category_id);
                reports.push(Report::CategoryTaggedQuote {
                    category: args.name.clone(),
                    quote: text,
                });
            }
            None => reports.push(Report::Warning(CommandError::InvalidQuoteIndex(number))),
        }
    }

    if let Some(category) = library.categories.find_by_id(category_id) {
        reports.push(Report::CategorySize {
            category: category.name.clone(),
            books: category.books.len(),
            quotes: category.quotes.len(),
        });
    }
    Ok(reports)
}

fn add_rating(payload: &str, library: &mut Library) -> CommandResult<Report> {
    let args = parse_rating_args(payload)?;
    if !is_valid_score(args.score) {
        return Err(CommandError::InvalidScore(args.score));
    }
    if library.ratings.is_rated(&args.title) {
        return Err(CommandError::DuplicateRating(args.title));
    }
    if library.books.find_by_title(&args.title).is_none() {
        return Err(CommandError::not_found(ListKind::Book, args.title));
    }

    let rating =
        Rating::new(args.score, args.title.as_str()).ok_or(CommandError::InvalidScore(args.score))?;
    let report = Report::RatingAdded {
        score: rating.score,
        title: rating.title.clone(),
    };
    library.ratings.add(rating);
    Ok(report)
}

fn add_todo(payload: &str, library: &mut Library) -> CommandResult<Report> {
    let fields = tokenize(&TODO_ADD, payload)?;
    let todo = ToDo::new(fields.head(), fields.optional_owned("deadline"));
    library.todos.add(todo.clone());
    Ok(Report::ToDoAdded {
        number: library.todos.len(),
        todo,
    })
}

/// Adds a bookmark, or moves the existing one: a book has at most one.
fn add_bookmark(payload: &str, library: &mut Library) -> CommandResult<Report> {
    let fields = tokenize(&BOOKMARK_ADD, payload)?;
    let title = fields.head();
    let raw_page = fields.required("page")?;
    let page = parse_integer(raw_page).and_then(|page| {
        u32::try_from(page).map_err(|_| CommandError::InvalidNumberFormat(raw_page.to_string()))
    })?;
    let book_id = library
        .books
        .find_by_title(title)
        .map(|book| book.id)
        .ok_or_else(|| CommandError::not_found(ListKind::Book, title))?;

    if let Some(bookmark) = library.bookmarks.find_by_book_mut(book_id) {
        bookmark.page = page;
        return Ok(Report::BookmarkUpdated {
            title: title.to_string(),
            page,
        });
    }
    library.bookmarks.add(Bookmark::new(book_id, page));
    Ok(Report::BookmarkAdded {
        title: title.to_string(),
        page,
    })
}
