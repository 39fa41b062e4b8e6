//! `delete <type> <payload>` handlers.
//!
//! Cascades (rating and bookmark of a deleted book, memberships of a deleted
//! category) are silent: a missing dependent is not an error.

use super::{merge_steps, Report};
use crate::error::{CommandError, CommandResult};
use crate::library::Library;
use crate::list::{EntityList, ListKind};
use crate::model::category::CategoryId;
use crate::parser::grammar::{parse_category_args, parse_index, to_index, tokenize, BOOK_DELETE};

pub(super) fn execute(
    kind: ListKind,
    payload: &str,
    library: &mut Library,
) -> CommandResult<Vec<Report>> {
    match kind {
        ListKind::Book => delete_book(payload, library).map(|report| vec![report]),
        ListKind::Quote => delete_quote(payload, library).map(|report| vec![report]),
        ListKind::Category => delete_category(payload, library),
        ListKind::Rating => delete_rating(payload, library).map(|report| vec![report]),
        ListKind::ToDo => delete_todo(payload, library).map(|report| vec![report]),
        ListKind::Bookmark => delete_bookmark(payload, library).map(|report| vec![report]),
    }
}

/// Requires both title and author so same-titled entries stay unambiguous.
fn delete_book(payload: &str, library: &mut Library) -> CommandResult<Report> {
    let fields = tokenize(&BOOK_DELETE, payload)?;
    let title = fields.head();
    let author = fields.required("author")?;
    let index = library
        .books
        .position_by_title_and_author(title, author)
        .ok_or_else(|| CommandError::not_found(ListKind::Book, format!("{title} by {author}")))?;

    let book = library.remove_book_at(index)?;
    Ok(Report::BookDeleted(book))
}

fn delete_quote(payload: &str, library: &mut Library) -> CommandResult<Report> {
    let raw = payload.trim();
    if raw.is_empty() {
        return Err(CommandError::MissingRequiredField("quote number"));
    }
    let index = parse_index(raw, ListKind::Quote, library.quotes.len())?;
    let quote = library.remove_quote_at(index)?;
    Ok(Report::QuoteDeleted(quote))
}

/// Without a book or quote target the whole category goes; otherwise only
/// the supplied sides are untagged.
fn delete_category(payload: &str, library: &mut Library) -> CommandResult<Vec<Report>> {
    let args = parse_category_args(payload)?;
    let category_id = library
        .categories
        .find_by_name(&args.name)
        .map(|category| category.id)
        .ok_or_else(|| CommandError::not_found(ListKind::Category, args.name.as_str()))?;

    if args.targets_nothing() {
        library.remove_category(category_id);
        return Ok(vec![Report::CategoryDeleted(args.name)]);
    }

    let mut steps = Vec::new();
    if let Some(title) = args.book_title.as_deref() {
        steps.push(untag_book(library, category_id, &args.name, title));
    }
    if let Some(number) = args.quote_number {
        steps.push(untag_quote(library, category_id, &args.name, number));
    }
    merge_steps(steps)
}

fn untag_book(
    library: &mut Library,
    category_id: CategoryId,
    category: &str,
    title: &str,
) -> CommandResult<Report> {
    let book_id = library
        .books
        .find_by_title(title)
        .filter(|book| book.category == Some(category_id))
        .map(|book| book.id)
        .ok_or_else(|| CommandError::NotTagged {
            kind: ListKind::Book,
            key: title.to_string(),
            category: category.to_string(),
        })?;

    library.unlink_book(book_id, category_id);
    Ok(Report::CategoryRemovedFromBook {
        category: category.to_string(),
        title: title.to_string(),
    })
}

fn untag_quote(
    library: &mut Library,
    category_id: CategoryId,
    category: &str,
    number: i64,
) -> CommandResult<Report> {
    let index =
        to_index(number, library.quotes.len()).ok_or(CommandError::InvalidQuoteIndex(number))?;
    let quote = library.quotes.get(index)?;
    if quote.category != Some(category_id) {
        return Err(CommandError::NotTagged {
            kind: ListKind::Quote,
            key: number.to_string(),
            category: category.to_string(),
        });
    }

    let (quote_id, text) = (quote.id, quote.text.clone());
    library.unlink_quote(quote_id, category_id);
    Ok(Report::CategoryRemovedFromQuote {
        category: category.to_string(),
        quote: text,
    })
}

fn delete_rating(payload: &str, library: &mut Library) -> CommandResult<Report> {
    let title = payload.trim();
    if title.is_empty() {
        return Err(CommandError::MissingRequiredField("book title"));
    }
    library
        .ratings
        .remove_by_title(title)
        .ok_or_else(|| CommandError::not_found(ListKind::Rating, title))?;
    Ok(Report::RatingDeleted(title.to_string()))
}

fn delete_todo(payload: &str, library: &mut Library) -> CommandResult<Report> {
    let raw = payload.trim();
    if raw.is_empty() {
        return Err(CommandError::MissingRequiredField("todo number"));
    }
    let index = parse_index(raw, ListKind::ToDo, library.todos.len())?;
    let todo = library.todos.delete_by_index(index)?;
    Ok(Report::ToDoDeleted(todo))
}

fn delete_bookmark(payload: &str, library: &mut Library) -> CommandResult<Report> {
    let title = payload.trim();
    if title.is_empty() {
        return Err(CommandError::MissingRequiredField("book title"));
    }
    let book_id = library
        .books
        .find_by_title(title)
        .map(|book| book.id)
        .ok_or_else(|| CommandError::not_found(ListKind::Book, title))?;
    let bookmark = library
        .bookmarks
        .remove_by_book(book_id)
        .ok_or_else(|| CommandError::not_found(ListKind::Bookmark, title))?;
    Ok(Report::BookmarkDeleted {
        title: title.to_string(),
        page: bookmark.page,
    })
}
