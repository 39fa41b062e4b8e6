//! `edit <type> <payload>` handlers.
//!
//! Every handler validates the full request before its first write, so a
//! rejected edit leaves the library untouched.

use super::Report;
use crate::error::{CommandError, CommandResult};
use crate::library::Library;
use crate::list::{EntityList, ListKind};
use crate::model::book::Author;
use crate::model::rating::is_valid_score;
use crate::parser::grammar::{
    parse_index, parse_rating_args, tokenize, BOOK_EDIT, CATEGORY_EDIT, QUOTE_EDIT,
};
use crate::parser::VERB_EDIT;

pub(super) fn execute(
    kind: ListKind,
    payload: &str,
    library: &mut Library,
) -> CommandResult<Vec<Report>> {
    let report = match kind {
        ListKind::Book => edit_book(payload, library)?,
        ListKind::Quote => edit_quote(payload, library)?,
        ListKind::Category => edit_category(payload, library)?,
        ListKind::Rating => edit_rating(payload, library)?,
        ListKind::ToDo | ListKind::Bookmark => {
            return Err(CommandError::UnsupportedOperation {
                verb: VERB_EDIT,
                kind,
            })
        }
    };
    Ok(vec![report])
}

fn edit_book(payload: &str, library: &mut Library) -> CommandResult<Report> {
    let fields = tokenize(&BOOK_EDIT, payload)?;
    let new_title = fields.required("new title")?;
    let index = parse_index(fields.head(), ListKind::Book, library.books.len())?;
    if library
        .books
        .position_by_title(new_title)
        .is_some_and(|existing| existing != index)
    {
        return Err(CommandError::DuplicateBook(new_title.to_string()));
    }

    let old_title = library.retitle_book(index, new_title)?;
    Ok(Report::BookEdited {
        old_title,
        new_title: new_title.to_string(),
    })
}

/// Replaces text, reference and author of one quote; id and category stay.
fn edit_quote(payload: &str, library: &mut Library) -> CommandResult<Report> {
    let fields = tokenize(&QUOTE_EDIT, payload)?;
    let text = fields.required("quote")?;
    let index = parse_index(fields.head(), ListKind::Quote, library.quotes.len())?;

    let quote = library.quotes.get_mut(index)?;
    let old = quote.clone();
    quote.text = text.to_string();
    quote.reference = fields.optional_owned("reference");
    quote.author = fields.get("author").map(Author::new);
    Ok(Report::QuoteEdited {
        old,
        new: quote.clone(),
    })
}

fn edit_category(payload: &str, library: &mut Library) -> CommandResult<Report> {
    let fields = tokenize(&CATEGORY_EDIT, payload)?;
    let old_name = fields.head();
    let new_name = fields.required("new category name")?;
    if !library.categories.exists(old_name) {
        return Err(CommandError::not_found(ListKind::Category, old_name));
    }
    // Category payloads take the name from the first token only.
    if new_name.contains(char::is_whitespace) {
        return Err(CommandError::InvalidCategoryName(new_name.to_string()));
    }
    if library.categories.exists(new_name) {
        return Err(CommandError::CategoryNameCollision(new_name.to_string()));
    }

    let category = library
        .categories
        .find_by_name_mut(old_name)
        .ok_or_else(|| CommandError::not_found(ListKind::Category, old_name))?;
    category.name = new_name.to_string();
    Ok(Report::CategoryRenamed {
        old_name: old_name.to_string(),
        new_name: new_name.to_string(),
    })
}

fn edit_rating(payload: &str, library: &mut Library) -> CommandResult<Report> {
    let args = parse_rating_args(payload)?;
    if !is_valid_score(args.score) {
        return Err(CommandError::InvalidScore(args.score));
    }
    let rating = library
        .ratings
        .find_by_title_mut(&args.title)
        .ok_or_else(|| CommandError::not_found(ListKind::Rating, args.title.as_str()))?;
    rating.set_score(args.score);
    Ok(Report::RatingUpdated {
        score: rating.score,
        title: rating.title.clone(),
    })
}
