//! Read-only `list`/`find` handlers and `done`.

use super::{BookmarkEntry, CategorySummary, Report};
use crate::error::{CommandError, CommandResult};
use crate::library::Library;
use crate::list::{EntityList, ListKind};
use crate::model::category::Category;
use crate::parser::grammar::parse_index;
use crate::parser::{VERB_DONE, VERB_FIND};

/// Lists one collection. Books and quotes accept an optional category name.
pub(super) fn list(
    kind: ListKind,
    payload: &str,
    library: &Library,
) -> CommandResult<Vec<Report>> {
    let filter = payload.trim();
    let category = if filter.is_empty() {
        None
    } else {
        Some(
            library
                .categories
                .find_by_name(filter)
                .map(|category| category.id)
                .ok_or_else(|| CommandError::not_found(ListKind::Category, filter))?,
        )
    };

    let report = match kind {
        ListKind::Book => Report::Books(match category {
            Some(category) => library.books.filter_by_category(category),
            None => library.books.items().to_vec(),
        }),
        ListKind::Quote => Report::Quotes(match category {
            Some(category) => library.quotes.filter_by_category(category),
            None => library.quotes.numbered_all(),
        }),
        ListKind::Category => {
            let categories: Vec<&Category> = match category {
                Some(category) => library.categories.find_by_id(category).into_iter().collect(),
                None => library.categories.items().iter().collect(),
            };
            Report::Categories(
                categories
                    .into_iter()
                    .map(|category| summarize(library, category))
                    .collect(),
            )
        }
        ListKind::Rating => Report::Ratings(library.ratings.items().to_vec()),
        ListKind::ToDo => Report::ToDos(
            library
                .todos
                .items()
                .iter()
                .enumerate()
                .map(|(index, todo)| (index + 1, todo.clone()))
                .collect(),
        ),
        ListKind::Bookmark => Report::Bookmarks(
            library
                .bookmarks
                .items()
                .iter()
                .filter_map(|bookmark| {
                    library.books.find_by_id(bookmark.book).map(|book| BookmarkEntry {
                        title: book.title.clone(),
                        page: bookmark.page,
                    })
                })
                .collect(),
        ),
    };
    Ok(vec![report])
}

/// Case-insensitive keyword search over books, quotes and categories.
pub(super) fn find(
    kind: ListKind,
    payload: &str,
    library: &Library,
) -> CommandResult<Vec<Report>> {
    let keyword = payload.trim();
    if keyword.is_empty() {
        return Err(CommandError::MissingRequiredField("keyword"));
    }
    let report = match kind {
        ListKind::Book => Report::Books(library.books.filter_by_keyword(keyword)),
        ListKind::Quote => Report::Quotes(library.quotes.filter_by_keyword(keyword)),
        ListKind::Category => Report::Categories(
            library
                .categories
                .filter_by_keyword(keyword)
                .iter()
                .map(|category| summarize(library, category))
                .collect(),
        ),
        ListKind::Rating | ListKind::ToDo | ListKind::Bookmark => {
            return Err(CommandError::UnsupportedOperation {
                verb: VERB_FIND,
                kind,
            })
        }
    };
    Ok(vec![report])
}

pub(super) fn done(
    kind: ListKind,
    payload: &str,
    library: &mut Library,
) -> CommandResult<Vec<Report>> {
    if kind != ListKind::ToDo {
        return Err(CommandError::UnsupportedOperation {
            verb: VERB_DONE,
            kind,
        });
    }
    let raw = payload.trim();
    if raw.is_empty() {
        return Err(CommandError::MissingRequiredField("todo number"));
    }
    let index = parse_index(raw, ListKind::ToDo, library.todos.len())?;
    let todo = library.todos.get_mut(index)?;
    todo.mark_done();
    Ok(vec![Report::ToDoCompleted {
        number: index + 1,
        todo: todo.clone(),
    }])
}

fn summarize(library: &Library, category: &Category) -> CategorySummary {
    CategorySummary {
        name: category.name.clone(),
        book_titles: library
            .books
            .items()
            .iter()
            .filter(|book| category.books.contains(&book.id))
            .map(|book| book.title.clone())
            .collect(),
        quotes: library
            .quotes
            .items()
            .iter()
            .filter(|quote| category.quotes.contains(&quote.id))
            .map(|quote| quote.text.clone())
            .collect(),
    }
}
