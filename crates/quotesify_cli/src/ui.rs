//! Text presentation of command outcomes.

use quotesify_core::{
    Book, BookmarkEntry, CategorySummary, CommandError, LineOutcome, Quote, Rating, Report, ToDo,
};
use std::io::{self, Write};

const DIVIDER: &str = "____________________________________________________________";

#[derive(Debug, Default)]
pub struct TextUi;

impl TextUi {
    pub fn new() -> Self {
        Self
    }

    pub fn print_welcome(&self) {
        println!("{DIVIDER}");
        println!("Welcome to Quotesify! What would you like to do?");
        println!("{DIVIDER}");
        self.print_prompt();
    }

    pub fn print_goodbye(&self) {
        println!("Goodbye! See you again soon.");
    }

    pub fn print_prompt(&self) {
        print!("> ");
        let _ = io::stdout().flush();
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("Error: {message}");
    }

    pub fn print_outcome(&self, outcome: &LineOutcome) {
        for line in render_outcome(outcome) {
            println!("{line}");
        }
    }
}

pub fn render_outcome(outcome: &LineOutcome) -> Vec<String> {
    match outcome {
        LineOutcome::Invalid => vec!["Sorry, that is not a valid command.".to_string()],
        LineOutcome::Executed {
            result,
            save_error,
            ..
        } => {
            let mut lines = match result {
                Ok(reports) => reports.iter().flat_map(render_report).collect(),
                Err(err) => vec![render_error(err)],
            };
            if let Some(err) = save_error {
                lines.push(format!("Warning: changes were not saved ({err})"));
            }
            lines
        }
    }
}

pub fn render_error(err: &CommandError) -> String {
    format!("Error: {err}")
}

pub fn render_report(report: &Report) -> Vec<String> {
    match report {
        Report::BookAdded(book) => vec![format!("The book [{book}] has been added!")],
        Report::QuoteAdded { number, quote } => {
            vec![format!("Quote {number} added: {}", render_quote(quote))]
        }
        Report::CategoryCreated(name) => vec![format!("Category [{name}] created.")],
        Report::CategoryTaggedBook { category, title } => {
            vec![format!("I have tagged [{category}] to the book [{title}]!")]
        }
        Report::CategoryTaggedQuote { category, quote } => {
            vec![format!("I have tagged [{category}] to the quote \"{quote}\"!")]
        }
        Report::CategorySize {
            category,
            books,
            quotes,
        } => vec![format!(
            "[{category}] now holds {books} book(s) and {quotes} quote(s)."
        )],
        Report::RatingAdded { score, title } => {
            vec![format!("You have just rated [{title}] {score} star!")]
        }
        Report::ToDoAdded { number, todo } => {
            vec![format!("To-do {number} added: {}", render_todo(todo))]
        }
        Report::BookmarkAdded { title, page } => {
            vec![format!("Bookmark added to [{title}] at page {page}.")]
        }
        Report::BookmarkUpdated { title, page } => {
            vec![format!("Bookmark of [{title}] moved to page {page}.")]
        }
        Report::BookEdited {
            old_title,
            new_title,
        } => vec![format!("The book [{old_title}] is now titled [{new_title}].")],
        Report::QuoteEdited { old, new } => vec![
            format!("Quote edited from: {}", render_quote(old)),
            format!("                to: {}", render_quote(new)),
        ],
        Report::CategoryRenamed { old_name, new_name } => {
            vec![format!("Category [{old_name}] renamed to [{new_name}].")]
        }
        Report::RatingUpdated { score, title } => {
            vec![format!("Rating of [{title}] updated to {score} star!")]
        }
        Report::BookDeleted(book) => vec![format!("The book [{book}] has been deleted!")],
        Report::QuoteDeleted(quote) => {
            vec![format!("Quote deleted: {}", render_quote(quote))]
        }
        Report::CategoryDeleted(name) => vec![format!("Category [{name}] deleted.")],
        Report::CategoryRemovedFromBook { category, title } => {
            vec![format!("Removed [{category}] from the book [{title}].")]
        }
        Report::CategoryRemovedFromQuote { category, quote } => {
            vec![format!("Removed [{category}] from the quote \"{quote}\".")]
        }
        Report::RatingDeleted(title) => vec![format!("Rating for [{title}] deleted.")],
        Report::ToDoDeleted(todo) => vec![format!("To-do deleted: {}", render_todo(todo))],
        Report::BookmarkDeleted { title, page } => {
            vec![format!("Bookmark of [{title}] at page {page} deleted.")]
        }
        Report::ToDoCompleted { number, todo } => {
            vec![format!("Nice! To-do {number} is done: {}", render_todo(todo))]
        }
        Report::Books(books) => render_listing("books", books.iter().map(render_book)),
        Report::Quotes(quotes) => render_listing(
            "quotes",
            quotes
                .iter()
                .map(|(number, quote)| format!("{number}. {}", render_quote(quote))),
        ),
        Report::Categories(categories) => {
            render_listing("categories", categories.iter().map(render_category))
        }
        Report::Ratings(ratings) => render_listing("ratings", ratings.iter().map(render_rating)),
        Report::ToDos(todos) => render_listing(
            "to-dos",
            todos
                .iter()
                .map(|(number, todo)| format!("{number}. {}", render_todo(todo))),
        ),
        Report::Bookmarks(bookmarks) => {
            render_listing("bookmarks", bookmarks.iter().map(render_bookmark))
        }
        Report::Warning(err) => vec![format!("Warning: {err}")],
    }
}

fn render_listing(name: &str, lines: impl Iterator<Item = String>) -> Vec<String> {
    let lines: Vec<String> = lines.collect();
    if lines.is_empty() {
        return vec![format!("There are no {name} to show.")];
    }
    let mut output = vec![format!("Here are your {name}:")];
    output.extend(lines);
    output
}

fn render_book(book: &Book) -> String {
    book.to_string()
}

fn render_quote(quote: &Quote) -> String {
    quote.to_string()
}

fn status_icon(todo: &ToDo) -> char {
    if todo.is_completed {
        'X'
    } else {
        ' '
    }
}

fn render_todo(todo: &ToDo) -> String {
    match &todo.deadline {
        Some(deadline) => format!(
            "[{}] {} (by: {deadline})",
            status_icon(todo),
            todo.description
        ),
        None => format!("[{}] {}", status_icon(todo), todo.description),
    }
}

fn render_rating(rating: &Rating) -> String {
    format!("{}: {}", rating.title, "*".repeat(usize::from(rating.score)))
}

fn render_bookmark(bookmark: &BookmarkEntry) -> String {
    format!("{}: page {}", bookmark.title, bookmark.page)
}

fn render_category(category: &CategorySummary) -> String {
    format!(
        "{} ({} book(s), {} quote(s))",
        category.name,
        category.book_titles.len(),
        category.quotes.len()
    )
}
