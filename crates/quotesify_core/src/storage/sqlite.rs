//! SQLite snapshot storage.
//!
//! # Responsibility
//! - Persist each collection into its own table, ordered by `position`.
//! - Replace the full snapshot inside one transaction per `save`.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`; databases written
//!   by a newer binary are rejected, never rewritten.
//! - Category membership is not stored; it is rebuilt from the
//!   `category_uuid` columns on load.

use super::{Storage, StorageError, StorageResult};
use crate::library::Library;
use crate::list::EntityList;
use crate::model::book::{Author, Book};
use crate::model::bookmark::Bookmark;
use crate::model::category::Category;
use crate::model::quote::Quote;
use crate::model::rating::Rating;
use crate::model::todo::ToDo;
use log::{error, info, warn};
use rusqlite::{params, Connection, Transaction};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Schema version written by this binary.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("schema.sql");

#[derive(Debug, Clone)]
pub struct SqliteStorage {
    path: PathBuf,
}

impl SqliteStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> StorageResult<Connection> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;
        }
        let conn = Connection::open(&self.path).map_err(|err| {
            error!(
                "event=db_open module=storage status=error error_code=db_open_failed error={}",
                err
            );
            StorageError::from(err)
        })?;
        conn.busy_timeout(Duration::from_secs(5))?;
        ensure_schema(&conn)?;
        Ok(conn)
    }
}

impl Storage for SqliteStorage {
    fn load(&self) -> StorageResult<Library> {
        let started_at = Instant::now();
        let conn = self.open()?;
        let mut library = Library::new();

        read_categories(&conn, &mut library)?;
        read_books(&conn, &mut library)?;
        read_quotes(&conn, &mut library)?;
        read_ratings(&conn, &mut library)?;
        read_todos(&conn, &mut library)?;
        read_bookmarks(&conn, &mut library)?;

        let repairs = library.repair_links();
        if repairs > 0 {
            warn!(
                "event=storage_load module=storage status=repaired backend=sqlite repairs={}",
                repairs
            );
        }
        info!(
            "event=storage_load module=storage status=ok backend=sqlite duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(library)
    }

    fn save(&self, library: &Library) -> StorageResult<()> {
        let started_at = Instant::now();
        let mut conn = self.open()?;
        let tx = conn.transaction()?;
        tx.execute_batch(
            "DELETE FROM books;
             DELETE FROM quotes;
             DELETE FROM categories;
             DELETE FROM ratings;
             DELETE FROM todos;
             DELETE FROM bookmarks;",
        )?;
        write_snapshot(&tx, library)?;
        tx.commit()?;

        info!(
            "event=storage_save module=storage status=ok backend=sqlite duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}

fn ensure_schema(conn: &Connection) -> StorageResult<()> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    if version > SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version: version,
            latest_supported: SCHEMA_VERSION,
        });
    }
    if version < SCHEMA_VERSION {
        conn.execute_batch(SCHEMA_SQL)?;
        conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    }
    Ok(())
}

fn write_snapshot(tx: &Transaction<'_>, library: &Library) -> StorageResult<()> {
    for (position, category) in library.categories().items().iter().enumerate() {
        tx.execute(
            "INSERT INTO categories (position, uuid, name) VALUES (?1, ?2, ?3);",
            params![position as i64, category.id.to_string(), category.name],
        )?;
    }
    for (position, book) in library.books().items().iter().enumerate() {
        tx.execute(
            "INSERT INTO books (position, uuid, title, author, category_uuid)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                position as i64,
                book.id.to_string(),
                book.title,
                book.author.name,
                book.category.map(|id| id.to_string()),
            ],
        )?;
    }
    for (position, quote) in library.quotes().items().iter().enumerate() {
        tx.execute(
            "INSERT INTO quotes (position, uuid, text, reference, author, category_uuid)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                position as i64,
                quote.id.to_string(),
                quote.text,
                quote.reference,
                quote.author.as_ref().map(|author| author.name.as_str()),
                quote.category.map(|id| id.to_string()),
            ],
        )?;
    }
    for (position, rating) in library.ratings().items().iter().enumerate() {
        tx.execute(
            "INSERT INTO ratings (position, score, title) VALUES (?1, ?2, ?3);",
            params![position as i64, rating.score, rating.title],
        )?;
    }
    for (position, todo) in library.todos().items().iter().enumerate() {
        tx.execute(
            "INSERT INTO todos (position, description, deadline, is_completed)
             VALUES (?1, ?2, ?3, ?4);",
            params![position as i64, todo.description, todo.deadline, todo.is_completed],
        )?;
    }
    for (position, bookmark) in library.bookmarks().items().iter().enumerate() {
        tx.execute(
            "INSERT INTO bookmarks (position, book_uuid, page) VALUES (?1, ?2, ?3);",
            params![position as i64, bookmark.book.to_string(), bookmark.page],
        )?;
    }
    Ok(())
}

fn parse_uuid(value: &str, column: &str) -> StorageResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| StorageError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

fn parse_optional_uuid(value: Option<String>, column: &str) -> StorageResult<Option<Uuid>> {
    value.map(|value| parse_uuid(&value, column)).transpose()
}

fn read_categories(conn: &Connection, library: &mut Library) -> StorageResult<()> {
    let mut stmt = conn.prepare("SELECT uuid, name FROM categories ORDER BY position;")?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let uuid: String = row.get("uuid")?;
        library.categories.add(Category {
            id: parse_uuid(&uuid, "categories.uuid")?,
            name: row.get("name")?,
            books: BTreeSet::new(),
            quotes: BTreeSet::new(),
        });
    }
    Ok(())
}

fn read_books(conn: &Connection, library: &mut Library) -> StorageResult<()> {
    let mut stmt = conn.prepare(
        "SELECT uuid, title, author, category_uuid FROM books ORDER BY position;",
    )?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let uuid: String = row.get("uuid")?;
        let author: String = row.get("author")?;
        library.books.add(Book {
            id: parse_uuid(&uuid, "books.uuid")?,
            title: row.get("title")?,
            author: Author::new(author),
            category: parse_optional_uuid(row.get("category_uuid")?, "books.category_uuid")?,
        });
    }
    Ok(())
}

fn read_quotes(conn: &Connection, library: &mut Library) -> StorageResult<()> {
    let mut stmt = conn.prepare(
        "SELECT uuid, text, reference, author, category_uuid FROM quotes ORDER BY position;",
    )?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let uuid: String = row.get("uuid")?;
        let author: Option<String> = row.get("author")?;
        library.quotes.add(Quote {
            id: parse_uuid(&uuid, "quotes.uuid")?,
            text: row.get("text")?,
            reference: row.get("reference")?,
            author: author.map(Author::new),
            category: parse_optional_uuid(row.get("category_uuid")?, "quotes.category_uuid")?,
        });
    }
    Ok(())
}

fn read_ratings(conn: &Connection, library: &mut Library) -> StorageResult<()> {
    let mut stmt = conn.prepare("SELECT score, title FROM ratings ORDER BY position;")?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let score: i64 = row.get("score")?;
        let title: String = row.get("title")?;
        let rating = Rating::new(score, title).ok_or_else(|| {
            StorageError::InvalidData(format!("invalid rating score `{score}` in ratings.score"))
        })?;
        library.ratings.add(rating);
    }
    Ok(())
}

fn read_todos(conn: &Connection, library: &mut Library) -> StorageResult<()> {
    let mut stmt = conn.prepare(
        "SELECT description, deadline, is_completed FROM todos ORDER BY position;",
    )?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        library.todos.add(ToDo {
            description: row.get("description")?,
            deadline: row.get("deadline")?,
            is_completed: row.get("is_completed")?,
        });
    }
    Ok(())
}

fn read_bookmarks(conn: &Connection, library: &mut Library) -> StorageResult<()> {
    let mut stmt = conn.prepare("SELECT book_uuid, page FROM bookmarks ORDER BY position;")?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let book: String = row.get("book_uuid")?;
        library.bookmarks.add(Bookmark::new(
            parse_uuid(&book, "bookmarks.book_uuid")?,
            row.get("page")?,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_schema, SCHEMA_VERSION};
    use crate::storage::StorageError;
    use rusqlite::Connection;

    #[test]
    fn ensure_schema_sets_user_version() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
        ensure_schema(&conn).unwrap();
    }

    #[test]
    fn ensure_schema_rejects_newer_database() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA user_version = 99;").unwrap();
        let err = ensure_schema(&conn).unwrap_err();
        assert!(matches!(
            err,
            StorageError::UnsupportedSchemaVersion { db_version: 99, .. }
        ));
    }
}
