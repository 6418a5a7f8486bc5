//! Domain models that mirror the SQLite catalog tables and get passed
//! throughout the controller and the TUI. They stay light-weight data holders
//! so other layers can focus on presentation and persistence logic. Every
//! record is immutable for the lifetime of a session.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};

/// Display text used when a book references an author missing from the table.
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single book in the catalog.
pub struct Book {
    /// Opaque unique identifier. Rows in the list carry it back to the
    /// controller when the user opens the detail overlay.
    pub id: String,
    pub title: String,
    /// Reference into the author table.
    pub author_id: String,
    /// Cover image URL.
    pub image: String,
    pub description: String,
    pub published: DateTime<Utc>,
    /// References into the genre table, in the order the catalog lists them.
    pub genre_ids: Vec<String>,
}

impl Book {
    /// Four-digit publication year shown in the detail subtitle.
    pub fn published_year(&self) -> i32 {
        self.published.year()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An id → display name pair from either the author or the genre table.
pub struct NamedEntry {
    pub id: String,
    pub name: String,
}

impl NamedEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
/// The full static collection for a session. `books` keeps insertion order,
/// which doubles as the default display order; `authors` and `genres` keep
/// table-iteration order so the pickers list them the same way every run.
pub struct Catalog {
    pub books: Vec<Book>,
    pub authors: Vec<NamedEntry>,
    pub genres: Vec<NamedEntry>,
}

impl Catalog {
    pub fn new(books: Vec<Book>, authors: Vec<NamedEntry>, genres: Vec<NamedEntry>) -> Self {
        Self {
            books,
            authors,
            genres,
        }
    }

    /// Resolve an author id to its display name, falling back to
    /// [`UNKNOWN_AUTHOR`] for dangling references.
    pub fn author_name(&self, author_id: &str) -> &str {
        self.authors
            .iter()
            .find(|author| author.id == author_id)
            .map(|author| author.name.as_str())
            .unwrap_or(UNKNOWN_AUTHOR)
    }

    pub fn genre_name(&self, genre_id: &str) -> Option<&str> {
        self.genres
            .iter()
            .find(|genre| genre.id == genre_id)
            .map(|genre| genre.name.as_str())
    }

    /// Look a book up by id across the whole catalog, not just the current
    /// matches.
    pub fn find_book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
