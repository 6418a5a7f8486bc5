use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Error as SqlError, ErrorCode};
use tracing::info;

use crate::models::{Book, Catalog, NamedEntry};

use super::seed::{sample_authors, sample_books, sample_genres};

/// Load the whole catalog: books in insertion order with their genre lists,
/// and both name tables in table-iteration order.
pub fn fetch_catalog(conn: &Connection) -> Result<Catalog> {
    let authors = fetch_named(conn, "authors")?;
    let genres = fetch_named(conn, "genres")?;
    let books = fetch_books(conn)?;
    Ok(Catalog::new(books, authors, genres))
}

/// Return the stored catalog, seeding the sample data set first when the
/// books table is empty.
pub fn load_or_seed_catalog(conn: &mut Connection) -> Result<Catalog> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))
        .context("failed to count books")?;

    if count == 0 {
        seed_catalog(conn)?;
    }

    fetch_catalog(conn)
}

/// Drop every catalog row and insert the sample data set again. Preferences
/// are left alone.
pub fn reseed_catalog(conn: &mut Connection) -> Result<Catalog> {
    clear_catalog(conn)?;
    seed_catalog(conn)?;
    fetch_catalog(conn)
}

fn seed_catalog(conn: &mut Connection) -> Result<()> {
    let tx = conn
        .transaction()
        .context("failed to start seed transaction")?;

    for author in sample_authors() {
        insert_author(&tx, &author)?;
    }
    for genre in sample_genres() {
        insert_genre(&tx, &genre)?;
    }
    let books = sample_books();
    for book in &books {
        insert_book(&tx, book)?;
    }

    tx.commit().context("failed to commit seed data")?;
    info!(books = books.len(), "seeded sample catalog");
    Ok(())
}

fn clear_catalog(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "DELETE FROM book_genres;
         DELETE FROM books;
         DELETE FROM genres;
         DELETE FROM authors;",
    )
    .context("failed to clear catalog tables")
}

pub fn insert_author(conn: &Connection, author: &NamedEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO authors (id, name) VALUES (?1, ?2)",
        params![author.id, author.name],
    )
    .map_err(|err| map_unique_constraint(err, "Author", &author.id))
    .context("failed to insert author")?;
    Ok(())
}

pub fn insert_genre(conn: &Connection, genre: &NamedEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO genres (id, name) VALUES (?1, ?2)",
        params![genre.id, genre.name],
    )
    .map_err(|err| map_unique_constraint(err, "Genre", &genre.id))
    .context("failed to insert genre")?;
    Ok(())
}

/// Append a book to the end of the catalog. The `position` column records
/// insertion order so the default display order survives restarts.
pub fn insert_book(conn: &Connection, book: &Book) -> Result<()> {
    let position: i64 = conn
        .query_row("SELECT COALESCE(MAX(position), -1) + 1 FROM books", [], |row| {
            row.get(0)
        })
        .context("failed to compute book position")?;

    conn.execute(
        "INSERT INTO books (id, position, title, author_id, image, description, published)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            book.id,
            position,
            book.title,
            book.author_id,
            book.image,
            book.description,
            book.published.to_rfc3339(),
        ],
    )
    .map_err(|err| map_unique_constraint(err, "Book", &book.id))
    .context("failed to insert book")?;

    for (idx, genre_id) in book.genre_ids.iter().enumerate() {
        conn.execute(
            "INSERT INTO book_genres (book_id, genre_id, position) VALUES (?1, ?2, ?3)",
            params![book.id, genre_id, idx as i64],
        )
        .context("failed to link book to genre")?;
    }

    Ok(())
}

fn fetch_named(conn: &Connection, table: &str) -> Result<Vec<NamedEntry>> {
    let mut stmt = conn
        .prepare(&format!("SELECT id, name FROM {table} ORDER BY rowid"))
        .with_context(|| format!("failed to prepare {table} query"))?;

    let entries = stmt
        .query_map([], |row| {
            Ok(NamedEntry {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .with_context(|| format!("failed to load {table}"))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("failed to collect {table}"))?;

    Ok(entries)
}

fn fetch_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, title, author_id, image, description, published
             FROM books
             ORDER BY position",
        )
        .context("failed to prepare books query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .context("failed to iterate books")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect books")?;

    let mut genre_stmt = conn
        .prepare("SELECT genre_id FROM book_genres WHERE book_id = ?1 ORDER BY position")
        .context("failed to prepare book genre query")?;

    let mut books = Vec::with_capacity(rows.len());
    for (id, title, author_id, image, description, published) in rows {
        let genre_ids = genre_stmt
            .query_map(params![id], |row| row.get::<_, String>(0))
            .context("failed to load book genres")?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to collect book genres")?;

        let published = parse_published(&published)
            .with_context(|| format!("book {id} has an invalid published date"))?;

        books.push(Book {
            id,
            title,
            author_id,
            image,
            description,
            published,
            genre_ids,
        });
    }

    Ok(books)
}

/// Accept either a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
pub fn parse_published(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(stamp.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("unrecognised date '{raw}'"))?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| anyhow!("unrecognised date '{raw}'"))
}

/// Turn primary key collisions into a readable message instead of the raw
/// SQLite constraint text.
fn map_unique_constraint(err: SqlError, kind: &str, id: &str) -> anyhow::Error {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        anyhow!("{kind} id {id} already exists.")
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, TimeZone};

    use super::*;
    use crate::db::init_schema;

    fn memory() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn book(id: &str, title: &str, genres: &[&str]) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author_id: "1".to_string(),
            image: format!("https://example.com/{id}.jpg"),
            description: "desc".to_string(),
            published: Utc.with_ymd_and_hms(2001, 3, 4, 0, 0, 0).unwrap(),
            genre_ids: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[test]
    fn fetch_catalog_preserves_insertion_order() {
        let conn = memory();
        insert_author(&conn, &NamedEntry::new("2", "Zed")).unwrap();
        insert_author(&conn, &NamedEntry::new("1", "Abe")).unwrap();
        insert_genre(&conn, &NamedEntry::new("g2", "Mystery")).unwrap();
        insert_genre(&conn, &NamedEntry::new("g1", "Fantasy")).unwrap();
        insert_book(&conn, &book("z", "Zulu", &["g2", "g1"])).unwrap();
        insert_book(&conn, &book("a", "Alpha", &[])).unwrap();

        let catalog = fetch_catalog(&conn).unwrap();
        let ids: Vec<_> = catalog.books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["z", "a"]);
        let authors: Vec<_> = catalog.authors.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(authors, ["2", "1"]);
        let genres: Vec<_> = catalog.genres.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(genres, ["g2", "g1"]);
        assert_eq!(catalog.books[0].genre_ids, ["g2", "g1"]);
        assert_eq!(catalog.books[0].published_year(), 2001);
    }

    #[test]
    fn duplicate_book_id_is_reported() {
        let conn = memory();
        insert_book(&conn, &book("a", "Alpha", &[])).unwrap();
        let err = insert_book(&conn, &book("a", "Again", &[])).unwrap_err();
        assert!(format!("{err:#}").contains("Book id a already exists."));
    }

    #[test]
    fn load_or_seed_only_seeds_once() {
        let mut conn = memory();
        let first = load_or_seed_catalog(&mut conn).unwrap();
        assert!(!first.is_empty());
        let second = load_or_seed_catalog(&mut conn).unwrap();
        assert_eq!(first.len(), second.len());
        assert_eq!(first.authors, second.authors);
    }

    #[test]
    fn reseed_replaces_existing_rows() {
        let mut conn = memory();
        insert_author(&conn, &NamedEntry::new("custom", "Custom")).unwrap();
        insert_book(&conn, &book("custom-book", "Custom", &[])).unwrap();
        let catalog = reseed_catalog(&mut conn).unwrap();
        assert!(catalog.find_book("custom-book").is_none());
        assert_eq!(catalog.len(), sample_books().len());
    }

    #[test]
    fn parse_published_accepts_both_formats() {
        assert_eq!(parse_published("1999-12-31").unwrap().year(), 1999);
        assert_eq!(
            parse_published("2018-05-01T12:30:00.000Z").unwrap().year(),
            2018
        );
        assert!(parse_published("last tuesday").is_err());
    }
}
