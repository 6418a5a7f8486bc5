//! Persistence module split across logical submodules: the catalog source and
//! the theme preference store share one SQLite file.

mod books;
mod connection;
mod preferences;
mod seed;

pub use books::{
    fetch_catalog, insert_author, insert_book, insert_genre, load_or_seed_catalog,
    parse_published, reseed_catalog,
};
pub use connection::{data_dir, default_db_path, ensure_schema, init_schema};
pub use preferences::{MemoryPreferences, PreferenceStore, SqlitePreferences};
