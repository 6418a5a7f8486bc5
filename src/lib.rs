//! Core library surface for the book catalog browser.
//!
//! `view` holds the renderer-agnostic controller, `db` the SQLite-backed
//! catalog source and preference store, and `ui` the terminal front-end that
//! drives the controller from key presses.
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod ui;
pub mod view;

/// Convenience re-exports for the persistence layer, used by `main.rs` to
/// open the store and load the catalog.
pub use db::{ensure_schema, load_or_seed_catalog, reseed_catalog, SqlitePreferences};

/// The primary domain types other layers pass around.
pub use models::{Book, Catalog, NamedEntry};

/// The controller and the interactive application shell.
pub use ui::{run_app, App};
pub use view::{CatalogController, FilterCriteria, SurfaceModel, Theme};
