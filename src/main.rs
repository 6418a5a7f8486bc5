//! Binary entry point: parse flags, open the SQLite store, hydrate the catalog
//! controller, and drive the Ratatui event loop until the user exits.
use std::env;

use anyhow::{Context, Result};
use book_catalog::config::{Cli, Config};
use book_catalog::logging::init_logging;
use book_catalog::view::{host_prefers_dark, HOST_COLOR_VAR};
use book_catalog::{
    ensure_schema, load_or_seed_catalog, reseed_catalog, run_app, App, CatalogController,
    SqlitePreferences, SurfaceModel,
};
use clap::Parser;
use tracing::info;

fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;
    init_logging(&config.log_path)?;
    info!(db = %config.db_path.display(), "starting book catalog");

    let mut conn = ensure_schema(&config.db_path)?;
    let catalog = if config.reseed {
        reseed_catalog(&mut conn).context("failed to reseed catalog")?
    } else {
        load_or_seed_catalog(&mut conn)?
    };
    info!(
        books = catalog.len(),
        authors = catalog.authors.len(),
        genres = catalog.genres.len(),
        "catalog loaded"
    );

    let host_dark = host_prefers_dark(env::var(HOST_COLOR_VAR).ok().as_deref());
    let mut controller = CatalogController::initialize(
        catalog,
        config.page_size,
        SurfaceModel::default(),
        SqlitePreferences::new(conn),
        host_dark,
    );
    if let Some(theme) = config.theme_override {
        controller.apply_theme(theme);
    }

    let mut app = App::new(controller);
    run_app(&mut app)
}
