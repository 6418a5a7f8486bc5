//! Command line flags and the settings resolved from them.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::db::{data_dir, default_db_path};
use crate::view::Theme;

/// Number of books revealed per page of the list.
pub const BOOKS_PER_PAGE: usize = 36;
/// Log file name inside the application data directory.
const LOG_FILE_NAME: &str = "book-catalog.log";

#[derive(Parser, Debug)]
#[command(name = "book-catalog", version, about = "Browse a book catalog in the terminal")]
pub struct Cli {
    /// SQLite database holding the catalog and preferences.
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Books revealed per page.
    #[arg(long, value_name = "N", default_value_t = BOOKS_PER_PAGE, value_parser = parse_page_size)]
    pub page_size: usize,

    /// Switch to this theme on startup and remember it.
    #[arg(long, value_name = "day|night")]
    pub theme: Option<Theme>,

    /// Replace the stored catalog with the built-in sample data.
    #[arg(long)]
    pub reseed: bool,

    /// Write logs here instead of the data directory.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Settings after defaults have been filled in.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    pub page_size: usize,
    pub theme_override: Option<Theme>,
    pub reseed: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let db_path = match cli.db {
            Some(path) => path,
            None => default_db_path()?,
        };
        let log_path = match cli.log_file {
            Some(path) => path,
            None => data_dir()?.join(LOG_FILE_NAME),
        };
        Ok(Self {
            db_path,
            log_path,
            page_size: cli.page_size,
            theme_override: cli.theme,
            reseed: cli.reseed,
        })
    }
}

fn parse_page_size(raw: &str) -> Result<usize, String> {
    let value: usize = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a whole number"))?;
    if value == 0 {
        Err("page size must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_flags_are_absent() {
        let cli = Cli::try_parse_from(["book-catalog"]).unwrap();
        assert_eq!(cli.page_size, BOOKS_PER_PAGE);
        assert!(cli.theme.is_none());
        assert!(!cli.reseed);
    }

    #[test]
    fn explicit_paths_are_kept() {
        let cli = Cli::try_parse_from([
            "book-catalog",
            "--db",
            "/tmp/books.sqlite",
            "--log-file",
            "/tmp/books.log",
            "--page-size",
            "10",
            "--theme",
            "night",
        ])
        .unwrap();
        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/books.sqlite"));
        assert_eq!(config.log_path, PathBuf::from("/tmp/books.log"));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.theme_override, Some(Theme::Night));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(Cli::try_parse_from(["book-catalog", "--page-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["book-catalog", "--page-size", "many"]).is_err());
        assert!(Cli::try_parse_from(["book-catalog", "--theme", "sepia"]).is_err());
    }
}
