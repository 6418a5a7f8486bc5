use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

/// Key under which the theme preference is stored.
const THEME_KEY: &str = "theme";

/// Single-string preference storage that survives across sessions. The
/// controller only ever reads the theme at startup and writes it when the
/// settings form is submitted.
pub trait PreferenceStore {
    fn load_theme(&self) -> Result<Option<String>>;
    fn save_theme(&mut self, theme: &str) -> Result<()>;
}

/// Preference store backed by the `preferences` table.
pub struct SqlitePreferences {
    conn: Connection,
}

impl SqlitePreferences {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl PreferenceStore for SqlitePreferences {
    fn load_theme(&self) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![THEME_KEY],
                |row| row.get(0),
            )
            .optional()
            .context("failed to read theme preference")
    }

    fn save_theme(&mut self, theme: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![THEME_KEY, theme],
            )
            .context("failed to save theme preference")?;
        Ok(())
    }
}

/// Process-local store, used when no database is wanted and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn with_theme(theme: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(THEME_KEY.to_string(), theme.to_string());
        Self { values }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load_theme(&self) -> Result<Option<String>> {
        Ok(self.values.get(THEME_KEY).cloned())
    }

    fn save_theme(&mut self, theme: &str) -> Result<()> {
        self.values.insert(THEME_KEY.to_string(), theme.to_string());
        Ok(())
    }
}
