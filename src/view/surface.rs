//! The presentation surface the controller writes into. The terminal front-end
//! renders a [`SurfaceModel`] every frame; tests inspect the same model
//! directly, so the controller never needs a real terminal.

use super::theme::{Palette, Theme};

/// One rendered entry in the book list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    pub id: String,
    pub image: String,
    pub title: String,
    pub author: String,
}

/// Content of the detail overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub image: String,
    pub blur_image: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
}

/// An entry of the author or genre picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Write capabilities the controller needs from whatever draws the catalog.
pub trait Surface {
    fn clear_rows(&mut self);
    fn append_rows(&mut self, rows: &[PreviewRow]);
    fn set_empty_state(&mut self, visible: bool);
    fn set_show_more(&mut self, remaining: usize, enabled: bool);
    fn set_author_options(&mut self, options: &[SelectOption]);
    fn set_genre_options(&mut self, options: &[SelectOption]);
    fn open_detail(&mut self, detail: &BookDetail);
    fn close_detail(&mut self);
    fn apply_palette(&mut self, palette: Palette);
    fn set_theme_selector(&mut self, theme: Theme);
    fn set_search_overlay(&mut self, visible: bool);
    fn set_settings_overlay(&mut self, visible: bool);
}

/// Retained copy of everything written to the surface.
#[derive(Debug, Clone)]
pub struct SurfaceModel {
    pub rows: Vec<PreviewRow>,
    pub empty_state: bool,
    pub remaining: usize,
    pub show_more_enabled: bool,
    pub author_options: Vec<SelectOption>,
    pub genre_options: Vec<SelectOption>,
    pub detail: Option<BookDetail>,
    pub palette: Palette,
    pub theme_selector: Theme,
    pub search_open: bool,
    pub settings_open: bool,
}

impl Default for SurfaceModel {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            empty_state: false,
            remaining: 0,
            show_more_enabled: false,
            author_options: Vec::new(),
            genre_options: Vec::new(),
            detail: None,
            palette: Theme::Day.palette(),
            theme_selector: Theme::Day,
            search_open: false,
            settings_open: false,
        }
    }
}

impl SurfaceModel {
    /// Text of the show-more control, e.g. `Show more (12)`.
    pub fn show_more_label(&self) -> String {
        format!("Show more ({})", self.remaining)
    }
}

impl Surface for SurfaceModel {
    fn clear_rows(&mut self) {
        self.rows.clear();
    }

    fn append_rows(&mut self, rows: &[PreviewRow]) {
        self.rows.extend_from_slice(rows);
    }

    fn set_empty_state(&mut self, visible: bool) {
        self.empty_state = visible;
    }

    fn set_show_more(&mut self, remaining: usize, enabled: bool) {
        self.remaining = remaining;
        self.show_more_enabled = enabled;
    }

    fn set_author_options(&mut self, options: &[SelectOption]) {
        self.author_options = options.to_vec();
    }

    fn set_genre_options(&mut self, options: &[SelectOption]) {
        self.genre_options = options.to_vec();
    }

    fn open_detail(&mut self, detail: &BookDetail) {
        self.detail = Some(detail.clone());
    }

    fn close_detail(&mut self) {
        self.detail = None;
    }

    fn apply_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    fn set_theme_selector(&mut self, theme: Theme) {
        self.theme_selector = theme;
    }

    fn set_search_overlay(&mut self, visible: bool) {
        self.search_open = visible;
    }

    fn set_settings_overlay(&mut self, visible: bool) {
        self.settings_open = visible;
    }
}
