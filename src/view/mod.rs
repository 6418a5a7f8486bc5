//! Renderer-agnostic catalog view: filter and pagination state, theme
//! handling, and the surface trait the terminal front-end implements.

mod controller;
mod filter;
mod surface;
mod theme;

pub use controller::{CatalogController, ViewState};
pub use filter::{filter_books, FilterCriteria, Selector, ANY};
pub use surface::{BookDetail, PreviewRow, SelectOption, Surface, SurfaceModel};
pub use theme::{
    host_prefers_dark, resolve_initial_theme, Palette, Rgb, Theme, ThemeError, HOST_COLOR_VAR,
};
