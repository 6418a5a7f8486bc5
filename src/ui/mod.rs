//! Ratatui front-end: the key-driven app shell, its forms, and the terminal
//! event loop.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
