use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};

use crate::models::Catalog;
use crate::view::{FilterCriteria, Palette, Rgb, Selector};

pub(crate) fn rgb_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Base style for every widget: content colour on the surface colour.
pub(crate) fn base_style(palette: Palette) -> Style {
    Style::default()
        .fg(rgb_color(palette.dark))
        .bg(rgb_color(palette.light))
}

/// One-line description of the active filter for the list header.
pub(crate) fn describe_criteria(criteria: &FilterCriteria, catalog: &Catalog) -> String {
    if criteria.is_unfiltered() {
        return "All books".to_string();
    }

    let mut parts = Vec::new();
    let title = criteria.title.trim();
    if !title.is_empty() {
        parts.push(format!("title contains \"{title}\""));
    }
    if let Selector::Id(id) = &criteria.author {
        parts.push(format!("by {}", catalog.author_name(id)));
    }
    if let Selector::Id(id) = &criteria.genre {
        parts.push(format!("in {}", catalog.genre_name(id).unwrap_or(id)));
    }
    parts.join(", ")
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Column for a text cursor after `prefix` label cells and `len` typed
/// characters, kept on the last column of `inner` once the text overflows.
pub(crate) fn input_cursor_x(inner: Rect, prefix: usize, len: usize) -> u16 {
    let offset = u16::try_from(prefix.saturating_add(len)).unwrap_or(u16::MAX);
    inner
        .x
        .saturating_add(offset)
        .min(inner.right().saturating_sub(1))
}
