use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::warn;

use crate::db::PreferenceStore;
use crate::view::{BookDetail, CatalogController, FilterCriteria, SurfaceModel};

use super::forms::{SearchField, SearchForm, SettingsForm};
use super::helpers::{base_style, centered_rect, describe_criteria, input_cursor_x};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Header space for the title and the active filter summary.
const HEADER_HEIGHT: u16 = 3;
/// Rows moved by PageUp/PageDown.
const PAGE_JUMP: isize = 10;
const EMPTY_MESSAGE: &str = "No results found. Your filters might be too narrow.";

/// Which form currently owns the keyboard. The detail overlay is tracked by
/// the controller, not here.
enum Mode {
    Normal,
    Searching(SearchForm),
    Settings(SettingsForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Terminal front-end around the catalog controller. Keys are translated into
/// controller operations; drawing reads back the surface model.
pub struct App<P> {
    controller: CatalogController<SurfaceModel, P>,
    /// Cursor over the rendered rows. `rows.len()` addresses the show-more row.
    selected: usize,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl<P: PreferenceStore> App<P> {
    pub fn new(controller: CatalogController<SurfaceModel, P>) -> Self {
        Self {
            controller,
            selected: 0,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn controller(&self) -> &CatalogController<SurfaceModel, P> {
        &self.controller
    }

    /// Handle one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Searching(form) => self.handle_search(code, form),
            Mode::Settings(form) => self.handle_settings(code, form),
            Mode::Normal if self.controller.surface().detail.is_some() => {
                self.handle_detail_key(code, &mut exit);
                Mode::Normal
            }
            Mode::Normal => self.handle_normal_key(code, &mut exit),
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_JUMP),
            KeyCode::PageDown => self.move_selection(PAGE_JUMP),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.last_index(),
            KeyCode::Enter => self.activate_selection(),
            KeyCode::Char('m') | KeyCode::Char('M') => self.show_more(),
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.controller.apply_filter(&FilterCriteria::default());
                self.selected = 0;
                self.set_status("Filters cleared.", StatusKind::Info);
            }
            KeyCode::Char('/') => {
                self.clear_status();
                let surface = self.controller.surface();
                let form = SearchForm::from_criteria(
                    &self.controller.state().criteria,
                    &surface.author_options,
                    &surface.genre_options,
                );
                self.controller.toggle_search_overlay(true);
                return Mode::Searching(form);
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.clear_status();
                let form = SettingsForm::new(self.controller.state().theme);
                self.controller.toggle_settings_overlay(true);
                return Mode::Settings(form);
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_detail_key(&mut self, code: KeyCode, exit: &mut bool) {
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => {
                self.controller.close_detail();
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                let Some(detail) = self.controller.surface().detail.clone() else {
                    return;
                };
                let image = detail.image.trim().to_string();
                if image.is_empty() {
                    self.set_status("This book has no cover image.", StatusKind::Error);
                } else if let Err(err) = open_link(&image) {
                    warn!(error = %err, url = %image, "failed to open cover image");
                    self.set_status(format!("Failed to open cover: {err}"), StatusKind::Error);
                } else {
                    let opened = format!("Opened cover for {}.", detail.title);
                    self.set_status(opened, StatusKind::Info);
                }
            }
            _ => {}
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut form: SearchForm) -> Mode {
        let (author_count, genre_count) = {
            let surface = self.controller.surface();
            (surface.author_options.len(), surface.genre_options.len())
        };

        match code {
            KeyCode::Esc => {
                self.controller.toggle_search_overlay(false);
                return Mode::Normal;
            }
            KeyCode::Enter => {
                let criteria = {
                    let surface = self.controller.surface();
                    form.criteria(&surface.author_options, &surface.genre_options)
                };
                self.controller.submit_search(&criteria);
                self.selected = 0;
                let count = self.controller.state().matches.len();
                self.set_status(
                    format!("{count} book{} found.", if count == 1 { "" } else { "s" }),
                    StatusKind::Info,
                );
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.toggle_field(),
            KeyCode::BackTab | KeyCode::Up => {
                form.toggle_field();
                form.toggle_field();
            }
            KeyCode::Left => form.cycle(-1, author_count, genre_count),
            KeyCode::Right => form.cycle(1, author_count, genre_count),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Mode::Searching(form)
    }

    fn handle_settings(&mut self, code: KeyCode, mut form: SettingsForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.controller.toggle_settings_overlay(false);
                return Mode::Normal;
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char(' ') => form.toggle(),
            KeyCode::Enter => match self.controller.submit_settings(form.theme.as_str()) {
                Ok(theme) => {
                    self.set_status(format!("{} theme applied.", theme.label()), StatusKind::Info);
                    return Mode::Normal;
                }
                Err(err) => {
                    self.set_status(err.to_string(), StatusKind::Error);
                }
            },
            _ => {}
        }
        Mode::Settings(form)
    }

    fn activate_selection(&mut self) {
        let row_id = self
            .controller
            .surface()
            .rows
            .get(self.selected)
            .map(|row| row.id.clone());
        match row_id {
            Some(id) => {
                if !self.controller.select_book(&id) {
                    self.set_status("That book is no longer in the catalog.", StatusKind::Error);
                }
            }
            None => self.show_more(),
        }
    }

    fn show_more(&mut self) {
        if self.controller.show_more() {
            self.clear_status();
        } else {
            self.set_status("No more books to show.", StatusKind::Info);
        }
    }

    fn move_selection(&mut self, offset: isize) {
        let last = self.last_index() as isize;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    /// Index of the show-more row, the last selectable entry.
    fn last_index(&self) -> usize {
        self.controller.surface().rows.len()
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let surface = self.controller.surface();
        let base = base_style(surface.palette);
        frame.render_widget(Block::default().style(base), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT.min(area.height)),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0], base);
        self.draw_list(frame, chunks[1], base);
        self.draw_footer(frame, chunks[2], base);

        if let Some(detail) = &surface.detail {
            self.draw_detail(frame, area, base, detail);
        }
        match &self.mode {
            Mode::Searching(form) if surface.search_open => {
                self.draw_search_form(frame, area, base, form)
            }
            Mode::Settings(form) if surface.settings_open => {
                self.draw_settings_form(frame, area, base, form)
            }
            _ => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect, base: Style) {
        let state = self.controller.state();
        let shown = self.controller.surface().rows.len();
        let summary = describe_criteria(&state.criteria, self.controller.catalog());
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "Book Catalog",
                base.add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "{summary} • showing {shown} of {} matches",
                state.matches.len()
            )),
        ])
        .style(base)
        .block(Block::default().borders(Borders::BOTTOM).style(base));
        frame.render_widget(header, area);
    }

    fn draw_list(&self, frame: &mut Frame, area: Rect, base: Style) {
        if area.height == 0 {
            return;
        }
        let surface = self.controller.surface();
        let block = Block::default().borders(Borders::ALL).title("Books").style(base);

        if surface.empty_state {
            let message = Paragraph::new(EMPTY_MESSAGE)
                .alignment(Alignment::Center)
                .style(base)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let dim = base.add_modifier(Modifier::DIM);
        let mut items: Vec<ListItem> = surface
            .rows
            .iter()
            .map(|row| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        row.title.clone(),
                        base.add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(format!("  {}", row.author), dim)),
                ])
            })
            .collect();

        let show_more_style = if surface.show_more_enabled {
            base.fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            dim
        };
        items.push(ListItem::new(Line::from(Span::styled(
            surface.show_more_label(),
            show_more_style,
        ))));

        let list = List::new(items)
            .block(block)
            .style(base)
            .highlight_style(base.fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected.min(surface.rows.len())));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect, base: Style) {
        let block = Block::default().borders(Borders::TOP).style(base);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(
                status.text.clone(),
                base.patch(status.kind.style()),
            )])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions(base)])
            .style(base)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self, base: Style) -> Line<'static> {
        let key_style = base.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let keys: &[(&str, &str)] = match &self.mode {
            Mode::Searching(_) => &[
                ("[Tab]", " Next field   "),
                ("[←→]", " Change   "),
                ("[Enter]", " Search   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::Settings(_) => &[
                ("[←→]", " Choose   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::Normal if self.controller.surface().detail.is_some() => &[
                ("[o]", " Open cover   "),
                ("[Esc]", " Close   "),
                ("[q]", " Quit"),
            ],
            Mode::Normal => &[
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Details   "),
                ("[m]", " Show more   "),
                ("[/]", " Search   "),
                ("[c]", " Clear   "),
                ("[t]", " Theme   "),
                ("[q]", " Quit"),
            ],
        };

        let spans: Vec<Span<'static>> = keys
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(key.to_string(), key_style),
                    Span::styled(label.to_string(), base),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect, base: Style, detail: &BookDetail) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let heading = self
            .controller
            .active_book()
            .map(|book| book.to_string())
            .unwrap_or_else(|| detail.title.clone());
        let block = Block::default()
            .title(heading)
            .borders(Borders::ALL)
            .style(base);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(Span::styled(
                detail.title.clone(),
                base.add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                detail.subtitle.clone(),
                base.add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
            Line::from(detail.description.clone()),
            Line::from(""),
            Line::from(Span::styled(
                format!("Cover: {}", detail.image),
                base.fg(Color::Cyan),
            )),
        ];

        let paragraph = Paragraph::new(lines).style(base).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_form(&self, frame: &mut Frame, area: Rect, base: Style, form: &SearchForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .style(base);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let surface = self.controller.surface();
        let accent = base.fg(Color::Yellow);
        let lines = vec![
            form.build_line("Title", SearchField::Title, &[], accent),
            form.build_line("Author", SearchField::Author, &surface.author_options, accent),
            form.build_line("Genre", SearchField::Genre, &surface.genre_options, accent),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to search • Tab to switch • ←→ to pick • Esc to cancel",
                base.add_modifier(Modifier::DIM),
            )),
        ];

        let paragraph = Paragraph::new(lines).style(base).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        if form.active == SearchField::Title {
            let cursor_x = input_cursor_x(inner, "Title: ".len(), form.title_len());
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }

    fn draw_settings_form(&self, frame: &mut Frame, area: Rect, base: Style, form: &SettingsForm) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Settings")
            .borders(Borders::ALL)
            .style(base);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            form.build_line(base.fg(Color::Yellow)),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to save • ←→ to choose • Esc to cancel",
                base.add_modifier(Modifier::DIM),
            )),
        ];
        let paragraph = Paragraph::new(lines).style(base).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}
