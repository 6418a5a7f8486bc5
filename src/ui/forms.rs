use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::view::{FilterCriteria, SelectOption, Theme};

/// Fields available within the search form.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum SearchField {
    #[default]
    Title,
    Author,
    Genre,
}

/// Internal representation of the search form. The pickers hold indices into
/// the option lists the controller rendered, so index 0 is always "any".
#[derive(Default, Clone, Debug)]
pub(crate) struct SearchForm {
    pub(crate) title: String,
    pub(crate) author: usize,
    pub(crate) genre: usize,
    pub(crate) active: SearchField,
}

impl SearchForm {
    /// Reopen the form with the criteria currently in effect.
    pub(crate) fn from_criteria(
        criteria: &FilterCriteria,
        authors: &[SelectOption],
        genres: &[SelectOption],
    ) -> Self {
        Self {
            title: criteria.title.clone(),
            author: option_index(authors, criteria.author.as_value()),
            genre: option_index(genres, criteria.genre.as_value()),
            active: SearchField::Title,
        }
    }

    /// Cycle focus across the three fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            SearchField::Title => SearchField::Author,
            SearchField::Author => SearchField::Genre,
            SearchField::Genre => SearchField::Title,
        };
    }

    /// Insert a character into the title field. Pickers ignore typing.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() || self.active != SearchField::Title {
            return false;
        }
        self.title.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        if self.active == SearchField::Title {
            self.title.pop();
        }
    }

    /// Step the focused picker forwards or backwards, wrapping at either end.
    pub(crate) fn cycle(&mut self, delta: isize, authors: usize, genres: usize) {
        let (index, len) = match self.active {
            SearchField::Title => return,
            SearchField::Author => (&mut self.author, authors),
            SearchField::Genre => (&mut self.genre, genres),
        };
        if len == 0 {
            *index = 0;
            return;
        }
        let len = len as isize;
        *index = (*index as isize + delta).rem_euclid(len) as usize;
    }

    /// Translate the form into filter criteria, reading picker values from
    /// the given option lists.
    pub(crate) fn criteria(
        &self,
        authors: &[SelectOption],
        genres: &[SelectOption],
    ) -> FilterCriteria {
        FilterCriteria::from_fields(
            Some(&self.title),
            authors.get(self.author).map(|option| option.value.as_str()),
            genres.get(self.genre).map(|option| option.value.as_str()),
        )
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(
        &self,
        field_name: &str,
        field: SearchField,
        options: &[SelectOption],
        accent: Style,
    ) -> Line<'static> {
        let is_active = self.active == field;
        let value = match field {
            SearchField::Title => {
                if self.title.is_empty() && !is_active {
                    "<any title>".to_string()
                } else {
                    self.title.clone()
                }
            }
            SearchField::Author => picker_label(options, self.author),
            SearchField::Genre => picker_label(options, self.genre),
        };

        let label_style = if is_active {
            accent.add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut spans = vec![Span::styled(format!("{field_name}: "), label_style)];
        if field == SearchField::Title {
            spans.push(Span::raw(value));
        } else {
            spans.push(Span::raw(format!("‹ {value} ›")));
        }
        Line::from(spans)
    }

    pub(crate) fn title_len(&self) -> usize {
        self.title.chars().count()
    }
}

/// Settings form state: just the theme being chosen.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SettingsForm {
    pub(crate) theme: Theme,
}

impl SettingsForm {
    pub(crate) fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub(crate) fn toggle(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub(crate) fn build_line(&self, accent: Style) -> Line<'static> {
        let mut spans = vec![Span::raw("Theme: ")];
        for (idx, theme) in Theme::ALL.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::raw("  "));
            }
            if *theme == self.theme {
                spans.push(Span::styled(
                    format!("[{}]", theme.label()),
                    accent.add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::raw(format!(" {} ", theme.label())));
            }
        }
        Line::from(spans)
    }
}

fn option_index(options: &[SelectOption], value: &str) -> usize {
    options
        .iter()
        .position(|option| option.value == value)
        .unwrap_or(0)
}

fn picker_label(options: &[SelectOption], index: usize) -> String {
    options
        .get(index)
        .map(|option| option.label.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Selector;

    fn options() -> Vec<SelectOption> {
        vec![
            SelectOption::new("any", "All Authors"),
            SelectOption::new("1", "Frank Herbert"),
            SelectOption::new("2", "Ann Other"),
        ]
    }

    #[test]
    fn cycle_wraps_in_both_directions() {
        let mut form = SearchForm::default();
        form.toggle_field();
        assert_eq!(form.active, SearchField::Author);
        form.cycle(-1, 3, 1);
        assert_eq!(form.author, 2);
        form.cycle(1, 3, 1);
        assert_eq!(form.author, 0);
    }

    #[test]
    fn typing_only_reaches_the_title() {
        let mut form = SearchForm::default();
        assert!(form.push_char('d'));
        form.toggle_field();
        assert!(!form.push_char('x'));
        form.backspace();
        assert_eq!(form.title, "d");
    }

    #[test]
    fn criteria_round_trip_through_the_form() {
        let authors = options();
        let genres = vec![SelectOption::new("any", "All Genres")];
        let criteria = FilterCriteria::from_fields(Some("dun"), Some("2"), None);
        let form = SearchForm::from_criteria(&criteria, &authors, &genres);
        assert_eq!(form.author, 2);
        assert_eq!(form.genre, 0);

        let rebuilt = form.criteria(&authors, &genres);
        assert_eq!(rebuilt.title, "dun");
        assert_eq!(rebuilt.author, Selector::Id("2".to_string()));
        assert_eq!(rebuilt.genre, Selector::Any);
    }

    #[test]
    fn settings_toggle_switches_theme() {
        let mut form = SettingsForm::new(Theme::Day);
        form.toggle();
        assert_eq!(form.theme, Theme::Night);
    }
}
