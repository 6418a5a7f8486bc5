use tracing::{debug, warn};

use crate::db::PreferenceStore;
use crate::models::{Book, Catalog};

use super::filter::{filter_books, FilterCriteria, ANY};
use super::surface::{BookDetail, PreviewRow, SelectOption, Surface};
use super::theme::{resolve_initial_theme, Theme, ThemeError};

/// Everything the controller tracks between events.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Books satisfying the current criteria, in catalog order.
    pub matches: Vec<Book>,
    /// How many page-sized chunks of `matches` have been rendered.
    pub page_cursor: usize,
    /// Id of the book shown in the detail overlay.
    pub active_book: Option<String>,
    pub theme: Theme,
    /// Criteria behind `matches`, kept so the search form can reopen with them.
    pub criteria: FilterCriteria,
    pub search_open: bool,
    pub settings_open: bool,
}

/// Owns the view state and keeps the surface in step with it. Every public
/// operation runs to completion and leaves the surface consistent.
pub struct CatalogController<S, P> {
    catalog: Catalog,
    page_size: usize,
    state: ViewState,
    surface: S,
    prefs: P,
}

impl<S: Surface, P: PreferenceStore> CatalogController<S, P> {
    /// Render the first page of the unfiltered catalog, fill both pickers and
    /// apply the startup theme. `host_dark` is the environment's dark-mode
    /// hint, if it gave one.
    pub fn initialize(
        catalog: Catalog,
        page_size: usize,
        surface: S,
        prefs: P,
        host_dark: Option<bool>,
    ) -> Self {
        let persisted = match prefs.load_theme() {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "theme preference unavailable, using default");
                None
            }
        };
        let theme = resolve_initial_theme(persisted.as_deref(), host_dark);

        let mut controller = Self {
            state: ViewState {
                matches: catalog.books.clone(),
                page_cursor: 1,
                active_book: None,
                theme,
                criteria: FilterCriteria::default(),
                search_open: false,
                settings_open: false,
            },
            catalog,
            page_size: page_size.max(1),
            surface,
            prefs,
        };

        let first_page = controller.preview_rows(0..controller.page_size);
        controller.surface.clear_rows();
        controller.surface.append_rows(&first_page);
        controller
            .surface
            .set_empty_state(controller.state.matches.is_empty());

        let authors = picker_options("All Authors", &controller.catalog.authors);
        let genres = picker_options("All Genres", &controller.catalog.genres);
        controller.surface.set_author_options(&authors);
        controller.surface.set_genre_options(&genres);

        controller.render_theme();
        controller.refresh_show_more();

        debug!(
            books = controller.catalog.len(),
            page_size = controller.page_size,
            theme = %theme,
            "catalog view initialized"
        );
        controller
    }

    /// Replace `matches` with the books satisfying `criteria` and render the
    /// first page of them.
    pub fn apply_filter(&mut self, criteria: &FilterCriteria) {
        self.state.matches = filter_books(&self.catalog.books, criteria);
        self.state.criteria = criteria.clone();
        self.state.page_cursor = 1;

        let first_page = self.preview_rows(0..self.page_size);
        self.surface.clear_rows();
        self.surface.append_rows(&first_page);
        self.surface.set_empty_state(self.state.matches.is_empty());
        self.refresh_show_more();

        debug!(
            title = %criteria.title,
            author = criteria.author.as_value(),
            genre = criteria.genre.as_value(),
            matches = self.state.matches.len(),
            "filter applied"
        );
    }

    /// Search form submission: filter, then hide the search overlay.
    pub fn submit_search(&mut self, criteria: &FilterCriteria) {
        self.apply_filter(criteria);
        self.toggle_search_overlay(false);
    }

    /// Append the next page of matches. Returns `false` without touching
    /// anything when every match is already shown.
    pub fn show_more(&mut self) -> bool {
        let start = self.state.page_cursor * self.page_size;
        if start >= self.state.matches.len() {
            return false;
        }

        let next_page = self.preview_rows(start..start + self.page_size);
        self.surface.append_rows(&next_page);
        self.state.page_cursor += 1;
        self.refresh_show_more();

        debug!(
            page_cursor = self.state.page_cursor,
            remaining = self.remaining(),
            "showed more books"
        );
        true
    }

    /// Open the detail overlay for `book_id`. Stale ids are ignored.
    pub fn select_book(&mut self, book_id: &str) -> bool {
        let Some(book) = self.catalog.find_book(book_id) else {
            debug!(book_id, "ignoring selection of unknown book");
            return false;
        };

        let detail = BookDetail {
            image: book.image.clone(),
            blur_image: book.image.clone(),
            title: book.title.clone(),
            subtitle: format!(
                "{} ({})",
                self.catalog.author_name(&book.author_id),
                book.published_year()
            ),
            description: book.description.clone(),
        };
        self.state.active_book = Some(book.id.clone());
        self.surface.open_detail(&detail);
        true
    }

    pub fn close_detail(&mut self) {
        self.state.active_book = None;
        self.surface.close_detail();
    }

    /// Validate a submitted theme value, persist it and apply it. Unknown
    /// values leave the current theme untouched.
    pub fn set_theme(&mut self, raw: &str) -> Result<Theme, ThemeError> {
        let theme: Theme = raw.parse()?;
        self.apply_theme(theme);
        Ok(theme)
    }

    /// Persist then apply an already validated theme. A failing store is
    /// logged and the theme still takes effect for this session.
    pub fn apply_theme(&mut self, theme: Theme) {
        if let Err(err) = self.prefs.save_theme(theme.as_str()) {
            warn!(error = %err, theme = %theme, "failed to persist theme preference");
        }
        self.state.theme = theme;
        self.render_theme();
        debug!(theme = %theme, "theme applied");
    }

    /// Settings form submission: set the theme, then hide the settings
    /// overlay. The overlay stays open when the value is rejected.
    pub fn submit_settings(&mut self, raw: &str) -> Result<Theme, ThemeError> {
        let theme = self.set_theme(raw)?;
        self.toggle_settings_overlay(false);
        Ok(theme)
    }

    pub fn toggle_search_overlay(&mut self, visible: bool) {
        self.state.search_open = visible;
        self.surface.set_search_overlay(visible);
    }

    pub fn toggle_settings_overlay(&mut self, visible: bool) {
        self.state.settings_open = visible;
        self.surface.set_settings_overlay(visible);
    }

    /// Matches not yet rendered.
    pub fn remaining(&self) -> usize {
        self.state
            .matches
            .len()
            .saturating_sub(self.state.page_cursor * self.page_size)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn active_book(&self) -> Option<&Book> {
        self.state
            .active_book
            .as_deref()
            .and_then(|id| self.catalog.find_book(id))
    }

    fn refresh_show_more(&mut self) {
        let remaining = self.remaining();
        self.surface.set_show_more(remaining, remaining > 0);
    }

    fn render_theme(&mut self) {
        self.surface.apply_palette(self.state.theme.palette());
        self.surface.set_theme_selector(self.state.theme);
    }

    fn preview_rows(&self, range: std::ops::Range<usize>) -> Vec<PreviewRow> {
        let end = range.end.min(self.state.matches.len());
        let start = range.start.min(end);
        self.state.matches[start..end]
            .iter()
            .map(|book| PreviewRow {
                id: book.id.clone(),
                image: book.image.clone(),
                title: book.title.clone(),
                author: self.catalog.author_name(&book.author_id).to_string(),
            })
            .collect()
    }
}

fn picker_options(any_label: &str, entries: &[crate::models::NamedEntry]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(ANY, any_label))
        .chain(
            entries
                .iter()
                .map(|entry| SelectOption::new(entry.id.clone(), entry.name.clone())),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Result};
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::db::MemoryPreferences;
    use crate::models::NamedEntry;
    use crate::view::SurfaceModel;

    type Controller = CatalogController<SurfaceModel, MemoryPreferences>;

    fn book(id: &str, title: &str, author: &str, genres: &[&str]) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author_id: author.to_string(),
            image: format!("https://img/{id}.png"),
            description: format!("About {title}"),
            published: Utc.with_ymd_and_hms(1965, 8, 1, 0, 0, 0).unwrap(),
            genre_ids: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn dune_catalog() -> Catalog {
        Catalog::new(
            vec![
                book("A", "Dune", "1", &["2"]),
                book("B", "Duna Cafe", "2", &["3"]),
            ],
            vec![NamedEntry::new("1", "Frank Herbert"), NamedEntry::new("2", "Ann Other")],
            vec![NamedEntry::new("2", "Sci-Fi"), NamedEntry::new("3", "Food")],
        )
    }

    fn numbered_catalog(count: usize) -> Catalog {
        let books = (0..count)
            .map(|n| book(&format!("b{n}"), &format!("Book {n}"), "1", &["2"]))
            .collect();
        Catalog::new(books, vec![NamedEntry::new("1", "Writer")], vec![])
    }

    fn controller(catalog: Catalog, page_size: usize) -> Controller {
        CatalogController::initialize(
            catalog,
            page_size,
            SurfaceModel::default(),
            MemoryPreferences::default(),
            None,
        )
    }

    fn rendered_ids(controller: &Controller) -> Vec<String> {
        controller
            .surface()
            .rows
            .iter()
            .map(|row| row.id.clone())
            .collect()
    }

    fn assert_remaining_formula(controller: &Controller) {
        let state = controller.state();
        let expected = state
            .matches
            .len()
            .saturating_sub(state.page_cursor * controller.page_size());
        assert_eq!(controller.surface().remaining, expected);
        assert_eq!(controller.surface().show_more_enabled, expected > 0);
    }

    #[test]
    fn initialize_renders_first_page_and_pickers() {
        let ctl = controller(numbered_catalog(5), 2);
        assert_eq!(rendered_ids(&ctl), ["b0", "b1"]);
        assert_eq!(ctl.state().page_cursor, 1);
        assert_eq!(ctl.state().matches.len(), 5);
        assert_eq!(ctl.surface().remaining, 3);
        assert!(ctl.surface().show_more_enabled);
        assert!(!ctl.surface().empty_state);

        let authors = &ctl.surface().author_options;
        assert_eq!(authors[0], SelectOption::new("any", "All Authors"));
        assert_eq!(authors[1], SelectOption::new("1", "Writer"));
        assert_eq!(
            ctl.surface().genre_options,
            [SelectOption::new("any", "All Genres")]
        );
    }

    #[test]
    fn initialize_disables_show_more_for_small_catalogs() {
        let ctl = controller(numbered_catalog(2), 5);
        assert_eq!(ctl.surface().remaining, 0);
        assert!(!ctl.surface().show_more_enabled);
    }

    #[test]
    fn initialize_uses_persisted_theme_before_host_signal() {
        let ctl = CatalogController::initialize(
            dune_catalog(),
            1,
            SurfaceModel::default(),
            MemoryPreferences::with_theme("night"),
            Some(false),
        );
        assert_eq!(ctl.state().theme, Theme::Night);
        assert_eq!(ctl.surface().theme_selector, Theme::Night);
        assert_eq!(ctl.surface().palette, Theme::Night.palette());

        let from_host = CatalogController::initialize(
            dune_catalog(),
            1,
            SurfaceModel::default(),
            MemoryPreferences::default(),
            Some(true),
        );
        assert_eq!(from_host.state().theme, Theme::Night);
    }

    struct BrokenPreferences;

    impl PreferenceStore for BrokenPreferences {
        fn load_theme(&self) -> Result<Option<String>> {
            Err(anyhow!("storage unavailable"))
        }

        fn save_theme(&mut self, _theme: &str) -> Result<()> {
            Err(anyhow!("storage unavailable"))
        }
    }

    #[test]
    fn failing_preference_store_falls_back_and_still_applies() {
        let mut ctl = CatalogController::initialize(
            dune_catalog(),
            1,
            SurfaceModel::default(),
            BrokenPreferences,
            None,
        );
        assert_eq!(ctl.state().theme, Theme::Day);
        assert_eq!(ctl.set_theme("night"), Ok(Theme::Night));
        assert_eq!(ctl.surface().palette, Theme::Night.palette());
    }

    #[test]
    fn dune_example_filters_and_pages() {
        let mut ctl = controller(dune_catalog(), 1);
        ctl.apply_filter(&FilterCriteria::from_fields(Some("dun"), Some("any"), Some("any")));

        let matches: Vec<_> = ctl.state().matches.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(matches, ["A", "B"]);
        assert_eq!(rendered_ids(&ctl), ["A"]);
        assert_eq!(ctl.surface().show_more_label(), "Show more (1)");

        assert!(ctl.show_more());
        assert_eq!(rendered_ids(&ctl), ["A", "B"]);
        assert_eq!(ctl.surface().show_more_label(), "Show more (0)");
        assert!(!ctl.surface().show_more_enabled);
    }

    #[test]
    fn author_filter_example() {
        let mut ctl = controller(dune_catalog(), 1);
        ctl.apply_filter(&FilterCriteria::from_fields(Some(""), Some("2"), Some("any")));
        let matches: Vec<_> = ctl.state().matches.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(matches, ["B"]);
        assert_eq!(rendered_ids(&ctl), ["B"]);
    }

    #[test]
    fn apply_filter_replaces_rows_and_resets_cursor() {
        let mut ctl = controller(numbered_catalog(6), 2);
        ctl.show_more();
        ctl.show_more();
        assert_eq!(ctl.state().page_cursor, 3);

        let criteria = FilterCriteria::from_fields(Some("book"), None, None);
        ctl.apply_filter(&criteria);
        assert_eq!(ctl.state().page_cursor, 1);
        assert_eq!(rendered_ids(&ctl), ["b0", "b1"]);
        assert_remaining_formula(&ctl);

        let before = (ctl.state().matches.clone(), rendered_ids(&ctl));
        ctl.apply_filter(&criteria);
        assert_eq!((ctl.state().matches.clone(), rendered_ids(&ctl)), before);
    }

    #[test]
    fn empty_state_tracks_match_count() {
        let mut ctl = controller(dune_catalog(), 1);
        ctl.apply_filter(&FilterCriteria::from_fields(Some("nothing like this"), None, None));
        assert!(ctl.state().matches.is_empty());
        assert!(ctl.surface().empty_state);
        assert!(ctl.surface().rows.is_empty());
        assert_eq!(ctl.surface().remaining, 0);
        assert!(!ctl.surface().show_more_enabled);
        assert!(!ctl.show_more());

        ctl.apply_filter(&FilterCriteria::default());
        assert!(!ctl.surface().empty_state);
    }

    #[test]
    fn show_more_never_repeats_and_stops_at_the_end() {
        let page_size = 3;
        let total = 10;
        let mut ctl = controller(numbered_catalog(total), page_size);
        let pages = total.div_ceil(page_size);

        for calls in 1..=6 {
            let advanced = ctl.show_more();
            assert_eq!(advanced, calls < pages);

            let shown = (calls + 1).min(pages) * page_size;
            let expected: Vec<_> = ctl.state().matches[..shown.min(total)]
                .iter()
                .map(|b| b.id.clone())
                .collect();
            assert_eq!(rendered_ids(&ctl), expected);
            assert_remaining_formula(&ctl);
        }
        assert_eq!(ctl.state().page_cursor, pages);
    }

    #[test]
    fn select_book_opens_detail_overlay() {
        let mut ctl = controller(dune_catalog(), 1);
        assert!(ctl.select_book("A"));
        let detail = ctl.surface().detail.clone().unwrap();
        assert_eq!(detail.title, "Dune");
        assert_eq!(detail.subtitle, "Frank Herbert (1965)");
        assert_eq!(detail.image, "https://img/A.png");
        assert_eq!(detail.blur_image, detail.image);
        assert_eq!(detail.description, "About Dune");
        assert_eq!(ctl.active_book().map(|b| b.id.as_str()), Some("A"));
    }

    #[test]
    fn select_book_looks_beyond_current_matches() {
        let mut ctl = controller(dune_catalog(), 1);
        ctl.apply_filter(&FilterCriteria::from_fields(None, Some("2"), None));
        assert!(ctl.select_book("A"));
    }

    #[test]
    fn stale_selection_is_ignored() {
        let mut ctl = controller(dune_catalog(), 1);
        assert!(ctl.select_book("B"));
        assert!(!ctl.select_book("Z"));
        assert_eq!(ctl.state().active_book.as_deref(), Some("B"));
        assert_eq!(ctl.surface().detail.as_ref().map(|d| d.title.as_str()), Some("Duna Cafe"));

        let mut fresh = controller(dune_catalog(), 1);
        assert!(!fresh.select_book("Z"));
        assert!(fresh.surface().detail.is_none());
        assert!(fresh.state().active_book.is_none());
    }

    #[test]
    fn close_detail_is_idempotent() {
        let mut ctl = controller(dune_catalog(), 1);
        ctl.select_book("A");
        ctl.close_detail();
        ctl.close_detail();
        assert!(ctl.surface().detail.is_none());
        assert!(ctl.state().active_book.is_none());
    }

    #[test]
    fn theme_round_trip_restores_colours_and_persists() {
        let mut ctl = controller(dune_catalog(), 1);
        let original = ctl.surface().palette;

        assert_eq!(ctl.set_theme("night"), Ok(Theme::Night));
        assert_ne!(ctl.surface().palette, original);
        assert_eq!(ctl.set_theme("day"), Ok(Theme::Day));
        assert_eq!(ctl.surface().palette, original);
        assert_eq!(ctl.prefs.load_theme().unwrap().as_deref(), Some("day"));
    }

    #[test]
    fn unknown_theme_is_rejected_without_side_effects() {
        let mut ctl = controller(dune_catalog(), 1);
        ctl.toggle_settings_overlay(true);
        let err = ctl.submit_settings("sepia").unwrap_err();
        assert_eq!(err, ThemeError::Unknown("sepia".to_string()));
        assert_eq!(ctl.state().theme, Theme::Day);
        assert!(ctl.surface().settings_open);
        assert_eq!(ctl.prefs.load_theme().unwrap(), None);
    }

    #[test]
    fn form_submissions_close_their_overlays() {
        let mut ctl = controller(dune_catalog(), 1);
        ctl.toggle_search_overlay(true);
        ctl.toggle_settings_overlay(true);

        ctl.submit_search(&FilterCriteria::from_fields(Some("cafe"), None, None));
        assert!(!ctl.surface().search_open);
        assert!(ctl.surface().settings_open);

        ctl.submit_settings("night").unwrap();
        assert!(!ctl.surface().settings_open);
        assert!(!ctl.state().settings_open);
    }

    #[test]
    fn overlay_toggles_leave_filter_state_alone() {
        let mut ctl = controller(numbered_catalog(4), 1);
        ctl.show_more();
        ctl.toggle_search_overlay(true);
        ctl.toggle_search_overlay(false);
        ctl.toggle_settings_overlay(true);
        assert_eq!(ctl.state().page_cursor, 2);
        assert_eq!(rendered_ids(&ctl), ["b0", "b1"]);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let ctl = controller(numbered_catalog(3), 0);
        assert_eq!(ctl.page_size(), 1);
        assert_eq!(rendered_ids(&ctl), ["b0"]);
    }
}
