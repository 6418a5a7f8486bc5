use crate::models::Book;

/// Value the author and genre pickers submit for "no restriction".
pub const ANY: &str = "any";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    #[default]
    Any,
    Id(String),
}

impl Selector {
    /// Parse a submitted picker value. Missing, blank and the sentinel all
    /// mean "any".
    pub fn from_field(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some(ANY) => Selector::Any,
            Some(id) => Selector::Id(id.to_string()),
        }
    }

    pub fn as_value(&self) -> &str {
        match self {
            Selector::Any => ANY,
            Selector::Id(id) => id,
        }
    }

    fn accepts(&self, id: &str) -> bool {
        match self {
            Selector::Any => true,
            Selector::Id(wanted) => wanted == id,
        }
    }
}

/// One submission of the search form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub title: String,
    pub author: Selector,
    pub genre: Selector,
}

impl FilterCriteria {
    /// Build criteria from raw form fields, treating absent values as
    /// "match everything" on that axis.
    pub fn from_fields(title: Option<&str>, author: Option<&str>, genre: Option<&str>) -> Self {
        Self {
            title: title.unwrap_or_default().to_string(),
            author: Selector::from_field(author),
            genre: Selector::from_field(genre),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.title.trim().is_empty() && self.author == Selector::Any && self.genre == Selector::Any
    }

    pub fn matches(&self, book: &Book) -> bool {
        let title_ok = self.title.trim().is_empty()
            || book
                .title
                .to_lowercase()
                .contains(&self.title.to_lowercase());
        let genre_ok = match &self.genre {
            Selector::Any => true,
            Selector::Id(_) => book.genre_ids.iter().any(|id| self.genre.accepts(id)),
        };
        title_ok && self.author.accepts(&book.author_id) && genre_ok
    }
}

/// Linear pass over the catalog keeping catalog order.
pub fn filter_books(books: &[Book], criteria: &FilterCriteria) -> Vec<Book> {
    books
        .iter()
        .filter(|book| criteria.matches(book))
        .cloned()
        .collect()
}
