//! Built-in sample catalog written to an empty database on first launch.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Book, NamedEntry};

const AUTHORS: &[(&str, &str)] = &[
    ("a-austen", "Jane Austen"),
    ("a-dickens", "Charles Dickens"),
    ("a-dostoevsky", "Fyodor Dostoevsky"),
    ("a-doyle", "Arthur Conan Doyle"),
    ("a-eliot", "George Eliot"),
    ("a-melville", "Herman Melville"),
    ("a-shelley", "Mary Shelley"),
    ("a-stevenson", "Robert Louis Stevenson"),
    ("a-tolstoy", "Leo Tolstoy"),
    ("a-twain", "Mark Twain"),
    ("a-verne", "Jules Verne"),
    ("a-wells", "H. G. Wells"),
    ("a-wilde", "Oscar Wilde"),
];

const GENRES: &[(&str, &str)] = &[
    ("g-adventure", "Adventure"),
    ("g-classic", "Classic"),
    ("g-crime", "Crime"),
    ("g-gothic", "Gothic"),
    ("g-humour", "Humour"),
    ("g-romance", "Romance"),
    ("g-satire", "Satire"),
    ("g-scifi", "Science Fiction"),
    ("g-social", "Social Novel"),
    ("g-tragedy", "Tragedy"),
];

struct SampleBook {
    id: &'static str,
    title: &'static str,
    author: &'static str,
    genres: &'static [&'static str],
    /// `YYYY-MM-DD`
    published: &'static str,
    description: &'static str,
}

const BOOKS: &[SampleBook] = &[
    SampleBook {
        id: "b-001",
        title: "Pride and Prejudice",
        author: "a-austen",
        genres: &["g-romance", "g-classic"],
        published: "1813-01-28",
        description: "Elizabeth Bennet trades barbs with the proud Mr Darcy while her mother \
            schemes to marry off five daughters.",
    },
    SampleBook {
        id: "b-002",
        title: "Sense and Sensibility",
        author: "a-austen",
        genres: &["g-romance", "g-classic"],
        published: "1811-10-30",
        description: "Two sisters, one ruled by reason and one by feeling, navigate love after \
            their family loses its fortune.",
    },
    SampleBook {
        id: "b-003",
        title: "Emma",
        author: "a-austen",
        genres: &["g-romance", "g-humour"],
        published: "1815-12-23",
        description: "A confident young matchmaker meddles in the romances of her neighbours with \
            mixed results.",
    },
    SampleBook {
        id: "b-004",
        title: "Persuasion",
        author: "a-austen",
        genres: &["g-romance"],
        published: "1817-12-20",
        description: "Anne Elliot meets again the naval officer she was persuaded to refuse eight \
            years earlier.",
    },
    SampleBook {
        id: "b-005",
        title: "Northanger Abbey",
        author: "a-austen",
        genres: &["g-satire", "g-gothic"],
        published: "1817-12-20",
        description: "An avid reader of gothic novels expects horrors at an old abbey and finds \
            only ordinary people.",
    },
    SampleBook {
        id: "b-006",
        title: "Great Expectations",
        author: "a-dickens",
        genres: &["g-classic", "g-social"],
        published: "1861-08-01",
        description: "The orphan Pip rises from the forge to London society thanks to a mysterious \
            benefactor.",
    },
    SampleBook {
        id: "b-007",
        title: "A Tale of Two Cities",
        author: "a-dickens",
        genres: &["g-classic", "g-tragedy"],
        published: "1859-11-26",
        description: "Lives in London and Paris are swept up in the upheaval of the French \
            Revolution.",
    },
    SampleBook {
        id: "b-008",
        title: "Oliver Twist",
        author: "a-dickens",
        genres: &["g-social", "g-crime"],
        published: "1838-11-09",
        description: "A workhouse orphan escapes to London and falls in with a gang of young \
            pickpockets.",
    },
    SampleBook {
        id: "b-009",
        title: "Bleak House",
        author: "a-dickens",
        genres: &["g-social", "g-satire"],
        published: "1853-09-01",
        description: "An endless inheritance suit in the Court of Chancery draws in and ruins \
            everyone it touches.",
    },
    SampleBook {
        id: "b-010",
        title: "David Copperfield",
        author: "a-dickens",
        genres: &["g-classic"],
        published: "1850-11-01",
        description: "A man recounts his life from a hard childhood to success as a writer.",
    },
    SampleBook {
        id: "b-011",
        title: "Crime and Punishment",
        author: "a-dostoevsky",
        genres: &["g-crime", "g-classic"],
        published: "1866-12-01",
        description: "An impoverished student commits murder and is consumed by guilt and a \
            patient investigator.",
    },
    SampleBook {
        id: "b-012",
        title: "The Brothers Karamazov",
        author: "a-dostoevsky",
        genres: &["g-classic", "g-tragedy"],
        published: "1880-11-01",
        description: "Three brothers wrestle with faith, doubt and the murder of their father.",
    },
    SampleBook {
        id: "b-013",
        title: "The Idiot",
        author: "a-dostoevsky",
        genres: &["g-tragedy"],
        published: "1869-01-01",
        description: "A guileless prince returns to St Petersburg society and is destroyed by its \
            passions.",
    },
    SampleBook {
        id: "b-014",
        title: "A Study in Scarlet",
        author: "a-doyle",
        genres: &["g-crime"],
        published: "1887-11-01",
        description: "Dr Watson meets Sherlock Holmes and the pair investigate a body found in an \
            empty house.",
    },
    SampleBook {
        id: "b-015",
        title: "The Sign of the Four",
        author: "a-doyle",
        genres: &["g-crime", "g-adventure"],
        published: "1890-02-01",
        description: "A missing father, a yearly pearl and a stolen treasure lead Holmes down the \
            Thames.",
    },
    SampleBook {
        id: "b-016",
        title: "The Hound of the Baskervilles",
        author: "a-doyle",
        genres: &["g-crime", "g-gothic"],
        published: "1902-04-01",
        description: "A family curse and a spectral hound haunt the moors of Devon.",
    },
    SampleBook {
        id: "b-017",
        title: "The Lost World",
        author: "a-doyle",
        genres: &["g-adventure", "g-scifi"],
        published: "1912-10-01",
        description: "An expedition to a South American plateau finds creatures thought long \
            extinct.",
    },
    SampleBook {
        id: "b-018",
        title: "Middlemarch",
        author: "a-eliot",
        genres: &["g-social", "g-classic"],
        published: "1871-12-01",
        description: "The lives of an idealistic young woman and a provincial doctor intertwine in \
            a Midlands town.",
    },
    SampleBook {
        id: "b-019",
        title: "Silas Marner",
        author: "a-eliot",
        genres: &["g-social"],
        published: "1861-04-02",
        description: "A miserly weaver finds redemption after a foundling child toddles into his \
            cottage.",
    },
    SampleBook {
        id: "b-020",
        title: "The Mill on the Floss",
        author: "a-eliot",
        genres: &["g-tragedy", "g-social"],
        published: "1860-04-04",
        description: "A brother and sister grow apart as their family's mill is lost.",
    },
    SampleBook {
        id: "b-021",
        title: "Moby-Dick",
        author: "a-melville",
        genres: &["g-adventure", "g-classic"],
        published: "1851-10-18",
        description: "Captain Ahab drives the Pequod around the world in pursuit of the white \
            whale.",
    },
    SampleBook {
        id: "b-022",
        title: "Bartleby, the Scrivener",
        author: "a-melville",
        genres: &["g-satire"],
        published: "1853-11-01",
        description: "A Wall Street copyist begins to answer every request with 'I would prefer \
            not to'.",
    },
    SampleBook {
        id: "b-023",
        title: "Frankenstein",
        author: "a-shelley",
        genres: &["g-gothic", "g-scifi"],
        published: "1818-01-01",
        description: "A young scientist creates life and abandons it, with terrible consequences.",
    },
    SampleBook {
        id: "b-024",
        title: "The Last Man",
        author: "a-shelley",
        genres: &["g-scifi", "g-tragedy"],
        published: "1826-01-23",
        description: "A plague sweeps the late twenty-first century world, leaving one survivor.",
    },
    SampleBook {
        id: "b-025",
        title: "Treasure Island",
        author: "a-stevenson",
        genres: &["g-adventure"],
        published: "1883-11-14",
        description: "Young Jim Hawkins sails in search of buried gold alongside the cook Long \
            John Silver.",
    },
    SampleBook {
        id: "b-026",
        title: "Strange Case of Dr Jekyll and Mr Hyde",
        author: "a-stevenson",
        genres: &["g-gothic", "g-crime"],
        published: "1886-01-05",
        description: "A respected doctor's experiments release a violent second self.",
    },
    SampleBook {
        id: "b-027",
        title: "Kidnapped",
        author: "a-stevenson",
        genres: &["g-adventure"],
        published: "1886-05-01",
        description: "Cheated of his inheritance, David Balfour flees across the Highlands with a \
            Jacobite outlaw.",
    },
    SampleBook {
        id: "b-028",
        title: "War and Peace",
        author: "a-tolstoy",
        genres: &["g-classic", "g-tragedy"],
        published: "1869-01-01",
        description: "Five aristocratic families live through Napoleon's invasion of Russia.",
    },
    SampleBook {
        id: "b-029",
        title: "Anna Karenina",
        author: "a-tolstoy",
        genres: &["g-romance", "g-tragedy"],
        published: "1878-01-01",
        description: "A married woman's affair with a cavalry officer sets her against all of \
            society.",
    },
    SampleBook {
        id: "b-030",
        title: "The Death of Ivan Ilyich",
        author: "a-tolstoy",
        genres: &["g-tragedy"],
        published: "1886-01-01",
        description: "A judge confronts the emptiness of his comfortable life as illness takes \
            hold.",
    },
    SampleBook {
        id: "b-031",
        title: "Adventures of Huckleberry Finn",
        author: "a-twain",
        genres: &["g-adventure", "g-satire"],
        published: "1884-12-10",
        description: "Huck and the runaway Jim raft down the Mississippi.",
    },
    SampleBook {
        id: "b-032",
        title: "The Adventures of Tom Sawyer",
        author: "a-twain",
        genres: &["g-adventure", "g-humour"],
        published: "1876-06-01",
        description: "A mischievous boy whitewashes fences, witnesses a murder and hunts for \
            treasure.",
    },
    SampleBook {
        id: "b-033",
        title: "A Connecticut Yankee in King Arthur's Court",
        author: "a-twain",
        genres: &["g-satire", "g-scifi"],
        published: "1889-12-01",
        description: "A blow to the head sends a factory superintendent back to Camelot.",
    },
    SampleBook {
        id: "b-034",
        title: "Twenty Thousand Leagues Under the Seas",
        author: "a-verne",
        genres: &["g-adventure", "g-scifi"],
        published: "1870-06-20",
        description: "Captain Nemo's submarine Nautilus carries three captives around the ocean \
            floor.",
    },
    SampleBook {
        id: "b-035",
        title: "Around the World in Eighty Days",
        author: "a-verne",
        genres: &["g-adventure"],
        published: "1872-12-22",
        description: "Phileas Fogg wagers his fortune that he can circle the globe in eighty days.",
    },
    SampleBook {
        id: "b-036",
        title: "Journey to the Centre of the Earth",
        author: "a-verne",
        genres: &["g-adventure", "g-scifi"],
        published: "1864-11-25",
        description: "A professor, his nephew and their guide descend an Icelandic volcano.",
    },
    SampleBook {
        id: "b-037",
        title: "The Time Machine",
        author: "a-wells",
        genres: &["g-scifi"],
        published: "1895-05-07",
        description: "A Victorian inventor travels to the year 802,701 and finds humanity divided.",
    },
    SampleBook {
        id: "b-038",
        title: "The War of the Worlds",
        author: "a-wells",
        genres: &["g-scifi"],
        published: "1898-01-01",
        description: "Martian cylinders land in Surrey and tripod machines lay waste to England.",
    },
    SampleBook {
        id: "b-039",
        title: "The Invisible Man",
        author: "a-wells",
        genres: &["g-scifi", "g-crime"],
        published: "1897-09-01",
        description: "A scientist who has made himself invisible cannot find the way back.",
    },
    SampleBook {
        id: "b-040",
        title: "The Picture of Dorian Gray",
        author: "a-wilde",
        genres: &["g-gothic", "g-classic"],
        published: "1890-07-20",
        description: "A portrait ages and decays while its beautiful subject stays young.",
    },
    SampleBook {
        id: "b-041",
        title: "The Importance of Being Earnest",
        author: "a-wilde",
        genres: &["g-humour", "g-satire"],
        published: "1895-02-14",
        description: "Two gentlemen invent alter egos and tangle their engagements.",
    },
];

pub(crate) fn sample_authors() -> Vec<NamedEntry> {
    AUTHORS
        .iter()
        .map(|(id, name)| NamedEntry::new(*id, *name))
        .collect()
}

pub(crate) fn sample_genres() -> Vec<NamedEntry> {
    GENRES
        .iter()
        .map(|(id, name)| NamedEntry::new(*id, *name))
        .collect()
}

pub(crate) fn sample_books() -> Vec<Book> {
    BOOKS
        .iter()
        .map(|sample| Book {
            id: sample.id.to_string(),
            title: sample.title.to_string(),
            author_id: sample.author.to_string(),
            image: format!("https://covers.example.com/{}.jpg", sample.id),
            description: sample.description.to_string(),
            published: sample_date(sample.published),
            genre_ids: sample.genres.iter().map(|genre| genre.to_string()).collect(),
        })
        .collect()
}

/// The table above is hand-checked, so a malformed entry falls back to the
/// epoch rather than aborting the seed.
fn sample_date(raw: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn sample_books_reference_known_tables() {
        let authors: HashSet<_> = AUTHORS.iter().map(|(id, _)| *id).collect();
        let genres: HashSet<_> = GENRES.iter().map(|(id, _)| *id).collect();
        let mut ids = HashSet::new();
        for book in sample_books() {
            assert!(ids.insert(book.id.clone()), "duplicate id {}", book.id);
            assert!(authors.contains(book.author_id.as_str()));
            assert!(book.genre_ids.iter().all(|g| genres.contains(g.as_str())));
            assert!(book.published_year() > 1800, "{} has no date", book.id);
            assert!(!book.description.contains("  "), "{} description spacing", book.id);
        }
    }
}
