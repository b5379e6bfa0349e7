use core::cmp::Ordering;
use core::fmt;

use serde::Serialize;

use reelhouse_core::{DomainError, DomainResult, ValueObject};

/// Genre tag of comedies.
pub const COMEDY: char = 'F';
/// Genre tag of dramas.
pub const DRAMA: char = 'D';
/// Genre tag of classics.
pub const CLASSIC: char = 'C';

/// Availability counters shared by every movie variant.
///
/// Invariant: `on_loan <= total`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Stock {
    total: u32,
    on_loan: u32,
}

impl Stock {
    pub fn new(total: u32) -> Self {
        Self { total, on_loan: 0 }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn on_loan(&self) -> u32 {
        self.on_loan
    }

    pub fn available(&self) -> u32 {
        self.total - self.on_loan
    }

    /// Lend one copy out. Returns `false` (state untouched) when none is left.
    pub fn try_borrow(&mut self) -> bool {
        if self.on_loan < self.total {
            self.on_loan += 1;
            true
        } else {
            false
        }
    }

    /// Take one copy back. Returns `false` (state untouched) when none is out.
    pub fn try_return(&mut self) -> bool {
        if self.on_loan > 0 {
            self.on_loan -= 1;
            true
        } else {
            false
        }
    }
}

/// Comedy: identified by title, then release year.
#[derive(Debug, Clone, Serialize)]
pub struct Comedy {
    director: String,
    title: String,
    year: i32,
    stock: Stock,
}

/// Drama: identified by director, then title.
#[derive(Debug, Clone, Serialize)]
pub struct Drama {
    director: String,
    title: String,
    year: i32,
    stock: Stock,
}

/// Classic: identified by release month, release year, then lead actor.
#[derive(Debug, Clone, Serialize)]
pub struct Classic {
    director: String,
    title: String,
    actor: String,
    month: u32,
    year: i32,
    stock: Stock,
}

impl Comedy {
    pub fn new(copies: u32, director: impl Into<String>, title: impl Into<String>, year: i32) -> Self {
        Self {
            director: director.into(),
            title: title.into(),
            year,
            stock: Stock::new(copies),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl Drama {
    pub fn new(copies: u32, director: impl Into<String>, title: impl Into<String>, year: i32) -> Self {
        Self {
            director: director.into(),
            title: title.into(),
            year,
            stock: Stock::new(copies),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl Classic {
    pub fn new(
        copies: u32,
        director: impl Into<String>,
        title: impl Into<String>,
        actor: impl Into<String>,
        month: u32,
        year: i32,
    ) -> Self {
        Self {
            director: director.into(),
            title: title.into(),
            actor: actor.into(),
            month,
            year,
            stock: Stock::new(copies),
        }
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

/// A rentable movie.
///
/// Closed set of variants; the genre tag drives ordering, searching and
/// rendering. Equality compares identity fields only, never stock.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "genre", rename_all = "lowercase")]
pub enum Movie {
    Comedy(Comedy),
    Drama(Drama),
    Classic(Classic),
}

impl Movie {
    pub fn genre(&self) -> char {
        match self {
            Movie::Comedy(_) => COMEDY,
            Movie::Drama(_) => DRAMA,
            Movie::Classic(_) => CLASSIC,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Movie::Comedy(m) => &m.title,
            Movie::Drama(m) => &m.title,
            Movie::Classic(m) => &m.title,
        }
    }

    pub fn director(&self) -> &str {
        match self {
            Movie::Comedy(m) => &m.director,
            Movie::Drama(m) => &m.director,
            Movie::Classic(m) => &m.director,
        }
    }

    pub fn stock(&self) -> Stock {
        match self {
            Movie::Comedy(m) => m.stock,
            Movie::Drama(m) => m.stock,
            Movie::Classic(m) => m.stock,
        }
    }

    fn stock_mut(&mut self) -> &mut Stock {
        match self {
            Movie::Comedy(m) => &mut m.stock,
            Movie::Drama(m) => &mut m.stock,
            Movie::Classic(m) => &mut m.stock,
        }
    }

    /// Identity key of this movie.
    pub fn key(&self) -> MovieKey {
        match self {
            Movie::Comedy(m) => MovieKey::Comedy {
                title: m.title.clone(),
                year: m.year,
            },
            Movie::Drama(m) => MovieKey::Drama {
                director: m.director.clone(),
                title: m.title.clone(),
            },
            Movie::Classic(m) => MovieKey::Classic {
                month: m.month,
                year: m.year,
                actor: m.actor.clone(),
            },
        }
    }

    /// Lend one copy out, or fail with [`DomainError::OutOfStock`].
    pub fn try_borrow(&mut self) -> DomainResult<()> {
        if self.stock_mut().try_borrow() {
            Ok(())
        } else {
            Err(DomainError::out_of_stock(self.title()))
        }
    }

    /// Take one copy back; `false` when no copy was out.
    pub fn try_return(&mut self) -> bool {
        self.stock_mut().try_return()
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Movie {}

impl PartialOrd for Movie {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Movie {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stock = self.stock();
        match self {
            Movie::Comedy(m) => write!(
                f,
                "Comedy: {} ({}) Dir: {}",
                m.title, m.year, m.director
            )?,
            Movie::Drama(m) => write!(f, "Drama: {}, {} ({})", m.director, m.title, m.year)?,
            Movie::Classic(m) => write!(
                f,
                "Classic: {} {} {} - {} Dir: {}",
                m.month, m.year, m.actor, m.title, m.director
            )?,
        }
        write!(f, " Stock: {} Out: {}", stock.available(), stock.on_loan())
    }
}

/// Identity of a movie, detached from its stock.
///
/// Transactions hold a key rather than the movie, and resolve it against the
/// catalog when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "genre", rename_all = "lowercase")]
pub enum MovieKey {
    Comedy { title: String, year: i32 },
    Drama { director: String, title: String },
    Classic { month: u32, year: i32, actor: String },
}

impl ValueObject for MovieKey {}

impl MovieKey {
    pub fn genre(&self) -> char {
        match self {
            MovieKey::Comedy { .. } => COMEDY,
            MovieKey::Drama { .. } => DRAMA,
            MovieKey::Classic { .. } => CLASSIC,
        }
    }

    /// Parse the free-text search criteria of a borrow/return line.
    ///
    /// - comedy: `Title, Year`
    /// - drama: `Director, Title` (anything after a second comma is ignored)
    /// - classic: `Month Year First Last`
    pub fn from_criteria(genre: char, criteria: &str) -> DomainResult<Self> {
        let criteria = criteria.trim();
        match genre {
            COMEDY => {
                let mut parts = criteria.split(',');
                let (Some(title), Some(year)) = (parts.next(), parts.next()) else {
                    return Err(DomainError::validation(format!(
                        "comedy criteria needs 'title, year': {criteria}"
                    )));
                };
                Ok(MovieKey::Comedy {
                    title: title.trim().to_string(),
                    year: parse_number(year, "year")?,
                })
            }
            DRAMA => {
                let mut parts = criteria.split(',');
                let (Some(director), Some(title)) = (parts.next(), parts.next()) else {
                    return Err(DomainError::validation(format!(
                        "drama criteria needs 'director, title': {criteria}"
                    )));
                };
                Ok(MovieKey::Drama {
                    director: director.trim().to_string(),
                    title: title.trim().to_string(),
                })
            }
            CLASSIC => {
                let tokens: Vec<&str> = criteria.split_whitespace().collect();
                let [month, year, first, last, ..] = tokens.as_slice() else {
                    return Err(DomainError::validation(format!(
                        "classic criteria needs 'month year first last': {criteria}"
                    )));
                };
                Ok(MovieKey::Classic {
                    month: parse_number(month, "month")?,
                    year: parse_number(year, "year")?,
                    actor: format!("{first} {last}"),
                })
            }
            other => Err(DomainError::UnknownGenre(other)),
        }
    }
}

impl PartialOrd for MovieKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MovieKey {
    /// Same-variant keys compare by identity fields; keys of different
    /// variants fall back to their genre tags.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                MovieKey::Comedy { title, year },
                MovieKey::Comedy {
                    title: other_title,
                    year: other_year,
                },
            ) => title.cmp(other_title).then(year.cmp(other_year)),
            (
                MovieKey::Drama { director, title },
                MovieKey::Drama {
                    director: other_director,
                    title: other_title,
                },
            ) => director
                .cmp(other_director)
                .then_with(|| title.cmp(other_title)),
            (
                MovieKey::Classic { month, year, actor },
                MovieKey::Classic {
                    month: other_month,
                    year: other_year,
                    actor: other_actor,
                },
            ) => month
                .cmp(other_month)
                .then(year.cmp(other_year))
                .then_with(|| actor.cmp(other_actor)),
            _ => self.genre().cmp(&other.genre()),
        }
    }
}

impl fmt::Display for MovieKey {
    /// Renders in the same shape [`MovieKey::from_criteria`] accepts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieKey::Comedy { title, year } => write!(f, "{title}, {year}"),
            MovieKey::Drama { director, title } => write!(f, "{director}, {title}"),
            MovieKey::Classic { month, year, actor } => write!(f, "{month} {year} {actor}"),
        }
    }
}

pub(crate) fn parse_number<T: core::str::FromStr>(raw: &str, field: &str) -> DomainResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::validation(format!("invalid {field}: '{}'", raw.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn comedy(title: &str, year: i32) -> Movie {
        Movie::Comedy(Comedy::new(3, "Dir", title, year))
    }

    #[test]
    fn borrow_until_out_of_stock() {
        let mut movie = Movie::Comedy(Comedy::new(2, "Nora Ephron", "Sleepless in Seattle", 1993));
        assert!(movie.try_borrow().is_ok());
        assert!(movie.try_borrow().is_ok());

        let err = movie.try_borrow().unwrap_err();
        assert_eq!(err, DomainError::OutOfStock("Sleepless in Seattle".to_string()));
        assert_eq!(movie.stock().on_loan(), 2);
        assert_eq!(movie.stock().available(), 0);
    }

    #[test]
    fn return_with_nothing_out_is_a_no_op() {
        let mut movie = comedy("Annie Hall", 1977);
        assert!(!movie.try_return());
        assert_eq!(movie.stock(), Stock::new(3));

        movie.try_borrow().unwrap();
        assert!(movie.try_return());
        assert_eq!(movie.stock().on_loan(), 0);
    }

    #[test]
    fn equality_ignores_stock_and_non_identity_fields() {
        let mut a = Movie::Drama(Drama::new(1, "Coen", "Fargo", 1996));
        let b = Movie::Drama(Drama::new(9, "Coen", "Fargo", 2001));
        a.try_borrow().unwrap();
        assert_eq!(a, b);

        let c = Movie::Drama(Drama::new(1, "Coen", "Barton Fink", 1996));
        assert_ne!(a, c);
    }

    #[test]
    fn different_variants_are_never_equal() {
        let a = Movie::Comedy(Comedy::new(1, "X", "Same", 2000));
        let b = Movie::Drama(Drama::new(1, "X", "Same", 2000));
        assert_ne!(a, b);
    }

    #[test]
    fn same_variant_ordering_uses_identity_fields() {
        assert!(comedy("Airplane", 1980) < comedy("Clue", 1985));
        assert!(comedy("Clue", 1985) < comedy("Clue", 1990));

        let a = Movie::Drama(Drama::new(1, "Altman", "Zed", 1990));
        let b = Movie::Drama(Drama::new(1, "Bergman", "Alpha", 1960));
        assert!(a < b);

        let c = Movie::Classic(Classic::new(1, "D", "T", "Zoe Z", 2, 1940));
        let d = Movie::Classic(Classic::new(1, "D", "T", "Amy A", 3, 1939));
        let e = Movie::Classic(Classic::new(1, "D", "T", "Amy A", 2, 1941));
        assert!(c < d);
        assert!(c < e);
    }

    #[test]
    fn cross_variant_ordering_falls_back_to_genre_tag() {
        let classic = Movie::Classic(Classic::new(1, "D", "T", "A B", 1, 1950));
        let drama = Movie::Drama(Drama::new(1, "D", "T", 1950));
        let funny = comedy("T", 1950);
        assert!(classic < drama);
        assert!(drama < funny);
        assert!(classic < funny);
    }

    #[test]
    fn renders_each_variant() {
        let mut c = Movie::Comedy(Comedy::new(10, "Nora Ephron", "You've Got Mail", 1998));
        c.try_borrow().unwrap();
        assert_eq!(
            c.to_string(),
            "Comedy: You've Got Mail (1998) Dir: Nora Ephron Stock: 9 Out: 1"
        );

        let d = Movie::Drama(Drama::new(10, "Steven Spielberg", "Schindler's List", 1993));
        assert_eq!(
            d.to_string(),
            "Drama: Steven Spielberg, Schindler's List (1993) Stock: 10 Out: 0"
        );

        let k = Movie::Classic(Classic::new(10, "George Cukor", "Holiday", "Katherine Hepburn", 9, 1938));
        assert_eq!(
            k.to_string(),
            "Classic: 9 1938 Katherine Hepburn - Holiday Dir: George Cukor Stock: 10 Out: 0"
        );
    }

    #[test]
    fn clone_is_independent() {
        let original = comedy("Big", 1988);
        let mut copy = original.clone();
        copy.try_borrow().unwrap();
        assert_eq!(original.stock().on_loan(), 0);
        assert_eq!(copy.stock().on_loan(), 1);
        assert_eq!(original, copy);
    }

    #[test]
    fn criteria_parse_per_genre() {
        assert_eq!(
            MovieKey::from_criteria(COMEDY, " Funny Movie, 1999 ").unwrap(),
            MovieKey::Comedy {
                title: "Funny Movie".to_string(),
                year: 1999
            }
        );
        assert_eq!(
            MovieKey::from_criteria(DRAMA, "Smith,Serious Film,").unwrap(),
            MovieKey::Drama {
                director: "Smith".to_string(),
                title: "Serious Film".to_string()
            }
        );
        assert_eq!(
            MovieKey::from_criteria(CLASSIC, "5  1940 Cary Grant").unwrap(),
            MovieKey::Classic {
                month: 5,
                year: 1940,
                actor: "Cary Grant".to_string()
            }
        );
    }

    #[test]
    fn criteria_rejects_malformed_input() {
        assert!(MovieKey::from_criteria(COMEDY, "No Year").is_err());
        assert!(MovieKey::from_criteria(COMEDY, "Title, soon").is_err());
        assert!(MovieKey::from_criteria(DRAMA, "Only Director").is_err());
        assert!(MovieKey::from_criteria(CLASSIC, "5 1940 Cary").is_err());
        assert_eq!(
            MovieKey::from_criteria('Z', "whatever"),
            Err(DomainError::UnknownGenre('Z'))
        );
    }

    #[test]
    fn key_display_round_trips_through_criteria() {
        let movies = [
            comedy("Funny Movie", 1999),
            Movie::Drama(Drama::new(1, "Smith", "Serious Film", 2001)),
            Movie::Classic(Classic::new(1, "Cukor", "Holiday", "Cary Grant", 6, 1938)),
        ];
        for movie in movies {
            let key = movie.key();
            let parsed = MovieKey::from_criteria(key.genre(), &key.to_string()).unwrap();
            assert_eq!(parsed, key);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: whatever sequence of borrows and returns is applied,
        /// `on_loan` stays within `0..=total`.
        #[test]
        fn stock_counters_stay_in_bounds(
            total in 0u32..8,
            ops in prop::collection::vec(any::<bool>(), 0..64)
        ) {
            let mut stock = Stock::new(total);
            for borrow in ops {
                let before = stock;
                let changed = if borrow { stock.try_borrow() } else { stock.try_return() };
                if !changed {
                    prop_assert_eq!(before, stock);
                }
                prop_assert!(stock.on_loan() <= stock.total());
                prop_assert_eq!(stock.total(), total);
            }
        }
    }
}
