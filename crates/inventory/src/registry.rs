//! Movie type registry: genre tag → constructor.
//!
//! The catalog and the loaders never name a concrete variant; they hand the
//! genre tag of a record to the registry and get a [`Movie`] (or an error)
//! back. Adding a kind of movie means registering one more constructor at
//! startup.

use std::collections::BTreeMap;

use reelhouse_core::{DomainError, DomainResult};

use crate::movie::{parse_number, Classic, Comedy, Drama, Movie, CLASSIC, COMEDY, DRAMA};

/// Raw fields of one movie record, after splitting and trimming.
///
/// `extra` is genre-specific: a release year for comedies and dramas, the
/// `First Last Month Year` block for classics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieRecord<'a> {
    pub copies: u32,
    pub director: &'a str,
    pub title: &'a str,
    pub extra: &'a str,
}

/// Builds a movie from a record, or explains why the record is malformed.
pub type MovieConstructor = Box<dyn Fn(&MovieRecord<'_>) -> DomainResult<Movie> + Send + Sync>;

/// Factory mapping genre tags to constructors.
#[derive(Default)]
pub struct MovieRegistry {
    creators: BTreeMap<char, MovieConstructor>,
}

impl core::fmt::Debug for MovieRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MovieRegistry")
            .field("tags", &self.creators.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl MovieRegistry {
    /// An empty registry; every `create` fails until something is registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the store's three genres registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(COMEDY, comedy_from_record);
        registry.register(DRAMA, drama_from_record);
        registry.register(CLASSIC, classic_from_record);
        registry
    }

    /// Bind `tag` to `constructor`. Re-registering a tag replaces the previous
    /// constructor.
    pub fn register<F>(&mut self, tag: char, constructor: F)
    where
        F: Fn(&MovieRecord<'_>) -> DomainResult<Movie> + Send + Sync + 'static,
    {
        if self.creators.insert(tag, Box::new(constructor)).is_some() {
            tracing::debug!(%tag, "movie constructor replaced");
        }
    }

    pub fn is_registered(&self, tag: char) -> bool {
        self.creators.contains_key(&tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = char> + '_ {
        self.creators.keys().copied()
    }

    /// Build a movie of genre `tag`.
    pub fn create(&self, tag: char, record: &MovieRecord<'_>) -> DomainResult<Movie> {
        let constructor = self
            .creators
            .get(&tag)
            .ok_or(DomainError::UnknownGenre(tag))?;
        constructor(record)
    }
}

fn comedy_from_record(record: &MovieRecord<'_>) -> DomainResult<Movie> {
    let year = parse_number(record.extra, "comedy year")?;
    Ok(Movie::Comedy(Comedy::new(
        record.copies,
        record.director,
        record.title,
        year,
    )))
}

fn drama_from_record(record: &MovieRecord<'_>) -> DomainResult<Movie> {
    let year = parse_number(record.extra, "drama year")?;
    Ok(Movie::Drama(Drama::new(
        record.copies,
        record.director,
        record.title,
        year,
    )))
}

/// Classic extra block: `First Last Month Year`, separated by commas and/or
/// whitespace. Tokens past the fourth are ignored.
fn classic_from_record(record: &MovieRecord<'_>) -> DomainResult<Movie> {
    let normalized = record.extra.replace(',', " ");
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    let [first, last, month, year, ..] = tokens.as_slice() else {
        return Err(DomainError::validation(format!(
            "invalid classic movie format: {}",
            record.extra
        )));
    };
    Ok(Movie::Classic(Classic::new(
        record.copies,
        record.director,
        record.title,
        format!("{first} {last}"),
        parse_number(month, "classic month")?,
        parse_number(year, "classic year")?,
    )))
}
