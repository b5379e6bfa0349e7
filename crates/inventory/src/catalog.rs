//! Ordered catalog of every movie the store carries.
//!
//! Shelf order is two-level: comedies first, dramas second, any other genre
//! afterwards by tag; inside a genre, movies follow their own identity order.

use core::cmp::Ordering;
use std::collections::BTreeMap;

use reelhouse_core::{DomainError, DomainResult};

use crate::movie::{Movie, MovieKey, COMEDY, DRAMA};

/// Genres shelved ahead of all others, in order.
const PRIORITY_GENRES: [char; 2] = [COMEDY, DRAMA];

fn genre_rank(tag: char) -> (usize, char) {
    match PRIORITY_GENRES.iter().position(|&g| g == tag) {
        Some(rank) => (rank, tag),
        None => (PRIORITY_GENRES.len(), tag),
    }
}

/// Total order used to shelve movies.
pub fn shelf_order(a: &MovieKey, b: &MovieKey) -> Ordering {
    genre_rank(a.genre())
        .cmp(&genre_rank(b.genre()))
        .then_with(|| a.cmp(b))
}

/// Map key wrapping [`MovieKey`] with [`shelf_order`] as its `Ord`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ShelfKey(MovieKey);

impl PartialOrd for ShelfKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ShelfKey {
    fn cmp(&self, other: &Self) -> Ordering {
        shelf_order(&self.0, &other.0)
    }
}

/// Sorted, exclusively-owning container of movies.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: BTreeMap<ShelfKey, Movie>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Shelve `movie` in sorted position.
    ///
    /// A movie whose identity is already shelved is rejected and the catalog
    /// is left untouched.
    pub fn insert(&mut self, movie: Movie) -> DomainResult<()> {
        let key = ShelfKey(movie.key());
        if self.movies.contains_key(&key) {
            return Err(DomainError::DuplicateMovie(format!(
                "{} {}",
                movie.genre(),
                key.0
            )));
        }
        self.movies.insert(key, movie);
        Ok(())
    }

    /// Movies in shelf order.
    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.values()
    }

    /// Movies of one genre, in shelf order.
    pub fn genre(&self, tag: char) -> impl Iterator<Item = &Movie> {
        self.iter().filter(move |m| m.genre() == tag)
    }

    pub fn get(&self, key: &MovieKey) -> Option<&Movie> {
        self.movies.get(&ShelfKey(key.clone()))
    }

    pub fn get_mut(&mut self, key: &MovieKey) -> Option<&mut Movie> {
        self.movies.get_mut(&ShelfKey(key.clone()))
    }

    /// Find the movie of genre `tag` matching the free-text `criteria` exactly.
    ///
    /// Criteria that cannot be parsed for the genre simply match nothing.
    pub fn find(&self, tag: char, criteria: &str) -> Option<&Movie> {
        let key = MovieKey::from_criteria(tag, criteria).ok()?;
        self.genre(tag).find(|movie| movie.key() == key)
    }

    /// Inventory listing: a header, one line per movie in shelf order, and a
    /// trailing blank line.
    pub fn render(&self) -> String {
        let mut out = String::from("INVENTORY:\n");
        for movie in self.iter() {
            out.push_str(&movie.to_string());
            out.push('\n');
        }
        out.push('\n');
        out
    }
}
