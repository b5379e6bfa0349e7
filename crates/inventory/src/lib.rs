//! Movie inventory: the movie model, its type registry and the ordered catalog.
//!
//! Pure domain logic (no IO). Movies are created through [`MovieRegistry`] and
//! owned by [`Catalog`]; everything else refers to them by [`MovieKey`].

pub mod catalog;
pub mod movie;
pub mod registry;

pub use catalog::{shelf_order, Catalog};
pub use movie::{Classic, Comedy, Drama, Movie, MovieKey, Stock, CLASSIC, COMEDY, DRAMA};
pub use registry::{MovieConstructor, MovieRecord, MovieRegistry};
