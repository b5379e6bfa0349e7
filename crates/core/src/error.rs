//! Domain error model.

use thiserror::Error;

use crate::id::CustomerId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable: callers report the failure, skip the offending
/// record or operation, and carry on. IO concerns belong to the store's loader.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A record or field failed format validation (e.g. non-numeric year).
    #[error("validation failed: {0}")]
    Validation(String),

    /// No constructor is registered for the genre tag.
    #[error("unknown movie genre '{0}'")]
    UnknownGenre(char),

    /// A movie with the same identity is already in the catalog.
    #[error("duplicate movie: {0}")]
    DuplicateMovie(String),

    /// Lookup of a customer id failed.
    #[error("customer {0} not found")]
    UnknownCustomer(CustomerId),

    /// No movie matched the search criteria for the genre.
    #[error("movie not found: {genre} {criteria}")]
    MovieNotFound { genre: char, criteria: String },

    /// The request named a media type the store does not carry.
    #[error("invalid media type '{0}'")]
    InvalidMediaType(char),

    /// Every copy of the movie is already on loan.
    #[error("movie out of stock: {0}")]
    OutOfStock(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn movie_not_found(genre: char, criteria: impl Into<String>) -> Self {
        Self::MovieNotFound {
            genre,
            criteria: criteria.into(),
        }
    }

    pub fn out_of_stock(title: impl Into<String>) -> Self {
        Self::OutOfStock(title.into())
    }

    /// Whether the failure came from looking something up (customer or movie).
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::UnknownCustomer(_) | Self::MovieNotFound { .. }
        )
    }

    /// Whether the failure is a business rule rejection (stock, media type).
    pub fn is_business_rule(&self) -> bool {
        matches!(self, Self::OutOfStock(_) | Self::InvalidMediaType(_))
    }
}
