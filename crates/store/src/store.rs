//! Store facade: the single owner of catalog and customer state.
//!
//! Commands and loaders are the only callers. Every operation runs to
//! completion before the next one starts; transactions are therefore recorded
//! in exactly the order operations arrive.

use reelhouse_core::{CustomerId, DomainError, DomainResult};
use reelhouse_inventory::{Catalog, Movie, MovieKey, MovieRecord, MovieRegistry};
use reelhouse_parties::{Customer, CustomerBook, TransactionKind};

use crate::config::StoreConfig;
use crate::snapshot::Snapshot;

#[derive(Debug)]
pub struct Store {
    config: StoreConfig,
    registry: MovieRegistry,
    catalog: Catalog,
    customers: CustomerBook,
}

impl Default for Store {
    fn default() -> Self {
        Self::with_config(StoreConfig::default())
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store with the default genres registered.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            customers: CustomerBook::with_buckets(config.index_buckets),
            config,
            registry: MovieRegistry::with_defaults(),
            catalog: Catalog::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn customers(&self) -> &CustomerBook {
        &self.customers
    }

    /// Build a movie of genre `tag` through the registry and shelve it.
    pub fn add_movie(&mut self, tag: char, record: &MovieRecord<'_>) -> DomainResult<()> {
        let movie = self.registry.create(tag, record)?;
        tracing::debug!(genre = %movie.genre(), title = movie.title(), "movie shelved");
        self.catalog.insert(movie)
    }

    /// Register a customer; a record for an id already on file replaces it.
    pub fn add_customer(&mut self, customer: Customer) -> Option<Customer> {
        self.customers.register(customer)
    }

    pub fn find_customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(id)
    }

    pub fn find_movie(&self, genre: char, criteria: &str) -> Option<&Movie> {
        self.catalog.find(genre, criteria)
    }

    fn check_media(&self, media: char) -> DomainResult<()> {
        if media == self.config.media_tag {
            Ok(())
        } else {
            Err(DomainError::InvalidMediaType(media))
        }
    }

    fn resolve_movie(&self, genre: char, info: &str) -> DomainResult<MovieKey> {
        self.catalog
            .find(genre, info)
            .map(Movie::key)
            .ok_or_else(|| DomainError::movie_not_found(genre, info.trim()))
    }

    /// Lend a copy to a customer.
    ///
    /// Checks, in order: media tag, customer, movie, stock. Nothing is mutated
    /// unless every check passes.
    pub fn borrow(
        &mut self,
        customer_id: CustomerId,
        media: char,
        genre: char,
        info: &str,
    ) -> DomainResult<()> {
        self.check_media(media)?;
        if !self.customers.contains(customer_id) {
            return Err(DomainError::UnknownCustomer(customer_id));
        }
        let key = self.resolve_movie(genre, info)?;

        let movie = self
            .catalog
            .get_mut(&key)
            .ok_or_else(|| DomainError::movie_not_found(genre, info.trim()))?;
        movie.try_borrow()?;

        let customer = self
            .customers
            .get_mut(customer_id)
            .ok_or(DomainError::UnknownCustomer(customer_id))?;
        customer.add_transaction(TransactionKind::Borrow, Some(key));
        Ok(())
    }

    /// Take a copy back from a customer.
    ///
    /// Same checks as [`Store::borrow`] minus stock. Once customer and movie
    /// resolve, a RETURN is recorded even if no copy was out and the counter
    /// could not move.
    pub fn return_movie(
        &mut self,
        customer_id: CustomerId,
        media: char,
        genre: char,
        info: &str,
    ) -> DomainResult<()> {
        self.check_media(media)?;
        if !self.customers.contains(customer_id) {
            return Err(DomainError::UnknownCustomer(customer_id));
        }
        let key = self.resolve_movie(genre, info)?;

        let movie = self
            .catalog
            .get_mut(&key)
            .ok_or_else(|| DomainError::movie_not_found(genre, info.trim()))?;
        if !movie.try_return() {
            tracing::warn!(
                customer = %customer_id,
                title = movie.title(),
                "return recorded with no copy on loan"
            );
        }

        let customer = self
            .customers
            .get_mut(customer_id)
            .ok_or(DomainError::UnknownCustomer(customer_id))?;
        customer.add_transaction(TransactionKind::Return, Some(key));
        Ok(())
    }

    /// Inventory listing in shelf order.
    pub fn display_inventory(&self) -> String {
        self.catalog.render()
    }

    /// Numbered transaction history of one customer.
    pub fn display_customer_history(&self, customer_id: CustomerId) -> DomainResult<String> {
        self.customers
            .get(customer_id)
            .map(|customer| customer.render_history(&self.catalog))
            .ok_or(DomainError::UnknownCustomer(customer_id))
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::capture(&self.catalog, &self.customers)
    }
}
