use core::fmt;

use serde::Serialize;

use reelhouse_core::{CustomerId, Entity};
use reelhouse_inventory::{Catalog, MovieKey};

use crate::index::{HashIndex, DEFAULT_BUCKETS};

/// What happened to a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Borrow,
    Return,
}

impl TransactionKind {
    fn verb(self) -> &'static str {
        match self {
            TransactionKind::Borrow => "Borrowed",
            TransactionKind::Return => "Returned",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionKind::Borrow => "BORROW",
            TransactionKind::Return => "RETURN",
        })
    }
}

/// One ledger entry (immutable once recorded).
///
/// The movie is referenced by key; the catalog stays the only owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    kind: TransactionKind,
    movie: MovieKey,
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn movie(&self) -> &MovieKey {
        &self.movie
    }

    /// `Borrowed <movie>` / `Returned <movie>`, with `[Unknown Movie]` when the
    /// key no longer resolves.
    pub fn render(&self, catalog: &Catalog) -> String {
        match catalog.get(&self.movie) {
            Some(movie) => format!("{} {}", self.kind.verb(), movie),
            None => format!("{} [Unknown Movie]", self.kind.verb()),
        }
    }
}

/// A store customer and their append-only borrow/return history.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    id: CustomerId,
    last_name: String,
    first_name: String,
    history: Vec<Transaction>,
}

impl Customer {
    pub fn new(id: CustomerId, last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            id,
            last_name: last_name.into(),
            first_name: first_name.into(),
            history: Vec::new(),
        }
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    /// Append a transaction. Nothing is recorded when `movie` is absent;
    /// returns whether an entry was appended.
    pub fn add_transaction(&mut self, kind: TransactionKind, movie: Option<MovieKey>) -> bool {
        match movie {
            Some(movie) => {
                self.history.push(Transaction { kind, movie });
                true
            }
            None => false,
        }
    }

    /// Header plus a numbered, chronological listing (or `No transactions
    /// found.`).
    pub fn render_history(&self, catalog: &Catalog) -> String {
        let mut out = format!(
            "Transaction history for {} (ID: {}):\n",
            self.full_name(),
            self.id
        );
        if self.history.is_empty() {
            out.push_str("No transactions found.\n");
            return out;
        }
        for (n, transaction) in self.history.iter().enumerate() {
            out.push_str(&format!("{:>3}. {}\n", n + 1, transaction.render(catalog)));
        }
        out.push('\n');
        out
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> CustomerId {
        self.id
    }
}

/// Customer collection: owns every [`Customer`] and indexes them by id.
///
/// The index stores slots into the owning vector, never the customers
/// themselves.
#[derive(Debug, Clone)]
pub struct CustomerBook {
    customers: Vec<Customer>,
    index: HashIndex<CustomerId, usize>,
}

impl Default for CustomerBook {
    fn default() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }
}

impl CustomerBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buckets(buckets: usize) -> Self {
        Self {
            customers: Vec::new(),
            index: HashIndex::with_buckets(buckets),
        }
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Register a customer. Ids are unique: registering an id that is already
    /// on file replaces that record in its slot, and the replaced customer is
    /// returned.
    pub fn register(&mut self, customer: Customer) -> Option<Customer> {
        let id = customer.id();
        if let Some(&slot) = self.index.find(&id) {
            tracing::warn!(customer = %id, name = %customer.full_name(), "customer record replaced");
            return self
                .customers
                .get_mut(slot)
                .map(|existing| core::mem::replace(existing, customer));
        }
        self.index.insert(id, self.customers.len());
        self.customers.push(customer);
        None
    }

    pub fn contains(&self, id: CustomerId) -> bool {
        self.index.exists(&id)
    }

    pub fn get(&self, id: CustomerId) -> Option<&Customer> {
        let slot = *self.index.find(&id)?;
        self.customers.get(slot)
    }

    pub fn get_mut(&mut self, id: CustomerId) -> Option<&mut Customer> {
        let slot = *self.index.find(&id)?;
        self.customers.get_mut(slot)
    }

    /// Customers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }
}
