//! Serializable view of the store's state, for dumps and diffing runs.

use serde::Serialize;

use reelhouse_inventory::{Catalog, Movie};
use reelhouse_parties::{Customer, CustomerBook};

/// Borrowed, read-only picture of catalog and ledgers.
///
/// Movies appear in shelf order, customers in registration order.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub movies: Vec<&'a Movie>,
    pub customers: Vec<&'a Customer>,
}

impl<'a> Snapshot<'a> {
    pub fn capture(catalog: &'a Catalog, customers: &'a CustomerBook) -> Self {
        Self {
            movies: catalog.iter().collect(),
            customers: customers.iter().collect(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
