//! Customers: the id index and the per-customer borrow/return ledger.
//!
//! Pure domain logic (no IO). Movies are referred to by key and resolved
//! against the inventory catalog only when a history is rendered.

pub mod customer;
pub mod index;

pub use customer::{Customer, CustomerBook, Transaction, TransactionKind};
pub use index::{BucketHash, HashIndex, DEFAULT_BUCKETS};
