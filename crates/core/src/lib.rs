//! `reelhouse-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog, the
//! customer ledger and the store facade (no IO).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::CustomerId;
pub use value_object::ValueObject;
