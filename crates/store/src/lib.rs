//! `reelhouse-store` — the store facade and everything that drives it.
//!
//! - [`Store`] owns the catalog, the customer book and the movie registry.
//! - [`command`] holds the operation variants; [`CommandRegistry`] maps a
//!   line's leading character to the parser that builds one.
//! - [`loader`] is the line-oriented IO adapter: data files in, reports out.

pub mod command;
pub mod command_dispatcher;
pub mod config;
pub mod error;
pub mod loader;
pub mod snapshot;
pub mod store;

pub use command::{BorrowCommand, Command, HistoryCommand, InventoryCommand, Outcome, ReturnCommand};
pub use command_dispatcher::{CommandParser, CommandRegistry};
pub use config::StoreConfig;
pub use error::{CommandError, DispatchError, LoadError};
pub use loader::LoadReport;
pub use snapshot::Snapshot;
pub use store::Store;
