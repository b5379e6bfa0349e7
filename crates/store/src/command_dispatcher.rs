//! Command dispatch: line in, command out, command applied to the store.
//!
//! ```text
//! raw line
//!   ↓
//! 1. Trim; an empty line is rejected
//!   ↓
//! 2. Look up the parser registered for the leading character
//!   ↓
//! 3. Parse the rest of the line into a command
//!   ↓
//! 4. Execute against the store
//! ```
//!
//! The registry is an explicit value built at startup. Nothing registers
//! itself as a side effect of linking.

use std::collections::BTreeMap;
use std::fmt;

use crate::command::{
    BorrowCommand, Command, HistoryCommand, InventoryCommand, Outcome, ReturnCommand,
};
use crate::error::{CommandError, DispatchError};
use crate::store::Store;

/// Builds a command from a whole (trimmed) line, tag included.
pub type CommandParser = fn(&str) -> Result<Box<dyn Command>, DispatchError>;

/// Maps command tag characters to parsers.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    parsers: BTreeMap<char, CommandParser>,
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("tags", &self.parsers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CommandRegistry {
    /// Registry with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry knowing borrow, return, inventory and history.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(BorrowCommand::TAG, BorrowCommand::parse);
        registry.register(ReturnCommand::TAG, ReturnCommand::parse);
        registry.register(InventoryCommand::TAG, InventoryCommand::parse);
        registry.register(HistoryCommand::TAG, HistoryCommand::parse);
        registry
    }

    /// Associate `tag` with `parser`. A later registration for the same tag
    /// replaces the earlier one.
    pub fn register(&mut self, tag: char, parser: CommandParser) {
        if self.parsers.insert(tag, parser).is_some() {
            tracing::debug!(%tag, "command parser replaced");
        }
    }

    pub fn is_registered(&self, tag: char) -> bool {
        self.parsers.contains_key(&tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = char> + '_ {
        self.parsers.keys().copied()
    }

    /// Parse one line into a command without executing it.
    pub fn create_command(&self, line: &str) -> Result<Box<dyn Command>, DispatchError> {
        let line = line.trim();
        let tag = line.chars().next().ok_or(DispatchError::Empty)?;
        let parser = self
            .parsers
            .get(&tag)
            .ok_or(DispatchError::UnknownCommand(tag))?;
        parser(line)
    }

    /// Parse and execute one line.
    ///
    /// A line that fails to parse leaves the store untouched.
    pub fn execute_line(&self, store: &mut Store, line: &str) -> Result<Outcome, CommandError> {
        let command = self.create_command(line)?;
        tracing::debug!(command = %command, "executing");
        Ok(command.execute(store)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelhouse_core::{CustomerId, DomainError};
    use reelhouse_inventory::MovieRecord;
    use reelhouse_parties::Customer;

    fn store() -> Store {
        let mut store = Store::new();
        store.add_customer(Customer::new(CustomerId::new(7), "Doe", "Jane"));
        store
            .add_movie(
                'D',
                &MovieRecord {
                    copies: 1,
                    director: "Smith",
                    title: "Serious Film",
                    extra: "2001",
                },
            )
            .unwrap();
        store
    }

    #[test]
    fn defaults_cover_the_four_store_commands() {
        let registry = CommandRegistry::with_defaults();
        assert_eq!(registry.tags().collect::<String>(), "BHIR");
        assert!(!registry.is_registered('Z'));
        assert!(CommandRegistry::new().tags().next().is_none());
    }

    #[test]
    fn unknown_tag_is_rejected_without_touching_state() {
        let registry = CommandRegistry::with_defaults();
        let mut store = store();

        let err = registry.execute_line(&mut store, "Z foo").unwrap_err();
        assert_eq!(err, CommandError::Dispatch(DispatchError::UnknownCommand('Z')));
        assert!(store
            .find_customer(CustomerId::new(7))
            .unwrap()
            .history()
            .is_empty());
    }

    #[test]
    fn blank_lines_do_not_dispatch() {
        let registry = CommandRegistry::with_defaults();
        assert!(matches!(registry.create_command(""), Err(DispatchError::Empty)));
        assert!(matches!(registry.create_command("   \t"), Err(DispatchError::Empty)));
    }

    #[test]
    fn leading_whitespace_is_ignored_before_the_tag() {
        let registry = CommandRegistry::with_defaults();
        let command = registry.create_command("   H 7").unwrap();
        assert_eq!(command.to_string(), "Display History for Customer 7");
    }

    #[test]
    fn execute_line_applies_and_reports() {
        let registry = CommandRegistry::with_defaults();
        let mut store = store();

        assert_eq!(
            registry.execute_line(&mut store, "B 7 D D Smith,Serious Film"),
            Ok(Outcome::Applied)
        );
        assert_eq!(
            registry.execute_line(&mut store, "B 7 D D Smith,Serious Film"),
            Err(CommandError::Domain(DomainError::OutOfStock(
                "Serious Film".to_string()
            )))
        );

        let Outcome::Report(history) = registry.execute_line(&mut store, "H 7").unwrap() else {
            panic!("history must produce a report");
        };
        assert!(history.contains("  1. Borrowed Drama: Smith, Serious Film (2001)"));
        assert!(!history.contains("  2."));
    }

    #[test]
    fn later_registration_wins() {
        fn always_inventory(_line: &str) -> Result<Box<dyn Command>, DispatchError> {
            Ok(Box::new(InventoryCommand))
        }

        let mut registry = CommandRegistry::with_defaults();
        registry.register('H', always_inventory);
        let command = registry.create_command("H 7").unwrap();
        assert_eq!(command.to_string(), "Display Inventory");
    }
}
