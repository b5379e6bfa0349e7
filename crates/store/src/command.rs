//! Store operations parsed from command lines.
//!
//! Each variant owns its line format:
//!
//! ```text
//! B <customer id> <media> <genre> <movie info>
//! R <customer id> <media> <genre> <movie info>
//! I
//! H <customer id>
//! ```
//!
//! Commands are transient: parsed from one line, executed once, dropped.

use core::fmt;

use reelhouse_core::{CustomerId, DomainResult};

use crate::error::DispatchError;
use crate::store::Store;

/// What a successfully executed command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed; nothing to show.
    Applied,
    /// Read-only command; text for the display adapter.
    Report(String),
}

/// A self-contained operation against the [`Store`].
///
/// `Display` is the debug rendering logged before execution.
pub trait Command: fmt::Debug + fmt::Display + Send + Sync {
    fn execute(&self, store: &mut Store) -> DomainResult<Outcome>;
}

/// Cursor over the positional fields of a command line.
struct Fields<'a> {
    line: &'a str,
    rest: &'a str,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str) -> Self {
        Self { line, rest: line }
    }

    fn malformed(&self, reason: impl Into<String>) -> DispatchError {
        DispatchError::malformed(self.line, reason)
    }

    /// Next non-whitespace character.
    fn char(&mut self, field: &str) -> Result<char, DispatchError> {
        let rest: &'a str = self.rest;
        let mut chars = rest.trim_start().chars();
        let c = chars
            .next()
            .ok_or_else(|| self.malformed(format!("missing {field}")))?;
        self.rest = chars.as_str();
        Ok(c)
    }

    /// Next whitespace-delimited token, parsed as a customer id.
    fn customer_id(&mut self) -> Result<CustomerId, DispatchError> {
        let rest: &'a str = self.rest;
        let trimmed = rest.trim_start();
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        let (token, rest) = trimmed.split_at(end);
        if token.is_empty() {
            return Err(self.malformed("missing customer id"));
        }
        let id = token
            .parse::<CustomerId>()
            .map_err(|_| self.malformed(format!("invalid customer id '{token}'")))?;
        self.rest = rest;
        Ok(id)
    }

    /// Free text after the positional fields.
    fn remainder(self) -> &'a str {
        self.rest.trim()
    }
}

/// The shared shape of borrow and return lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRequest {
    pub customer_id: CustomerId,
    pub media: char,
    pub genre: char,
    pub info: String,
}

impl MovieRequest {
    fn parse(line: &str) -> Result<Self, DispatchError> {
        let mut fields = Fields::new(line);
        fields.char("command tag")?;
        let customer_id = fields.customer_id()?;
        let media = fields.char("media type")?;
        let genre = fields.char("movie genre")?;
        Ok(Self {
            customer_id,
            media,
            genre,
            info: fields.remainder().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowCommand(pub MovieRequest);

impl BorrowCommand {
    pub const TAG: char = 'B';

    pub fn parse(line: &str) -> Result<Box<dyn Command>, DispatchError> {
        Ok(Box::new(Self(MovieRequest::parse(line)?)))
    }
}

impl Command for BorrowCommand {
    fn execute(&self, store: &mut Store) -> DomainResult<Outcome> {
        let r = &self.0;
        store.borrow(r.customer_id, r.media, r.genre, &r.info)?;
        Ok(Outcome::Applied)
    }
}

impl fmt::Display for BorrowCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Borrow: Customer {} borrows {}", self.0.customer_id, self.0.info)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnCommand(pub MovieRequest);

impl ReturnCommand {
    pub const TAG: char = 'R';

    pub fn parse(line: &str) -> Result<Box<dyn Command>, DispatchError> {
        Ok(Box::new(Self(MovieRequest::parse(line)?)))
    }
}

impl Command for ReturnCommand {
    fn execute(&self, store: &mut Store) -> DomainResult<Outcome> {
        let r = &self.0;
        store.return_movie(r.customer_id, r.media, r.genre, &r.info)?;
        Ok(Outcome::Applied)
    }
}

impl fmt::Display for ReturnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Return: Customer {} returns {}", self.0.customer_id, self.0.info)
    }
}

/// Whole-inventory listing. Anything after the tag is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryCommand;

impl InventoryCommand {
    pub const TAG: char = 'I';

    pub fn parse(_line: &str) -> Result<Box<dyn Command>, DispatchError> {
        Ok(Box::new(Self))
    }
}

impl Command for InventoryCommand {
    fn execute(&self, store: &mut Store) -> DomainResult<Outcome> {
        Ok(Outcome::Report(store.display_inventory()))
    }
}

impl fmt::Display for InventoryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Display Inventory")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCommand {
    pub customer_id: CustomerId,
}

impl HistoryCommand {
    pub const TAG: char = 'H';

    pub fn parse(line: &str) -> Result<Box<dyn Command>, DispatchError> {
        let mut fields = Fields::new(line);
        fields.char("command tag")?;
        let customer_id = fields.customer_id()?;
        Ok(Box::new(Self { customer_id }))
    }
}

impl Command for HistoryCommand {
    fn execute(&self, store: &mut Store) -> DomainResult<Outcome> {
        store
            .display_customer_history(self.customer_id)
            .map(Outcome::Report)
    }
}

impl fmt::Display for HistoryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Display History for Customer {}", self.customer_id)
    }
}
