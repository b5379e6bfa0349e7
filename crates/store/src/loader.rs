//! Line-oriented IO adapter.
//!
//! Reads the three data files (customers, movies, commands) line by line and
//! feeds them to the [`Store`]. A bad line is logged and skipped. Only failing
//! to open or read a file is an error for the caller.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use reelhouse_core::{CustomerId, DomainError, DomainResult};
use reelhouse_inventory::MovieRecord;
use reelhouse_parties::Customer;

use crate::command::Outcome;
use crate::command_dispatcher::CommandRegistry;
use crate::error::{CommandError, LoadError};
use crate::store::Store;

/// How many non-blank lines a load accepted and how many it skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub accepted: usize,
    pub skipped: usize,
}

impl LoadReport {
    pub fn total(&self) -> usize {
        self.accepted + self.skipped
    }

    /// Count one line. Malformed input is logged at `warn`; well-formed
    /// operations the store turned down are routine and logged at `info`.
    fn record<T, E: Rejected>(&mut self, kind: &str, number: usize, result: Result<T, E>) {
        let Err(err) = result else {
            self.accepted += 1;
            return;
        };
        self.skipped += 1;
        let reason = err.rejection();
        match reason {
            Rejection::Lookup | Rejection::BusinessRule => tracing::info!(
                kind,
                line = number,
                reason = reason.as_str(),
                error = %err,
                "operation rejected"
            ),
            Rejection::Format | Rejection::Dispatch => tracing::warn!(
                kind,
                line = number,
                reason = reason.as_str(),
                error = %err,
                "skipping line"
            ),
        }
    }
}

/// Why a line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    /// The record itself is unusable (bad field, unknown genre, duplicate).
    Format,
    /// The command line could not be dispatched.
    Dispatch,
    /// A customer or movie named by the line is not on file.
    Lookup,
    /// Out of stock or wrong media.
    BusinessRule,
}

impl Rejection {
    fn as_str(self) -> &'static str {
        match self {
            Rejection::Format => "format",
            Rejection::Dispatch => "dispatch",
            Rejection::Lookup => "lookup",
            Rejection::BusinessRule => "business_rule",
        }
    }
}

trait Rejected: fmt::Display {
    fn rejection(&self) -> Rejection;
}

impl Rejected for DomainError {
    fn rejection(&self) -> Rejection {
        if self.is_lookup_failure() {
            Rejection::Lookup
        } else if self.is_business_rule() {
            Rejection::BusinessRule
        } else {
            Rejection::Format
        }
    }
}

impl Rejected for CommandError {
    fn rejection(&self) -> Rejection {
        match self {
            CommandError::Dispatch(_) => Rejection::Dispatch,
            CommandError::Domain(err) => err.rejection(),
        }
    }
}

/// One movie line split into its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieLine {
    pub genre: char,
    pub copies: u32,
    pub director: String,
    pub title: String,
    /// Fifth field onward, re-joined with commas.
    pub extra: String,
}

impl MovieLine {
    pub fn record(&self) -> MovieRecord<'_> {
        MovieRecord {
            copies: self.copies,
            director: &self.director,
            title: &self.title,
            extra: &self.extra,
        }
    }
}

/// Split `genre, copies, director, title, extra...`.
pub fn parse_movie_record(line: &str) -> DomainResult<MovieLine> {
    let parts: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    if parts.len() < 5 {
        return Err(DomainError::validation(format!(
            "invalid movie format: {}",
            line.trim()
        )));
    }

    let genre = parts[0]
        .chars()
        .next()
        .ok_or_else(|| DomainError::validation("missing genre tag"))?;
    let copies = parts[1].parse::<u32>().map_err(|_| {
        DomainError::validation(format!("invalid stock number '{}'", parts[1]))
    })?;

    Ok(MovieLine {
        genre,
        copies,
        director: parts[2].to_string(),
        title: parts[3].to_string(),
        extra: parts[4..].join(","),
    })
}

/// Parse `id last first`. Tokens after the first name are ignored.
pub fn parse_customer_record(line: &str) -> DomainResult<Customer> {
    let mut tokens = line.split_whitespace();
    let (Some(id), Some(last), Some(first)) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(DomainError::validation(format!(
            "customer line needs 'id last first': {}",
            line.trim()
        )));
    };
    let id: CustomerId = id.parse()?;
    Ok(Customer::new(id, last, first))
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Non-blank lines with their 1-based line numbers.
fn lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<(usize, String)>> {
    reader
        .lines()
        .enumerate()
        .map(|(n, line)| line.map(|line| (n + 1, line)))
        .filter(|item| !matches!(item, Ok((_, line)) if line.trim().is_empty()))
}

pub fn load_customers<R: BufRead>(store: &mut Store, reader: R) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();
    for item in lines(reader) {
        let (number, line) = item?;
        let result = parse_customer_record(&line).map(|customer| store.add_customer(customer));
        report.record("customer", number, result);
    }
    tracing::info!(accepted = report.accepted, skipped = report.skipped, "customers loaded");
    Ok(report)
}

pub fn load_customers_from_path(
    store: &mut Store,
    path: impl AsRef<Path>,
) -> Result<LoadReport, LoadError> {
    load_customers(store, open(path.as_ref())?)
}

pub fn load_movies<R: BufRead>(store: &mut Store, reader: R) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();
    for item in lines(reader) {
        let (number, line) = item?;
        let result = parse_movie_record(&line)
            .and_then(|movie| store.add_movie(movie.genre, &movie.record()));
        report.record("movie", number, result);
    }
    tracing::info!(accepted = report.accepted, skipped = report.skipped, "movies loaded");
    Ok(report)
}

pub fn load_movies_from_path(
    store: &mut Store,
    path: impl AsRef<Path>,
) -> Result<LoadReport, LoadError> {
    load_movies(store, open(path.as_ref())?)
}

/// Replay a command file. Reports from read-only commands go to `out`;
/// rejected commands are logged and counted as skipped.
pub fn process_commands<R: BufRead, W: Write>(
    store: &mut Store,
    registry: &CommandRegistry,
    reader: R,
    out: &mut W,
) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();
    for item in lines(reader) {
        let (number, line) = item?;
        let result = registry.execute_line(store, &line);
        if let Ok(Outcome::Report(text)) = &result {
            out.write_all(text.as_bytes())?;
        }
        report.record("command", number, result);
    }
    out.flush()?;
    tracing::info!(accepted = report.accepted, skipped = report.skipped, "commands processed");
    Ok(report)
}

pub fn process_commands_from_path<W: Write>(
    store: &mut Store,
    registry: &CommandRegistry,
    path: impl AsRef<Path>,
    out: &mut W,
) -> Result<LoadReport, LoadError> {
    process_commands(store, registry, open(path.as_ref())?, out)
}
