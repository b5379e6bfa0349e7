//! Errors raised while dispatching command lines and reading data files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use reelhouse_core::DomainError;

/// A command line could not be turned into a command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("empty command line")]
    Empty,

    #[error("unknown command type '{0}'")]
    UnknownCommand(char),

    #[error("invalid command format: {line} ({reason})")]
    Malformed { line: String, reason: String },
}

impl DispatchError {
    pub fn malformed(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line: line.into(),
            reason: reason.into(),
        }
    }
}

/// Failure of one command line: either it did not parse, or it parsed and
/// the store rejected it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A data file could not be read at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
