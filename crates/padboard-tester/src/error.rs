//! Error handling for the padboard-tester crate.

use std::{io, result};

use thiserror::Error;

/// Convenient result type for padboard-tester operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running the tester.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Errors surfaced by the grid engine.
    #[error("Grid error: {0}")]
    Grid(#[from] padboard_grid::Error),
    /// Configuration parsing or resolution errors.
    #[error("Configuration error: {0}")]
    Config(#[from] config::Error),
    /// Failed to parse a directive string.
    #[error("Failed to parse directive: {0}")]
    DirectiveSpec(String),
    /// No directives were provided to the replay command.
    #[error("No directives supplied; pass drag(...), resize(...) or tap(...) arguments")]
    NoDirectives,
}

impl Error {
    /// Helper to build a parse error from an arbitrary message.
    pub fn parse<M: Into<String>>(msg: M) -> Self {
        Self::DirectiveSpec(msg.into())
    }

    /// Multi-line rendering for the terminal; config errors carry an excerpt.
    pub fn pretty(&self) -> String {
        match self {
            Self::Config(e) => e.pretty(),
            other => other.to_string(),
        }
    }
}
