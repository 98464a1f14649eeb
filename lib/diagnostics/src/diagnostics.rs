use std::fmt::Display;

use cursor::Line;
use itertools::Itertools;

/// Where on its line a diagnostic points to.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// No more precise location than the line itself.
    Line,
    /// The end of the input.
    End,
    /// A specific lexeme.
    Lexeme(String),
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Line => Ok(()),
            Location::End => write!(f, " at end"),
            Location::Lexeme(lexeme) => write!(f, " at '{lexeme}'"),
        }
    }
}

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("[line {line}] Error{location}: {message}")]
pub struct Diagnostic {
    pub line: Line,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: Line, location: Location, message: impl ToString) -> Self {
        Self { line, location, message: message.to_string() }
    }
}

/// Collects the errors reported while scanning and parsing.
///
/// Owned by the caller and passed down by `&mut`. A non-empty collector is
/// what the driver treats as "an error occurred".
#[derive(Debug, Default, PartialEq, derive_more::Deref)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: impl Into<Diagnostic>) {
        let diagnostic = diagnostic.into();
        log::debug!("Reporting diagnostic: {:?}", diagnostic);
        self.0.push(diagnostic);
    }

    pub fn had_error(&self) -> bool {
        !self.0.is_empty()
    }

    /// Forgets everything reported so far, e.g. between two REPL lines.
    pub fn reset(&mut self) {
        self.0.clear();
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}
