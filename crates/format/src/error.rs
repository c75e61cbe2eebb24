//! Error types.

use std::io;

use trickt_engine::{CircuitError, GateError, ValidationReport};

/// What went wrong on a particular line of a circuit file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[allow(missing_docs)]
pub enum ParseErrorKind {
    /// Ran out of lines while something else was still expected.
    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    /// A keyword line (`CIRCUITO:`, `PORTAS:`, `SAIDAS:`) was missing or
    /// misspelled.
    #[error("expected '{expected}', found '{found}'")]
    ExpectedKeyword {
        expected: &'static str,
        found: String,
    },

    /// The header did not have three positive counts.
    #[error("header must be 'CIRCUITO: <inputs> <outputs> <gates>' with positive counts")]
    BadHeader,

    /// A token that should have been an integer.
    #[error("invalid number '{0}'")]
    BadNumber(String),

    /// A line had the wrong number of fields.
    #[error("malformed {what} line")]
    Malformed { what: &'static str },

    /// Gate or output indices must run 1, 2, 3, ... with no gaps.
    #[error("expected {what} {expected}, found '{found}' (missing or out of order)")]
    IndexOrder {
        what: &'static str,
        expected: usize,
        found: String,
    },

    /// Bad mnemonic or arity.
    #[error(transparent)]
    Gate(#[from] GateError),

    /// The number of sources listed differs from the declared arity.
    #[error("gate declares {arity} inputs but lists {found}")]
    PinCount { arity: usize, found: usize },

    /// A source id that does not fit the circuit.
    #[error(transparent)]
    Circuit(#[from] CircuitError),

    /// Something follows the last output line.
    #[error("unexpected content after outputs: '{0}'")]
    TrailingContent(String),
}

/// Errors from reading or writing circuit files.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Malformed input.
    #[error("line {line}: {kind}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The problem found there.
        kind: ParseErrorKind,
    },

    /// Only valid circuits are written.
    #[error("refusing to write: {0}")]
    Invalid(#[from] ValidationReport),
}

impl FormatError {
    pub(crate) fn parse(line: usize, kind: impl Into<ParseErrorKind>) -> Self {
        FormatError::Parse {
            line,
            kind: kind.into(),
        }
    }

    /// The parse problem and its line, if this is a parse error.
    pub fn parse_kind(&self) -> Option<(usize, &ParseErrorKind)> {
        match self {
            FormatError::Parse { line, kind } => Some((*line, kind)),
            _ => None,
        }
    }
}
