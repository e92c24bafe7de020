//! Error types for tokenization

use crate::srcprint::token::Position;
use thiserror::Error;

/// Errors that stop the scanner
///
/// None of these are recovered from: the scanner yields the error once and then ends.
#[derive(Error, Debug)]
pub enum TokenizeError {
    /// Reading the source failed (including source that is not valid UTF-8)
    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),

    /// End of input inside a multi-line string
    #[error("EOF in multi-line string starting at {start}")]
    UnterminatedString { start: Position },

    /// End of input inside brackets or after a backslash continuation
    #[error("EOF in multi-line statement at line {row}")]
    UnterminatedStatement { row: usize },

    /// A dedent to a column that matches no enclosing indentation level
    #[error("unindent does not match any outer indentation level (line {row}, column {column})")]
    Indentation {
        row: usize,
        column: usize,
        line: String,
    },

    /// A character that starts no lexeme (strict mode only)
    #[error("unexpected character {ch:?} at {position}")]
    UnexpectedCharacter { ch: char, position: Position },
}
