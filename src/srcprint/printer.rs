//! The pretty-printing driver
//!
//!     The printer walks the token stream once, in order, and writes to the sink as it goes.
//!     The scanner does not emit whitespace between tokens, so the printer puts it back: it
//!     keeps a cursor at the end of the previous token, and whenever the next token does not
//!     start there, the source text in between (the gap) is encoded and written first.
//!
//! Cursor Rules
//!
//!     After a token is written, the cursor moves to its end. If that end is the end of the
//!     token's line (which is where NEWLINE and NL tokens end), the cursor jumps to column 0 of
//!     the next row instead, so the line break the token already carried is not written twice.
//!
//!     A gap on the same row is the slice of the token's line between the two columns.
//!     A gap across rows only happens after a backslash continuation, which produces no token:
//!     it is the rest of the previous token's line (backslash and line break included), then
//!     any lines that held nothing but another continuation, then the start of the token's
//!     own line.

use crate::srcprint::formats::{Formatter, PlainFormatter};
use crate::srcprint::lexer::{ScannerOptions, TokenizeError, Tokenizer};
use crate::srcprint::token::{column_slice, Position, Token};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Errors that abort a printing run
#[derive(Error, Debug)]
pub enum PrintError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
}

/// Runs the scan-and-format loop with a fixed set of scanner options
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    options: ScannerOptions,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ScannerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ScannerOptions {
        self.options
    }

    /// Pretty-print `source` into `output` using `formatter` (plain when `None`)
    pub fn print<R, W>(
        &self,
        source: R,
        output: &mut W,
        formatter: Option<&dyn Formatter>,
    ) -> Result<(), PrintError>
    where
        R: BufRead,
        W: Write + ?Sized,
    {
        let plain = PlainFormatter::new();
        let formatter: &dyn Formatter = match formatter {
            Some(formatter) => formatter,
            None => &plain,
        };

        let mut cursor = Cursor::default();
        let mut count = 0usize;
        for token in Tokenizer::with_options(source, self.options) {
            let token = token?;
            let gap = cursor.gap_before(&token);
            if !gap.is_empty() {
                output
                    .write_all(formatter.encode(&gap).as_bytes())
                    .map_err(PrintError::Write)?;
            }
            let rendered = formatter.format(&token);
            tracing::trace!(kind = %token.kind(), start = %token.start(), "formatted token");
            output
                .write_all(rendered.as_bytes())
                .map_err(PrintError::Write)?;
            cursor.advance(&token);
            count += 1;
        }
        tracing::debug!(tokens = count, format = formatter.name(), "prettyprint finished");
        Ok(())
    }

    /// Pretty-print a string, collecting the output
    pub fn print_str(
        &self,
        source: &str,
        formatter: Option<&dyn Formatter>,
    ) -> Result<String, PrintError> {
        let mut output = Vec::new();
        self.print(source.as_bytes(), &mut output, formatter)?;
        // formatters only ever emit UTF-8 strings
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

/// Where the previous token ended, and the line it ended on
#[derive(Debug, Default)]
struct Cursor {
    at: Position,
    line: String,
}

impl Cursor {
    /// Source text between the cursor and the start of `token`
    fn gap_before(&self, token: &Token) -> String {
        let start = token.start();
        if start == self.at {
            return String::new();
        }
        if start.row > self.at.row {
            let tail_len = self.line.chars().count();
            let mut gap = column_slice(&self.line, self.at.column, tail_len).to_string();
            gap.push_str(token.skipped_lines());
            gap.push_str(column_slice(token.line(), 0, start.column));
            return gap;
        }
        column_slice(token.line(), self.at.column, start.column).to_string()
    }

    fn advance(&mut self, token: &Token) {
        let end = token.end();
        if end.column == token.line_len() {
            self.at = Position::new(end.row + 1, 0);
            self.line.clear();
        } else {
            self.at = end;
            self.line = token.end_line().to_string();
        }
    }
}

/// Pretty-print `source` into `output` with default scanner options
pub fn prettyprint<R, W>(
    source: R,
    output: &mut W,
    formatter: Option<&dyn Formatter>,
) -> Result<(), PrintError>
where
    R: BufRead,
    W: Write + ?Sized,
{
    Printer::new().print(source, output, formatter)
}

/// Pretty-print a string with default scanner options
pub fn prettyprint_str(source: &str, formatter: Option<&dyn Formatter>) -> Result<String, PrintError> {
    Printer::new().print_str(source, formatter)
}
