//! Token and position types shared by the lexer, formatters and printer.
//!
//!     A token is one lexical unit of Python source: its kind, the text it matched, where it
//!     starts and ends, and the physical line it was found on. Tokens are plain values. The
//!     formatting step never rewrites a token; it derives an encoded copy with
//!     [Token::with_text] and hands that to the handlers.
//!
//!     Positions follow the conventions of Python's tokenize module: rows are 1-based,
//!     columns are 0-based and count characters, not bytes.

use serde::Serialize;
use std::fmt;

/// A position in source code (row and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Token categories produced by the scanner
///
/// The names mirror the ones in Python's `token` module, which is what formatters key their
/// output on (the tag formatter prints them lower-cased).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    EndMarker,
    Name,
    Number,
    String,
    Newline,
    Indent,
    Dedent,
    Op,
    Comment,
    Nl,
    ErrorToken,
}

impl TokenKind {
    /// Every kind the scanner can emit
    pub const ALL: [TokenKind; 11] = [
        TokenKind::EndMarker,
        TokenKind::Name,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Newline,
        TokenKind::Indent,
        TokenKind::Dedent,
        TokenKind::Op,
        TokenKind::Comment,
        TokenKind::Nl,
        TokenKind::ErrorToken,
    ];

    /// Upper-case name as used by Python's token module
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::EndMarker => "ENDMARKER",
            TokenKind::Name => "NAME",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Op => "OP",
            TokenKind::Comment => "COMMENT",
            TokenKind::Nl => "NL",
            TokenKind::ErrorToken => "ERRORTOKEN",
        }
    }

    /// Check if this kind ends a physical line
    pub fn is_line_end(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Nl)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One scanned unit plus its position metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    kind: TokenKind,
    text: String,
    start: Position,
    end: Position,
    line: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    skipped_lines: String,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        start: Position,
        end: Position,
        line: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
            end,
            line: line.into(),
            skipped_lines: String::new(),
        }
    }

    /// Attach physical lines that were read before this token but produced no token
    pub fn with_skipped_lines(mut self, lines: impl Into<String>) -> Self {
        self.skipped_lines = lines.into();
        self
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// The source line the token was found on
    ///
    /// For tokens spanning several physical lines this holds all of them, starting with the
    /// line that contains the token's start.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Length of [Token::line] in characters
    pub fn line_len(&self) -> usize {
        self.line.chars().count()
    }

    /// Whole physical lines between the previous token's line and this one
    ///
    /// Only lines made of a backslash continuation (and whitespace) end up here: they are
    /// consumed without producing a token of their own.
    pub fn skipped_lines(&self) -> &str {
        &self.skipped_lines
    }

    /// The physical line containing the token's end position
    pub fn end_line(&self) -> &str {
        let offset = self.end.row.saturating_sub(self.start.row);
        self.line.split_inclusive('\n').nth(offset).unwrap_or("")
    }

    /// A copy of this token carrying different text (used for encoded output)
    pub fn with_text(&self, text: impl Into<String>) -> Token {
        Token {
            text: text.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Characters `from..to` of `line`, clamped to the line (empty when reversed)
pub fn column_slice(line: &str, from: usize, to: usize) -> &str {
    if from >= to {
        return "";
    }
    let mut indices = line.char_indices().map(|(i, _)| i).chain(std::iter::once(line.len()));
    let start = match indices.nth(from) {
        Some(start) => start,
        None => return "",
    };
    let end = indices.nth(to - from - 1).unwrap_or(line.len());
    &line[start..end]
}
