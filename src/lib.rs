//! # srcprint
//!
//! A pretty-printer for Python source. Source text is split into tokens by
//! [lexer](srcprint::lexer), and every token (plus the whitespace between
//! tokens) is rendered through a pluggable [formatter](srcprint::formats).
//!
//! The entry point for most callers is [`prettyprint`](srcprint::printer::prettyprint).

pub mod srcprint;

pub use srcprint::formats::{Formatter, LatexFormatter, PlainFormatter, TagFormatter};
pub use srcprint::lexer::{tokenize, TokenizeError, Tokenizer};
pub use srcprint::printer::{prettyprint, prettyprint_str, PrintError, Printer};
pub use srcprint::token::{Position, Token, TokenKind};
