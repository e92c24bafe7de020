//! Lexer module for Python source
//!
//! This module contains the tokenization logic: the raw lexeme definitions recognised by
//! logos, and the scanner that turns physical lines into positioned tokens.
//!
//! Two-Level Scanning
//!
//! Logos only ever sees the remainder of a single physical line. Everything that needs
//! state carried between lines (indentation levels, bracket depth, strings that are still
//! open, backslash continuations) lives in the [Tokenizer]. This keeps the logos definitions
//! a plain table of regular expressions, with no callbacks.
//!
//! The token stream follows Python's tokenize module closely: tokens come out in source
//! order, never overlap, and the whitespace between them is never emitted. Consumers that
//! need the whitespace back (the printer) recover it from token positions.

pub mod error;
pub mod lexer_impl;
pub mod tokens;

pub use error::TokenizeError;
pub use lexer_impl::{tokenize, tokenize_with_options, ScannerOptions, Tokenizer};
pub use tokens::RawLexeme;
