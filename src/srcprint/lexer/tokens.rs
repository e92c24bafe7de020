//! Raw lexeme definitions for Python source
//!
//! This module defines the lexemes the scanner recognises inside one physical line. They are
//! defined using the logos derive macro. Spaces, tabs and form feeds between lexemes are
//! skipped; indentation is measured separately by the scanner before any lexeme is matched.
//!
//! These are not the tokens handed to formatters: the scanner turns them into
//! [Token](crate::srcprint::token::Token) values, deciding things logos cannot see on its own
//! (NEWLINE vs NL inside brackets, strings that continue on the next line, and so on).
use logos::Logos;

/// All lexemes that can start at a scan position within a line
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\x0C]+")]
pub enum RawLexeme {
    // Backslash-newline joins the next physical line
    #[regex(r"\\\r?\n")]
    Continuation,

    #[regex(r"#[^\r\n]*")]
    Comment,

    #[regex(r"\r?\n")]
    Newline,

    // Hex, binary, octal and decimal integers, floats and imaginary literals
    #[regex(r"0[xX](_?[0-9a-fA-F])+")]
    #[regex(r"0[bB](_?[01])+")]
    #[regex(r"0[oO](_?[0-7])+")]
    #[regex(r"0(_?0)*|[1-9](_?[0-9])*")]
    #[regex(r"[0-9](_?[0-9])*\.([0-9](_?[0-9])*)?([eE][-+]?[0-9](_?[0-9])*)?[jJ]?")]
    #[regex(r"\.[0-9](_?[0-9])*([eE][-+]?[0-9](_?[0-9])*)?[jJ]?")]
    #[regex(r"[0-9](_?[0-9])*[eE][-+]?[0-9](_?[0-9])*[jJ]?")]
    #[regex(r"[0-9](_?[0-9])*[jJ]")]
    Number,

    // Opening of a triple-quoted string; the scanner looks for the closing quotes
    #[regex(r#"([rRuUfFbB]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?'''"#)]
    #[regex(r#"([rRuUfFbB]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?""""#)]
    TripleQuote,

    // Single-quoted string closed on the same line
    #[regex(r#"([rRuUfFbB]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?'([^\n'\\]|\\[^\n])*'"#)]
    #[regex(r#"([rRuUfFbB]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?"([^\n"\\]|\\[^\n])*""#)]
    String,

    // Single-quoted string ending in a backslash-newline
    #[regex(r#"([rRuUfFbB]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?'([^\n'\\]|\\[^\n])*\\\r?\n"#)]
    #[regex(r#"([rRuUfFbB]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?"([^\n"\\]|\\[^\n])*\\\r?\n"#)]
    ContinuedString,

    // Python identifiers: Unicode XID plus the underscore
    #[regex(r"[_\p{XID_Start}]\p{XID_Continue}*")]
    Name,

    #[token("(")]
    #[token("[")]
    #[token("{")]
    OpenBracket,

    #[token(")")]
    #[token("]")]
    #[token("}")]
    CloseBracket,

    #[token("**=")]
    #[token(">>=")]
    #[token("<<=")]
    #[token("//=")]
    #[token("...")]
    #[token("**")]
    #[token(">>")]
    #[token("<<")]
    #[token("//")]
    #[token("!=")]
    #[token("->")]
    #[token(":=")]
    #[token("==")]
    #[token("<=")]
    #[token(">=")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("@=")]
    #[token("|=")]
    #[token("^=")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("&")]
    #[token("@")]
    #[token("|")]
    #[token("^")]
    #[token("=")]
    #[token("<")]
    #[token(">")]
    #[token("~")]
    #[token(":")]
    #[token(";")]
    #[token(".")]
    #[token(",")]
    Operator,
}

impl RawLexeme {
    /// Check if this lexeme opens a string that may run past the current line
    pub fn is_open_string(&self) -> bool {
        matches!(self, RawLexeme::TripleQuote | RawLexeme::ContinuedString)
    }
}
