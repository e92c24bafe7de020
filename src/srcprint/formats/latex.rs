//! LaTeX format for tokens
//!
//! Output is meant to be pasted into the body of a LaTeX document. Characters that TeX treats
//! specially, and the Latin-1 range beyond ASCII, are replaced by escape sequences or symbol
//! commands. Line breaks become `\\` followed by a newline and spaces become `~`, so layout
//! survives typesetting.
//!
//! Names are set in bold and string literals in italics. Encoding happens first, so a space
//! inside a string literal is already `~` when the italic wrapper is applied.
//!
//! The `\char"xx` escapes assume a T1-style font encoding; the preamble is up to the caller.

use super::encoding::EncodingTable;
use super::formatter::{Formatter, Handlers};
use crate::srcprint::token::{Token, TokenKind};
use once_cell::sync::Lazy;

const LATEX_REPLACEMENTS: &[(char, &str)] = &[
    ('\n', "\\\\\n"),
    ('"', r#"\char"22 "#),
    (' ', r"~"),
    ('#', r#"\char"23 "#),
    ('$', r"\textdollar"),
    ('%', r#"\char"25 "#),
    ('&', r#"\char"26 "#),
    ('\'', r#"\char"27 "#),
    ('\\', r"\textbackslash "),
    ('^', r"\textasciicircum"),
    ('_', r"\textunderscore "),
    ('`', r#"\char"60 "#),
    ('{', r"\textbraceleft "),
    ('|', r"\textbar"),
    ('}', r"\textbraceright "),
    ('~', r"\textasciitilde"),
    ('\u{a0}', r"~"),
    ('\u{a1}', r"\textexclamdown"),
    ('\u{a3}', r"\textsterling"),
    ('\u{a7}', r#"\char"9F "#),
    ('\u{a8}', r#"\char"04 "#),
    ('\u{a9}', r"\copyright"),
    ('\u{ab}', r#"\char"13 "#),
    ('\u{ac}', r"$\neg$"),
    ('\u{af}', r#"\char"09 "#),
    ('\u{b1}', r"$\pm$"),
    ('\u{b2}', r"$^{2}$"),
    ('\u{b3}', r"$^{3}$"),
    ('\u{b4}', r#"\char"01 "#),
    ('\u{b5}', r"$\mu$"),
    ('\u{b8}', r#"\char"0D "#),
    ('\u{b9}', r"$^{1}$"),
    ('\u{bb}', r#"\char"14 "#),
    ('\u{bc}', r#"\mbox{$^{1}$\char"2F$_{4}$}"#),
    ('\u{bd}', r#"\mbox{$^{1}$\char"2F$_{2}$}"#),
    ('\u{be}', r#"\mbox{$^{3}$\char"2F$_{4}$}"#),
    ('\u{bf}', r"\textquestiondown"),
    ('\u{c0}', r"\`{A}"),
    ('\u{c1}', r"\'{A}"),
    ('\u{c2}', r"\^{A}"),
    ('\u{c3}', r"\~{A}"),
    ('\u{c4}', r#"\"{A}"#),
    ('\u{c5}', r"\AA"),
    ('\u{c6}', r"\AE"),
    ('\u{c7}', r"\c{C}"),
    ('\u{c8}', r"\`{E}"),
    ('\u{c9}', r"\'{E}"),
    ('\u{ca}', r"\^{E}"),
    ('\u{cb}', r#"\"{E}"#),
    ('\u{cc}', r"\`{I}"),
    ('\u{cd}', r"\'{I}"),
    ('\u{ce}', r"\^{I}"),
    ('\u{cf}', r#"\"{I}"#),
    ('\u{d0}', r"\DH"),
    ('\u{d1}', r"\~{N}"),
    ('\u{d2}', r"\`{O}"),
    ('\u{d3}', r"\'{O}"),
    ('\u{d4}', r"\^{O}"),
    ('\u{d5}', r"\~{O}"),
    ('\u{d6}', r#"\"{O}"#),
    ('\u{d7}', r"$\times$"),
    ('\u{d8}', r"\O"),
    ('\u{d9}', r"\`{U}"),
    ('\u{da}', r"\'{U}"),
    ('\u{db}', r"\^{U}"),
    ('\u{dc}', r#"\"{U}"#),
    ('\u{dd}', r"\'{Y}"),
    ('\u{de}', r"\TH"),
    ('\u{df}', r"\ss"),
    ('\u{e0}', r"\`{a}"),
    ('\u{e1}', r"\'{a}"),
    ('\u{e2}', r"\^{a}"),
    ('\u{e3}', r"\~{a}"),
    ('\u{e4}', r#"\"{a}"#),
    ('\u{e5}', r"\aa"),
    ('\u{e6}', r"\ae"),
    ('\u{e7}', r"\c{c}"),
    ('\u{e8}', r"\`{e}"),
    ('\u{e9}', r"\'{e}"),
    ('\u{ea}', r"\^{e}"),
    ('\u{eb}', r#"\"{e}"#),
    ('\u{ec}', r"\`{\i}"),
    ('\u{ed}', r"\'{\i}"),
    ('\u{ee}', r"\^{\i}"),
    ('\u{ef}', r#"\"{\i}"#),
    ('\u{f0}', r"\dh"),
    ('\u{f1}', r"\~{n}"),
    ('\u{f2}', r"\`{o}"),
    ('\u{f3}', r"\'{o}"),
    ('\u{f4}', r"\^{o}"),
    ('\u{f5}', r"\~{o}"),
    ('\u{f6}', r#"\"{o}"#),
    ('\u{f7}', r"$\div$"),
    ('\u{f8}', r"\o"),
    ('\u{f9}', r"\`{u}"),
    ('\u{fa}', r"\'{u}"),
    ('\u{fb}', r"\^{u}"),
    ('\u{fc}', r#"\"{u}"#),
    ('\u{fd}', r"\'{y}"),
    ('\u{fe}', r"\th"),
    ('\u{ff}', r#"\"{y}"#),
];

static LATEX_ENCODINGS: Lazy<EncodingTable> =
    Lazy::new(|| EncodingTable::from_pairs(LATEX_REPLACEMENTS.iter().copied()));

/// Formatter producing LaTeX body text
#[derive(Debug, Clone)]
pub struct LatexFormatter {
    encodings: EncodingTable,
    handlers: Handlers,
}

impl LatexFormatter {
    pub fn new() -> Self {
        let handlers = Handlers::new()
            .with(TokenKind::Name, |token: &Token| format!(r"\textbf{{{}}}", token.text()))
            .with(TokenKind::String, |token: &Token| format!(r"\textit{{{}}}", token.text()));
        Self {
            encodings: LATEX_ENCODINGS.clone(),
            handlers,
        }
    }
}

impl Default for LatexFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for LatexFormatter {
    fn name(&self) -> &str {
        "latex"
    }

    fn description(&self) -> &str {
        "LaTeX body text with bold names and italic strings"
    }

    fn encodings(&self) -> &EncodingTable {
        &self.encodings
    }

    fn handlers(&self) -> &Handlers {
        &self.handlers
    }
}
