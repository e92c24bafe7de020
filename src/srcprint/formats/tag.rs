//! Tag format for tokens
//!
//! Every token is printed as `[kind]text`, with the kind name lower-cased. Tokens that end a
//! physical line (NEWLINE and NL) get one extra line break after the tag, so each source line
//! starts on a fresh output line. No characters are encoded.
//!
//! Example, for `x = 1` followed by a newline:
//!
//!     [name]x [op]= [number]1[newline]
//!
//!     [endmarker]

use super::encoding::EncodingTable;
use super::formatter::{Formatter, Handlers};
use crate::srcprint::token::{Token, TokenKind};

/// Formatter for the `[kind]text` tag output
#[derive(Debug, Clone)]
pub struct TagFormatter {
    encodings: EncodingTable,
    handlers: Handlers,
}

impl TagFormatter {
    pub fn new() -> Self {
        let handlers = Handlers::new()
            .with(TokenKind::Newline, render_line_end)
            .with(TokenKind::Nl, render_line_end);
        Self {
            encodings: EncodingTable::new(),
            handlers,
        }
    }
}

impl Default for TagFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// `[kind]text`, the rendering for every kind without a handler
pub fn render_tag(token: &Token) -> String {
    format!("[{}]{}", token.kind().name().to_lowercase(), token.text())
}

fn render_line_end(token: &Token) -> String {
    let mut rendered = render_tag(token);
    rendered.push('\n');
    rendered
}

impl Formatter for TagFormatter {
    fn name(&self) -> &str {
        "tag"
    }

    fn description(&self) -> &str {
        "Tokens as [kind]text tags, one source line per output line"
    }

    fn encodings(&self) -> &EncodingTable {
        &self.encodings
    }

    fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    fn default_render(&self, token: &Token) -> String {
        render_tag(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::srcprint::token::Position;
    use rstest::rstest;

    fn token(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, Position::new(1, 0), Position::new(1, 1), text)
    }

    #[rstest]
    #[case(TokenKind::Name, "x", "[name]x")]
    #[case(TokenKind::Op, "=", "[op]=")]
    #[case(TokenKind::Number, "1", "[number]1")]
    #[case(TokenKind::String, "'s'", "[string]'s'")]
    #[case(TokenKind::Comment, "# c", "[comment]# c")]
    #[case(TokenKind::Indent, "    ", "[indent]    ")]
    #[case(TokenKind::Dedent, "", "[dedent]")]
    #[case(TokenKind::EndMarker, "", "[endmarker]")]
    #[case(TokenKind::ErrorToken, "$", "[errortoken]$")]
    fn test_default_tagging(#[case] kind: TokenKind, #[case] text: &str, #[case] expected: &str) {
        assert_eq!(TagFormatter::new().format(&token(kind, text)), expected);
    }

    #[rstest]
    #[case(TokenKind::Newline, "\n", "[newline]\n\n")]
    #[case(TokenKind::Nl, "\n", "[nl]\n\n")]
    #[case(TokenKind::Newline, "", "[newline]\n")]
    fn test_line_ends_get_one_extra_break(
        #[case] kind: TokenKind,
        #[case] text: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(TagFormatter::new().format(&token(kind, text)), expected);
    }

    #[test]
    fn test_no_encoding() {
        let formatter = TagFormatter::default();
        assert!(formatter.encodings().is_empty());
        assert_eq!(formatter.encode("<&>"), "<&>");
    }
}
