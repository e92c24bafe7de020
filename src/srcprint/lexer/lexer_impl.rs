//! Implementation of the Python scanner
//!
//! The scanner pulls one physical line at a time from a [BufRead] and queues the tokens found
//! on it. Within a line, logos recognises the raw lexemes; everything that depends on context
//! across lines is handled here:
//!
//! - indentation levels, turned into INDENT and DEDENT tokens at the start of each logical line
//! - blank and comment-only lines, which produce NL and never touch indentation
//! - bracket depth, which turns line ends into NL instead of NEWLINE
//! - backslash continuations
//! - strings that run over several physical lines
//! - the synthetic tokens emitted at end of input
//!
//! The emission order and positions match Python's `tokenize.generate_tokens`, since the
//! printer's gap reconstruction depends on them.

use super::error::TokenizeError;
use super::tokens::RawLexeme;
use crate::srcprint::token::{Position, Token, TokenKind};
use logos::Logos;
use std::collections::VecDeque;
use std::io::BufRead;

/// Scanner settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerOptions {
    /// Column width of a tab when measuring indentation
    pub tab_size: usize,
    /// Fail on characters that start no lexeme instead of emitting ERRORTOKEN
    pub strict: bool,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            tab_size: 8,
            strict: false,
        }
    }
}

/// A string that has not been closed on the line it started on
#[derive(Debug)]
struct OpenString {
    start: Position,
    quote: String,
    text: String,
    lines: String,
    /// Single-quoted strings only continue across lines ending in a backslash
    needs_continuation: bool,
}

/// Lazy token stream over a line-oriented source
pub struct Tokenizer<R> {
    source: R,
    options: ScannerOptions,
    row: usize,
    bracket_depth: usize,
    continued: bool,
    indents: Vec<usize>,
    open_string: Option<OpenString>,
    previous_line: String,
    /// Lines consumed without producing a token, handed to the next token
    skipped_lines: String,
    queue: VecDeque<Token>,
    finished: bool,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(source: R) -> Self {
        Self::with_options(source, ScannerOptions::default())
    }

    pub fn with_options(source: R, options: ScannerOptions) -> Self {
        Self {
            source,
            options,
            row: 0,
            bracket_depth: 0,
            continued: false,
            indents: vec![0],
            open_string: None,
            previous_line: String::new(),
            skipped_lines: String::new(),
            queue: VecDeque::new(),
            finished: false,
        }
    }

    /// Read and scan the next physical line, queueing its tokens
    fn scan_line(&mut self) -> Result<(), TokenizeError> {
        let mut line = String::new();
        self.source.read_line(&mut line)?;
        let last_line = std::mem::replace(&mut self.previous_line, line.clone());
        self.row += 1;
        let row = self.row;
        tracing::trace!(row, len = line.len(), "scanning line");

        let queued = self.queue.len();
        let mut pos = 0;

        if let Some(mut open) = self.open_string.take() {
            if line.is_empty() {
                return Err(TokenizeError::UnterminatedString { start: open.start });
            }
            match find_string_end(&line, 0, &open.quote) {
                Some(end) => {
                    pos = end;
                    open.text.push_str(&line[..end]);
                    open.lines.push_str(&line);
                    self.push(
                        TokenKind::String,
                        open.text,
                        open.start,
                        Position::new(row, column(&line, end)),
                        open.lines,
                    );
                }
                None if open.needs_continuation && !ends_with_continuation(&line) => {
                    open.text.push_str(&line);
                    let end = Position::new(row, column(&line, line.len()));
                    self.push(TokenKind::ErrorToken, open.text, open.start, end, open.lines);
                    return Ok(());
                }
                None => {
                    open.text.push_str(&line);
                    open.lines.push_str(&line);
                    self.open_string = Some(open);
                    return Ok(());
                }
            }
        } else if self.bracket_depth == 0 && !self.continued {
            if line.is_empty() {
                self.finish(&last_line);
                return Ok(());
            }

            let tab_size = self.options.tab_size.max(1);
            let mut indent = 0;
            for byte in line.bytes() {
                match byte {
                    b' ' => indent += 1,
                    b'\t' => indent = (indent / tab_size + 1) * tab_size,
                    b'\x0C' => indent = 0,
                    _ => break,
                }
                pos += 1;
            }
            if pos == line.len() {
                // whitespace-only last line without a line break
                let len = column(&line, pos);
                self.push(
                    TokenKind::Nl,
                    "",
                    Position::new(row, len),
                    Position::new(row, len + 1),
                    line.as_str(),
                );
                return Ok(());
            }

            let rest = &line[pos..];
            if rest.starts_with(['#', '\r', '\n']) {
                if rest.starts_with('#') {
                    let comment = rest.trim_end_matches(['\r', '\n']);
                    let start = column(&line, pos);
                    self.push(
                        TokenKind::Comment,
                        comment,
                        Position::new(row, start),
                        Position::new(row, start + comment.chars().count()),
                        line.as_str(),
                    );
                    pos += comment.len();
                }
                self.push(
                    TokenKind::Nl,
                    &line[pos..],
                    Position::new(row, column(&line, pos)),
                    Position::new(row, column(&line, line.len())),
                    line.as_str(),
                );
                return Ok(());
            }

            let current = self.indents.last().copied().unwrap_or(0);
            if indent > current {
                self.indents.push(indent);
                self.push(
                    TokenKind::Indent,
                    &line[..pos],
                    Position::new(row, 0),
                    Position::new(row, pos),
                    line.as_str(),
                );
            }
            while indent < self.indents.last().copied().unwrap_or(0) {
                if !self.indents.contains(&indent) {
                    return Err(TokenizeError::Indentation {
                        row,
                        column: pos,
                        line,
                    });
                }
                self.indents.pop();
                let at = Position::new(row, pos);
                self.push(TokenKind::Dedent, "", at, at, line.as_str());
            }
        } else {
            if line.is_empty() {
                return Err(TokenizeError::UnterminatedStatement { row });
            }
            self.continued = false;
        }

        self.scan_lexemes(&line, pos)?;
        if self.queue.len() == queued && self.open_string.is_none() {
            // a lone backslash continuation
            self.skipped_lines.push_str(&line);
        }
        Ok(())
    }

    /// Scan the lexemes of `line` starting at byte offset `pos`
    fn scan_lexemes(&mut self, line: &str, mut pos: usize) -> Result<(), TokenizeError> {
        let row = self.row;
        while pos < line.len() {
            let mut lexer = RawLexeme::lexer(&line[pos..]);
            let lexeme = match lexer.next() {
                None => break,
                Some(result) => result,
            };
            let span = lexer.span();
            let (start, end) = (pos + span.start, pos + span.end);

            let lexeme = match lexeme {
                Ok(lexeme) => lexeme,
                Err(()) => {
                    if self.options.strict {
                        let ch = line[start..].chars().next().unwrap_or('\0');
                        return Err(TokenizeError::UnexpectedCharacter {
                            ch,
                            position: Position::new(row, column(line, start)),
                        });
                    }
                    // Like tokenize, the error token is the character at the scan position,
                    // which may be skipped whitespace preceding the offending character.
                    let width = line[pos..].chars().next().map_or(1, char::len_utf8);
                    let col = column(line, pos);
                    self.push(
                        TokenKind::ErrorToken,
                        &line[pos..pos + width],
                        Position::new(row, col),
                        Position::new(row, col + 1),
                        line,
                    );
                    pos += width;
                    continue;
                }
            };

            pos = end;
            let text = &line[start..end];
            let from = Position::new(row, column(line, start));
            let to = Position::new(row, column(line, end));

            match lexeme {
                RawLexeme::Continuation => self.continued = true,
                RawLexeme::Comment => self.push(TokenKind::Comment, text, from, to, line),
                RawLexeme::Newline => {
                    let kind = if self.bracket_depth > 0 {
                        TokenKind::Nl
                    } else {
                        TokenKind::Newline
                    };
                    self.push(kind, text, from, to, line);
                }
                RawLexeme::Number => self.push(TokenKind::Number, text, from, to, line),
                RawLexeme::Name => self.push(TokenKind::Name, text, from, to, line),
                RawLexeme::String => self.push(TokenKind::String, text, from, to, line),
                RawLexeme::TripleQuote => {
                    let quote = &text[text.len() - 3..];
                    match find_string_end(line, end, quote) {
                        Some(close) => {
                            pos = close;
                            let to = Position::new(row, column(line, close));
                            self.push(TokenKind::String, &line[start..close], from, to, line);
                        }
                        None => {
                            self.open_string = Some(OpenString {
                                start: from,
                                quote: quote.to_string(),
                                text: line[start..].to_string(),
                                lines: line.to_string(),
                                needs_continuation: false,
                            });
                            break;
                        }
                    }
                }
                RawLexeme::ContinuedString => {
                    let quote = text
                        .chars()
                        .find(|c| *c == '\'' || *c == '"')
                        .map(String::from)
                        .unwrap_or_default();
                    self.open_string = Some(OpenString {
                        start: from,
                        quote,
                        text: line[start..].to_string(),
                        lines: line.to_string(),
                        needs_continuation: true,
                    });
                    break;
                }
                RawLexeme::OpenBracket => {
                    self.bracket_depth += 1;
                    self.push(TokenKind::Op, text, from, to, line);
                }
                RawLexeme::CloseBracket => {
                    self.bracket_depth = self.bracket_depth.saturating_sub(1);
                    self.push(TokenKind::Op, text, from, to, line);
                }
                RawLexeme::Operator => self.push(TokenKind::Op, text, from, to, line),
            }
        }
        Ok(())
    }

    /// Queue the tokens that close the stream
    fn finish(&mut self, last_line: &str) {
        let row = self.row;
        if !last_line.is_empty()
            && !last_line.ends_with(['\r', '\n'])
            && !last_line.trim().is_empty()
            && !last_line.trim().starts_with('#')
        {
            let len = last_line.chars().count();
            self.push(
                TokenKind::Newline,
                "",
                Position::new(row - 1, len),
                Position::new(row - 1, len + 1),
                "",
            );
        }
        let at = Position::new(row, 0);
        for _ in 1..self.indents.len() {
            self.push(TokenKind::Dedent, "", at, at, "");
        }
        self.indents.truncate(1);
        self.push(TokenKind::EndMarker, "", at, at, "");
        self.finished = true;
    }

    fn push(
        &mut self,
        kind: TokenKind,
        text: impl Into<String>,
        start: Position,
        end: Position,
        line: impl Into<String>,
    ) {
        let skipped = std::mem::take(&mut self.skipped_lines);
        self.queue
            .push_back(Token::new(kind, text, start, end, line).with_skipped_lines(skipped));
    }
}

impl<R: BufRead> Iterator for Tokenizer<R> {
    type Item = Result<Token, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(Ok(token));
            }
            if self.finished {
                return None;
            }
            if let Err(err) = self.scan_line() {
                self.finished = true;
                self.queue.clear();
                return Some(Err(err));
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for Tokenizer<R> {}

/// Tokenize a whole string, collecting every token
pub fn tokenize(source: &str) -> Result<Vec<Token>, TokenizeError> {
    Tokenizer::new(source.as_bytes()).collect()
}

/// Tokenize a whole string with explicit scanner options
pub fn tokenize_with_options(
    source: &str,
    options: ScannerOptions,
) -> Result<Vec<Token>, TokenizeError> {
    Tokenizer::with_options(source.as_bytes(), options).collect()
}

/// Character column of byte offset `byte` within `line`
fn column(line: &str, byte: usize) -> usize {
    line[..byte].chars().count()
}

/// Byte offset just past the closing `quote`, scanning from `from` and honouring escapes
fn find_string_end(line: &str, from: usize, quote: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let quote = quote.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if bytes[i..].starts_with(quote) {
            return Some(i + quote.len());
        }
        i += 1;
    }
    None
}

fn ends_with_continuation(line: &str) -> bool {
    line.ends_with("\\\n") || line.ends_with("\\\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("source to tokenize")
            .iter()
            .map(Token::kind)
            .collect()
    }

    fn summary(source: &str) -> Vec<(TokenKind, String, (usize, usize), (usize, usize))> {
        tokenize(source)
            .expect("source to tokenize")
            .into_iter()
            .map(|t| {
                (
                    t.kind(),
                    t.text().to_string(),
                    (t.start().row, t.start().column),
                    (t.end().row, t.end().column),
                )
            })
            .collect()
    }

    #[test]
    fn test_simple_assignment() {
        use TokenKind::*;
        assert_eq!(
            summary("x = 1\n"),
            vec![
                (Name, "x".into(), (1, 0), (1, 1)),
                (Op, "=".into(), (1, 2), (1, 3)),
                (Number, "1".into(), (1, 4), (1, 5)),
                (Newline, "\n".into(), (1, 5), (1, 6)),
                (EndMarker, "".into(), (2, 0), (2, 0)),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            summary(""),
            vec![(TokenKind::EndMarker, "".into(), (1, 0), (1, 0))]
        );
    }

    #[test]
    fn test_missing_final_newline() {
        use TokenKind::*;
        let tokens = tokenize("x").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind(), Newline);
        assert_eq!(tokens[1].text(), "");
        assert_eq!(tokens[1].start(), Position::new(1, 1));
        assert_eq!(tokens[1].end(), Position::new(1, 2));
        assert_eq!(tokens[1].line(), "");
        assert_eq!(tokens[2].kind(), EndMarker);
        assert_eq!(tokens[2].start(), Position::new(2, 0));
    }

    #[test]
    fn test_indent_and_dedent() {
        use TokenKind::*;
        assert_eq!(
            kinds("if x:\n    y\nz\n"),
            vec![
                Name, Name, Op, Newline, Indent, Name, Newline, Dedent, Name, Newline, EndMarker
            ]
        );
        let tokens = tokenize("if x:\n    y\n").unwrap();
        let indent = &tokens[4];
        assert_eq!(indent.text(), "    ");
        assert_eq!(indent.end(), Position::new(2, 4));
        // dedent at end of input
        assert_eq!(tokens[tokens.len() - 2].kind(), Dedent);
        assert_eq!(tokens[tokens.len() - 2].start(), Position::new(3, 0));
    }

    #[test]
    fn test_tabs_measure_to_tab_stops() {
        use TokenKind::*;
        // a tab and eight spaces are the same level
        assert_eq!(
            kinds("if x:\n\ty\n        z\n"),
            vec![Name, Name, Op, Newline, Indent, Name, Newline, Name, Newline, Dedent, EndMarker]
        );
    }

    #[test]
    fn test_blank_and_comment_lines_are_nl() {
        use TokenKind::*;
        assert_eq!(
            summary("\n  # hi\n"),
            vec![
                (Nl, "\n".into(), (1, 0), (1, 1)),
                (Comment, "# hi".into(), (2, 2), (2, 6)),
                (Nl, "\n".into(), (2, 6), (2, 7)),
                (EndMarker, "".into(), (3, 0), (3, 0)),
            ]
        );
    }

    #[test]
    fn test_comment_lines_do_not_dedent() {
        use TokenKind::*;
        assert_eq!(
            kinds("if x:\n    y\n# c\n    z\n"),
            vec![
                Name, Name, Op, Newline, Indent, Name, Newline, Comment, Nl, Name, Newline,
                Dedent, EndMarker
            ]
        );
    }

    #[test]
    fn test_newline_inside_brackets_is_nl() {
        use TokenKind::*;
        assert_eq!(
            kinds("f(a,\n  b)\n"),
            vec![Name, Op, Name, Op, Nl, Name, Op, Newline, EndMarker]
        );
    }

    #[test]
    fn test_backslash_continuation() {
        use TokenKind::*;
        let tokens = tokenize("x = 1 + \\\n    2\n").unwrap();
        let kinds: Vec<_> = tokens.iter().map(Token::kind).collect();
        assert_eq!(kinds, vec![Name, Op, Number, Op, Number, Newline, EndMarker]);
        assert_eq!(tokens[4].start(), Position::new(2, 4));
        assert_eq!(tokens[4].line(), "    2\n");
    }

    #[test]
    fn test_lone_continuation_lines_ride_on_next_token() {
        use TokenKind::*;
        let tokens = tokenize("x = \\\n  \\\n1\n").unwrap();
        let kinds: Vec<_> = tokens.iter().map(Token::kind).collect();
        assert_eq!(kinds, vec![Name, Op, Number, Newline, EndMarker]);
        assert_eq!(tokens[2].start(), Position::new(3, 0));
        assert_eq!(tokens[2].skipped_lines(), "  \\\n");
        // handed over once
        assert_eq!(tokens[3].skipped_lines(), "");
        assert!(tokens[..2].iter().all(|t| t.skipped_lines().is_empty()));
    }

    #[test]
    fn test_trailing_whitespace_line_is_nl() {
        use TokenKind::*;
        assert_eq!(
            summary("x\n   "),
            vec![
                (Name, "x".into(), (1, 0), (1, 1)),
                (Newline, "\n".into(), (1, 1), (1, 2)),
                (Nl, "".into(), (2, 3), (2, 4)),
                (EndMarker, "".into(), (3, 0), (3, 0)),
            ]
        );
    }

    #[test]
    fn test_triple_quoted_string_spans_lines() {
        let tokens = tokenize("s = \"\"\"a\nb c\"\"\"\n").unwrap();
        let string = &tokens[2];
        assert_eq!(string.kind(), TokenKind::String);
        assert_eq!(string.text(), "\"\"\"a\nb c\"\"\"");
        assert_eq!(string.start(), Position::new(1, 4));
        assert_eq!(string.end(), Position::new(2, 6));
        assert_eq!(string.line(), "s = \"\"\"a\nb c\"\"\"\n");
        assert_eq!(tokens[3].kind(), TokenKind::Newline);
        assert_eq!(tokens[3].start(), Position::new(2, 6));
    }

    #[test]
    fn test_triple_quoted_string_on_one_line() {
        let tokens = tokenize("'''it's'''\n").unwrap();
        assert_eq!(tokens[0].kind(), TokenKind::String);
        assert_eq!(tokens[0].text(), "'''it's'''");
    }

    #[test]
    fn test_continued_single_quoted_string() {
        let tokens = tokenize("s = 'ab\\\ncd'\n").unwrap();
        assert_eq!(tokens[2].kind(), TokenKind::String);
        assert_eq!(tokens[2].text(), "'ab\\\ncd'");
        assert_eq!(tokens[2].end(), Position::new(2, 3));
    }

    #[test]
    fn test_broken_continued_string_is_error_token() {
        let tokens = tokenize("s = 'ab\\\ncd\n").unwrap();
        assert_eq!(tokens[2].kind(), TokenKind::ErrorToken);
        assert_eq!(tokens[2].text(), "'ab\\\ncd\n");
    }

    #[test]
    fn test_unknown_character_is_error_token() {
        use TokenKind::*;
        let tokens = tokenize("a $b\n").unwrap();
        let kinds: Vec<_> = tokens.iter().map(Token::kind).collect();
        assert_eq!(kinds, vec![Name, ErrorToken, ErrorToken, Name, Newline, EndMarker]);
        assert_eq!(tokens[1].text(), " ");
        assert_eq!(tokens[2].text(), "$");
    }

    #[test]
    fn test_non_identifier_unicode_is_error_token() {
        use TokenKind::*;
        let tokens = tokenize("a\u{a0}b = 2\u{d7}3€\n").unwrap();
        let kinds: Vec<_> = tokens.iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            vec![Name, ErrorToken, Name, Op, Number, ErrorToken, Number, ErrorToken, Newline, EndMarker]
        );
        assert_eq!(tokens[1].text(), "\u{a0}");
        assert_eq!(tokens[1].start(), Position::new(1, 1));
        assert_eq!(tokens[5].text(), "\u{d7}");
        assert_eq!(tokens[7].text(), "€");
        assert_eq!(tokens[7].end(), Position::new(1, 10));
    }

    #[test]
    fn test_strict_rejects_unknown_character() {
        let options = ScannerOptions {
            strict: true,
            ..ScannerOptions::default()
        };
        let err = tokenize_with_options("a $b\n", options).unwrap_err();
        match err {
            TokenizeError::UnexpectedCharacter { ch, position } => {
                assert_eq!(ch, '$');
                assert_eq!(position, Position::new(1, 2));
            }
            other => panic!("Expected UnexpectedCharacter, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_dedent_is_error() {
        let err = tokenize("if x:\n    y\n  z\n").unwrap_err();
        assert!(matches!(err, TokenizeError::Indentation { row: 3, column: 2, .. }));
    }

    #[test]
    fn test_unterminated_string_is_error() {
        let err = tokenize("s = '''abc\n").unwrap_err();
        assert!(matches!(
            err,
            TokenizeError::UnterminatedString { start } if start == Position::new(1, 4)
        ));
    }

    #[test]
    fn test_unclosed_bracket_is_error() {
        let err = tokenize("f(a,\n").unwrap_err();
        assert!(matches!(err, TokenizeError::UnterminatedStatement { row: 2 }));
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut tokenizer = Tokenizer::new("f(\n".as_bytes());
        assert!(tokenizer.next().unwrap().is_ok());
        assert!(tokenizer.next().unwrap().is_ok());
        assert!(tokenizer.next().unwrap().is_ok());
        assert!(tokenizer.next().unwrap().is_err());
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let bytes: &[u8] = b"x = '\xff'\n";
        let err = Tokenizer::new(bytes).find_map(Result::err).unwrap();
        assert!(matches!(err, TokenizeError::Io(_)));
    }

    #[test]
    fn test_positions_never_overlap() {
        let tokens = tokenize("def f(a, b=2):\n    return a ** b  # pow\n\nprint(f(3))\n").unwrap();
        for pair in tokens.windows(2) {
            assert!(pair[0].start() <= pair[0].end());
            assert!(pair[0].end() <= pair[1].start(), "{:?} then {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_unicode_columns_count_characters() {
        let tokens = tokenize("é = 'ü'\n").unwrap();
        assert_eq!(tokens[1].start(), Position::new(1, 2));
        assert_eq!(tokens[2].end(), Position::new(1, 7));
    }

    #[test]
    fn test_crlf_line_endings() {
        use TokenKind::*;
        let tokens = tokenize("x = 1\r\n").unwrap();
        assert_eq!(tokens[3].kind(), Newline);
        assert_eq!(tokens[3].text(), "\r\n");
        assert_eq!(tokens[4].kind(), EndMarker);
    }
}
