//! Tokenizer for embedded Cryptol blocks.
//!
//! SAWScript embeds Cryptol expressions between `{{` and `}}`. The outer
//! scanner hands the text between the delimiters to this lexer and splices
//! the resulting tokens back into its own stream.
//!
//! Same output discipline as the outer scanner: tokens are gapless slices
//! of the input, malformed input degrades to `Error` tokens, and the scan
//! always terminates.

use serde::Serialize;

use crate::token::Span;

/// Token classification for Cryptol source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CryptolKind {
    Whitespace,
    Keyword,
    Identifier,
    Number,
    StringLiteral,
    Operator,
    Punctuation,
    CommentLine,
    CommentMultiline,
    Error,
}

/// A token produced by the Cryptol lexer. Spans are relative to the text
/// handed to [`Scanner::new`]; the caller re-bases them as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CryptolToken<'src> {
    pub kind: CryptolKind,
    pub text: &'src str,
    pub span: Span,
}

/// Cryptol keywords.
const KEYWORDS: &[&str] = &[
    "as", "constraint", "else", "hiding", "if", "import", "infix", "infixl",
    "infixr", "let", "module", "newtype", "parameter", "primitive", "private",
    "property", "then", "type", "where",
];

/// Characters that form operator runs (Haskell-style symbolic operators).
const OPERATOR_CHARS: &str = "!#$%&*+-./:<=>?@\\^|~";

/// Cryptol source scanner. Implements `Iterator` over [`CryptolToken`].
pub struct Scanner<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    /// Tokenize the entire source into a vector of tokens.
    pub fn tokenize(source: &str) -> Vec<CryptolToken<'_>> {
        Scanner::new(source).collect()
    }

    fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    /// Scan one token starting at the current position, advancing past it.
    fn scan(&mut self) -> CryptolKind {
        let rest = self.rest();
        let c = rest.chars().next().expect("scan called at end of input");

        if c.is_whitespace() {
            self.pos += len_while(rest, char::is_whitespace);
            CryptolKind::Whitespace
        } else if rest.starts_with("//") {
            self.pos += len_while(rest, |c| c != '\n' && c != '\r');
            CryptolKind::CommentLine
        } else if rest.starts_with("/*") {
            self.scan_block_comment();
            CryptolKind::CommentMultiline
        } else if c == '"' {
            self.scan_string();
            CryptolKind::StringLiteral
        } else if c.is_ascii_digit() {
            self.scan_number();
            CryptolKind::Number
        } else if c.is_ascii_alphabetic() || c == '_' {
            let word = &rest[..len_while(rest, is_word_char)];
            self.pos += word.len();
            if KEYWORDS.contains(&word) {
                CryptolKind::Keyword
            } else {
                CryptolKind::Identifier
            }
        } else if OPERATOR_CHARS.contains(c) {
            self.pos += len_while(rest, |c| OPERATOR_CHARS.contains(c));
            CryptolKind::Operator
        } else if "()[]{},;`".contains(c) {
            self.pos += 1;
            CryptolKind::Punctuation
        } else {
            self.pos += c.len_utf8();
            CryptolKind::Error
        }
    }

    /// Consume a block comment, tracking nesting depth. An unterminated
    /// comment runs to end of input.
    fn scan_block_comment(&mut self) {
        self.pos += 2;
        let mut depth = 1;
        while depth > 0 && self.pos < self.source.len() {
            let rest = self.rest();
            if rest.starts_with("/*") {
                depth += 1;
                self.pos += 2;
            } else if rest.starts_with("*/") {
                depth -= 1;
                self.pos += 2;
            } else {
                self.pos += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    /// Consume a string literal, honoring backslash escapes. An unterminated
    /// string runs to end of input.
    fn scan_string(&mut self) {
        self.pos += 1;
        while self.pos < self.source.len() {
            let rest = self.rest();
            if rest.starts_with('\\') && rest.len() > 1 {
                let escaped = rest[1..].chars().next().map_or(0, char::len_utf8);
                self.pos += 1 + escaped;
            } else if rest.starts_with('"') {
                self.pos += 1;
                break;
            } else {
                self.pos += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    /// Consume a numeric literal: decimal, or `0x`/`0o`/`0b` with the
    /// matching digit set. `_` separators are allowed after the first digit.
    fn scan_number(&mut self) {
        let rest = self.rest();
        let (prefix, digits): (usize, fn(char) -> bool) =
            if rest.starts_with("0x") || rest.starts_with("0X") {
                (2, |c| c.is_ascii_hexdigit() || c == '_')
            } else if rest.starts_with("0o") || rest.starts_with("0O") {
                (2, |c| ('0'..='7').contains(&c) || c == '_')
            } else if rest.starts_with("0b") || rest.starts_with("0B") {
                (2, |c| c == '0' || c == '1' || c == '_')
            } else {
                (0, |c| c.is_ascii_digit() || c == '_')
            };
        self.pos += prefix;
        self.pos += len_while(self.rest(), digits);
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = CryptolToken<'src>;

    fn next(&mut self) -> Option<CryptolToken<'src>> {
        if self.pos >= self.source.len() {
            return None;
        }
        let start = self.pos;
        let kind = self.scan();
        Some(CryptolToken {
            kind,
            text: &self.source[start..self.pos],
            span: Span::new(start, self.pos),
        })
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '\''
}

/// Length of the longest prefix of `s` whose characters satisfy `pred`.
fn len_while(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.find(|c: char| !pred(c)).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: tokenize and return (kind, text) pairs.
    fn lex(source: &str) -> Vec<(CryptolKind, &str)> {
        Scanner::tokenize(source)
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn test_simple_expression() {
        assert_eq!(
            lex("1 + 2"),
            vec![
                (CryptolKind::Number, "1"),
                (CryptolKind::Whitespace, " "),
                (CryptolKind::Operator, "+"),
                (CryptolKind::Whitespace, " "),
                (CryptolKind::Number, "2"),
            ]
        );
    }

    #[test]
    fn test_keyword_vs_identifier() {
        assert_eq!(
            lex("if xs then ys"),
            vec![
                (CryptolKind::Keyword, "if"),
                (CryptolKind::Whitespace, " "),
                (CryptolKind::Identifier, "xs"),
                (CryptolKind::Whitespace, " "),
                (CryptolKind::Keyword, "then"),
                (CryptolKind::Whitespace, " "),
                (CryptolKind::Identifier, "ys"),
            ]
        );
    }

    #[test]
    fn test_primed_identifier() {
        assert_eq!(lex("x'"), vec![(CryptolKind::Identifier, "x'")]);
    }

    #[test]
    fn test_hex_literal() {
        assert_eq!(lex("0xdeadBEEF"), vec![(CryptolKind::Number, "0xdeadBEEF")]);
    }

    #[test]
    fn test_binary_literal_with_separator() {
        assert_eq!(lex("0b1010_1010"), vec![(CryptolKind::Number, "0b1010_1010")]);
    }

    #[test]
    fn test_octal_literal() {
        assert_eq!(lex("0o777"), vec![(CryptolKind::Number, "0o777")]);
    }

    #[test]
    fn test_operator_run() {
        // Symbolic characters lex as maximal runs.
        assert_eq!(
            lex("xs # ys"),
            vec![
                (CryptolKind::Identifier, "xs"),
                (CryptolKind::Whitespace, " "),
                (CryptolKind::Operator, "#"),
                (CryptolKind::Whitespace, " "),
                (CryptolKind::Identifier, "ys"),
            ]
        );
        assert_eq!(lex(">>>"), vec![(CryptolKind::Operator, ">>>")]);
    }

    #[test]
    fn test_type_annotation() {
        assert_eq!(
            lex("x : [8]"),
            vec![
                (CryptolKind::Identifier, "x"),
                (CryptolKind::Whitespace, " "),
                (CryptolKind::Operator, ":"),
                (CryptolKind::Whitespace, " "),
                (CryptolKind::Punctuation, "["),
                (CryptolKind::Number, "8"),
                (CryptolKind::Punctuation, "]"),
            ]
        );
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(
            lex("\"hello\""),
            vec![(CryptolKind::StringLiteral, "\"hello\"")]
        );
    }

    #[test]
    fn test_string_with_escaped_quote() {
        assert_eq!(
            lex("\"a\\\"b\""),
            vec![(CryptolKind::StringLiteral, "\"a\\\"b\"")]
        );
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        assert_eq!(lex("\"abc"), vec![(CryptolKind::StringLiteral, "\"abc")]);
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(
            lex("1 // rest"),
            vec![
                (CryptolKind::Number, "1"),
                (CryptolKind::Whitespace, " "),
                (CryptolKind::CommentLine, "// rest"),
            ]
        );
    }

    #[test]
    fn test_nested_block_comment() {
        assert_eq!(
            lex("/* a /* b */ c */"),
            vec![(CryptolKind::CommentMultiline, "/* a /* b */ c */")]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_eq!(
            lex("/* never closed"),
            vec![(CryptolKind::CommentMultiline, "/* never closed")]
        );
    }

    #[test]
    fn test_unrecognized_character() {
        assert_eq!(lex("\u{7f}"), vec![(CryptolKind::Error, "\u{7f}")]);
    }

    #[test]
    fn test_coverage() {
        // Concatenating token texts reproduces the input exactly.
        let inputs = [
            "take`{4} (xs # ys)",
            "if x == 0x00 then \"zero\" else \"other\"",
            "/* c */ f x' 0b101 // tail",
            "\\x -> x + 1",
        ];
        for input in inputs {
            let joined: String = Scanner::tokenize(input)
                .iter()
                .map(|t| t.text)
                .collect();
            assert_eq!(joined, input);
        }
    }

    #[test]
    fn test_spans_are_gapless() {
        let mut expected_start = 0;
        for tok in Scanner::new("f `{front = 3} [1, 2] : [2][8]") {
            assert_eq!(tok.span.start, expected_start);
            assert!(tok.span.end > tok.span.start);
            expected_start = tok.span.end;
        }
    }
}
