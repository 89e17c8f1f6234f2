use std::collections::VecDeque;

use crate::cryptol;
use crate::token::{is_builtin, Span, Token, TokenKind};
use crate::LexError;

/// Scanner state. The active state decides which rules apply at the cursor.
///
/// `Root` is the permanent bottom of the state stack and is never popped;
/// `Comment` may be pushed on top of itself to arbitrary depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Root,
    Comment,
    String,
    Embedded,
}

/// SAWScript source scanner.
///
/// Converts source text into a stream of classified spans for syntax
/// highlighting. Implements `Iterator<Item = Token>` so callers can consume
/// tokens lazily or collect them with [`Scanner::tokenize`].
///
/// The scan never fails: unrecognized input becomes `Error` tokens and the
/// cursor always moves forward, so the stream covers the whole input and the
/// scan terminates after at most one step per character. Unterminated
/// comments, strings, and embedded blocks simply run to end of input.
pub struct Scanner<'src> {
    source: &'src str,
    pos: usize,
    stack: Vec<State>,
    pending: VecDeque<Token<'src>>,
}

impl<'src> Scanner<'src> {
    /// Create a new scanner for the given source.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            stack: vec![State::Root],
            pending: VecDeque::new(),
        }
    }

    /// Tokenize the entire source into a vector of tokens.
    pub fn tokenize(source: &str) -> Vec<Token<'_>> {
        Scanner::new(source).collect()
    }

    /// Tokenize and require every span to be recognized.
    ///
    /// The scanner itself never fails; this is the strict entry point for
    /// callers that want malformed input reported rather than highlighted.
    /// The first `Error` token, top-level or embedded, becomes a positioned
    /// [`LexError`].
    pub fn check(source: &str) -> Result<Vec<Token<'_>>, LexError> {
        let tokens = Scanner::tokenize(source);
        if let Some(tok) = tokens.iter().find(|t| t.kind.is_error()) {
            let (line, column) = tok.span.line_col(source);
            return Err(LexError {
                text: tok.text.to_string(),
                line,
                column,
            });
        }
        Ok(tokens)
    }

    // --- Scan steps, one per state ---

    /// Top-level rules. First match wins; word classification happens after
    /// the maximal word is consumed.
    fn scan_root(&mut self) {
        let start = self.pos;
        let rest = self.rest();
        let c = rest.chars().next().expect("scan called at end of input");

        match c {
            c if c.is_whitespace() => {
                self.pos += len_while(rest, char::is_whitespace);
                self.push(TokenKind::Whitespace, start);
            }
            c if c.is_ascii_alphabetic() || c == '_' => self.scan_word(),
            '0'..='9' => {
                self.pos += len_while(rest, |c| c.is_ascii_digit());
                self.push(TokenKind::Number, start);
            }
            '{' if rest.starts_with("{{") => {
                self.pos += 2;
                self.push(TokenKind::EmbeddedDelimiter, start);
                self.stack.push(State::Embedded);
            }
            '/' if rest.starts_with("/*") => {
                self.pos += 2;
                self.push(TokenKind::CommentMultiline, start);
                self.stack.push(State::Comment);
            }
            '/' if rest.starts_with("//") => {
                self.pos += len_while(rest, |c| c != '\n' && c != '\r');
                self.push(TokenKind::CommentLine, start);
            }
            '<' if rest.starts_with("<-") => {
                self.pos += 2;
                self.push(TokenKind::Operator, start);
            }
            '=' => {
                self.pos += 1;
                self.push(TokenKind::Operator, start);
            }
            '(' => {
                if !self.try_annotated_binder() {
                    self.pos += 1;
                    self.push(TokenKind::Punctuation, start);
                }
            }
            '[' | ']' | '{' | '}' | ')' | ';' | ',' => {
                self.pos += 1;
                self.push(TokenKind::Punctuation, start);
            }
            '"' => {
                self.pos += 1;
                self.push(TokenKind::StringLiteral, start);
                self.stack.push(State::String);
            }
            _ => {
                self.pos += c.len_utf8();
                self.push(TokenKind::Error, start);
            }
        }
    }

    /// Inside `/* ... */`. Nested opens push, closes pop; stray `*` and `/`
    /// are plain comment text. An unterminated comment exhausts the input
    /// here without an error token.
    fn scan_comment(&mut self) {
        let start = self.pos;
        let rest = self.rest();
        if rest.starts_with("/*") {
            self.pos += 2;
            self.push(TokenKind::CommentMultiline, start);
            self.stack.push(State::Comment);
        } else if rest.starts_with("*/") {
            self.pos += 2;
            self.push(TokenKind::CommentMultiline, start);
            self.stack.pop();
        } else {
            let len = match rest.find(['*', '/']) {
                Some(0) => 1,
                Some(n) => n,
                None => rest.len(),
            };
            self.pos += len;
            self.push(TokenKind::CommentMultiline, start);
        }
    }

    /// Inside `"..."`. No escape sequences: the next `"` always closes.
    fn scan_string(&mut self) {
        let start = self.pos;
        let rest = self.rest();
        if rest.starts_with('"') {
            self.pos += 1;
            self.push(TokenKind::StringLiteral, start);
            self.stack.pop();
        } else {
            self.pos += rest.find('"').unwrap_or(rest.len());
            self.push(TokenKind::StringLiteral, start);
        }
    }

    /// Inside `{{ ... }}`. The whole span up to the closing delimiter is
    /// handed to the Cryptol lexer and its tokens spliced into the stream;
    /// a missing `}}` is a tolerated truncation, not an error.
    fn scan_embedded(&mut self) {
        let start = self.pos;
        match self.rest().find("}}") {
            Some(n) => {
                self.splice_cryptol(start, start + n);
                self.pos = start + n + 2;
                self.push(TokenKind::EmbeddedDelimiter, start + n);
                self.stack.pop();
            }
            None => {
                self.splice_cryptol(start, self.source.len());
                self.pos = self.source.len();
            }
        }
    }

    /// Run the Cryptol lexer over `source[start..end]` and splice its tokens
    /// into the stream, re-based to outer offsets.
    fn splice_cryptol(&mut self, start: usize, end: usize) {
        for tok in cryptol::Scanner::new(&self.source[start..end]) {
            self.pending.push_back(Token::new(
                TokenKind::Embedded(tok.kind),
                tok.text,
                Span::new(start + tok.span.start, start + tok.span.end),
            ));
        }
    }

    // --- Word classification ---

    /// Consume a maximal word and classify it. Order mirrors the grammar's
    /// rule order: keyword, `let` binding, builtin, constant, monadic
    /// binder, plain identifier.
    fn scan_word(&mut self) {
        let start = self.pos;
        let word = ident_prefix(self.rest());
        self.pos += word.len();

        match word {
            "do" => self.push(TokenKind::Keyword, start),
            "let" if self.try_let_binding(start) => {}
            w if is_builtin(w) => self.push(TokenKind::BuiltinName, start),
            "true" | "false" => self.push(TokenKind::KeywordConstant, start),
            _ if self.try_monadic_binder(start) => {}
            _ => self.push(TokenKind::Identifier, start),
        }
    }

    /// `let <name>`: keyword, whitespace, and the bound name as a function
    /// name, each its own token. Plain `let` with no binding falls through
    /// to the later word rules.
    fn try_let_binding(&mut self, kw_start: usize) -> bool {
        let rest = self.rest();
        let ws = len_while(rest, char::is_whitespace);
        if ws == 0 {
            return false;
        }
        let name = ident_prefix(&rest[ws..]);
        if name.is_empty() {
            return false;
        }
        let kw_end = self.pos;
        self.push_at(TokenKind::Keyword, kw_start, kw_end);
        self.push_at(TokenKind::Whitespace, kw_end, kw_end + ws);
        self.push_at(TokenKind::FunctionName, kw_end + ws, kw_end + ws + name.len());
        self.pos = kw_end + ws + name.len();
        true
    }

    /// `<name> <- ...`: the bound name is a variable, the arrow an operator.
    fn try_monadic_binder(&mut self, word_start: usize) -> bool {
        let rest = self.rest();
        let ws = len_while(rest, char::is_whitespace);
        if !rest[ws..].starts_with("<-") {
            return false;
        }
        let word_end = self.pos;
        self.push_at(TokenKind::VariableName, word_start, word_end);
        if ws > 0 {
            self.push_at(TokenKind::Whitespace, word_end, word_end + ws);
        }
        self.push_at(TokenKind::Operator, word_end + ws, word_end + ws + 2);
        self.pos = word_end + ws + 2;
        true
    }

    /// `( <name> : <type> )`: an annotated binder in a lambda or signature.
    /// Both names highlight as function names; parens and the colon are
    /// punctuation. Empty whitespace groups emit no token.
    fn try_annotated_binder(&mut self) -> bool {
        let rest = self.rest();
        let mut i = 1; // past '('
        let ws1 = len_while(&rest[i..], char::is_whitespace);
        i += ws1;
        let name = ident_prefix(&rest[i..]);
        if name.is_empty() {
            return false;
        }
        i += name.len();
        let ws2 = len_while(&rest[i..], char::is_whitespace);
        i += ws2;
        if !rest[i..].starts_with(':') {
            return false;
        }
        i += 1;
        let ws3 = len_while(&rest[i..], char::is_whitespace);
        i += ws3;
        let ty = ident_prefix(&rest[i..]);
        if ty.is_empty() {
            return false;
        }
        i += ty.len();
        let ws4 = len_while(&rest[i..], char::is_whitespace);
        i += ws4;
        if !rest[i..].starts_with(')') {
            return false;
        }
        i += 1;

        let base = self.pos;
        let mut at = base;
        let mut part = |scanner: &mut Self, kind: TokenKind, len: usize| {
            if len > 0 {
                scanner.push_at(kind, at, at + len);
            }
            at += len;
        };
        part(self, TokenKind::Punctuation, 1);
        part(self, TokenKind::Whitespace, ws1);
        part(self, TokenKind::FunctionName, name.len());
        part(self, TokenKind::Whitespace, ws2);
        part(self, TokenKind::Punctuation, 1);
        part(self, TokenKind::Whitespace, ws3);
        part(self, TokenKind::FunctionName, ty.len());
        part(self, TokenKind::Whitespace, ws4);
        part(self, TokenKind::Punctuation, 1);
        self.pos = base + i;
        true
    }

    // --- Helpers ---

    fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    fn state(&self) -> State {
        *self.stack.last().expect("state stack never empty")
    }

    /// Queue a token covering `start` up to the current position.
    fn push(&mut self, kind: TokenKind, start: usize) {
        self.push_at(kind, start, self.pos);
    }

    fn push_at(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.pending.push_back(Token::new(
            kind,
            &self.source[start..end],
            Span::new(start, end),
        ));
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        loop {
            if let Some(tok) = self.pending.pop_front() {
                return Some(tok);
            }
            if self.pos >= self.source.len() {
                return None;
            }
            match self.state() {
                State::Root => self.scan_root(),
                State::Comment => self.scan_comment(),
                State::String => self.scan_string(),
                State::Embedded => self.scan_embedded(),
            }
        }
    }
}

/// The maximal identifier (`[A-Za-z_][A-Za-z0-9_]*`) at the start of `s`,
/// or an empty slice.
fn ident_prefix(s: &str) -> &str {
    match s.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return "",
    }
    let end = s[1..]
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .map_or(s.len(), |n| n + 1);
    &s[..end]
}

/// Length of the longest prefix of `s` whose characters satisfy `pred`.
fn len_while(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.find(|c: char| !pred(c)).unwrap_or(s.len())
}
