use serde::Serialize;

use crate::cryptol::CryptolKind;

/// Byte range of a token in the source text.
///
/// Spans across one token stream are contiguous and gapless: each token's
/// `end` is the next token's `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Resolve the span's start offset to a 1-based (line, column) pair.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let before = &source[..self.start];
        let line = before.matches('\n').count() + 1;
        let column = before.chars().rev().take_while(|&c| c != '\n').count() + 1;
        (line, column)
    }
}

/// Token classification for SAWScript source.
///
/// A closed set: every character of the input falls under exactly one of
/// these. Unrecognized input becomes `Error` rather than aborting the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Whitespace,

    // Words
    Keyword,
    KeywordConstant,
    BuiltinName,
    Identifier,
    VariableName,
    FunctionName,

    // Literals
    Number,
    StringLiteral,

    // Symbols
    Operator,
    Punctuation,

    // Comments
    CommentLine,
    CommentMultiline,

    // Embedded Cryptol blocks
    EmbeddedDelimiter,
    Embedded(CryptolKind),

    // Unrecognized input
    Error,
}

impl TokenKind {
    /// True for unrecognized input, top-level or inside an embedded block.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            TokenKind::Error | TokenKind::Embedded(CryptolKind::Error)
        )
    }
}

/// A token produced by the SAWScript lexer.
///
/// `text` is a slice of the original source; concatenating the texts of a
/// full token stream reproduces the input exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, span: Span) -> Self {
        Self { kind, text, span }
    }
}

/// Built-in operations recognized by the highlighter, besides the
/// `crucible_*` family.
pub const BUILTINS: &[&str] = &["import", "include", "llvm_load_module", "llvm_int", "return"];

/// Check whether a word names a built-in operation.
pub fn is_builtin(word: &str) -> bool {
    BUILTINS.contains(&word)
        || (word.starts_with("crucible_") && word.len() > "crucible_".len())
}
