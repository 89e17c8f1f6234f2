//! SAWScript Lexer
//!
//! Tokenizes SAWScript source into a stream of classified spans for syntax
//! highlighting. Handles the `do`/`let` binding forms, built-in names,
//! nested block comments, string literals, and embedded Cryptol blocks
//! (`{{ ... }}`), which are delegated to the lexer in [`cryptol`].
//!
//! Tokenization never fails: unrecognized input degrades to `Error` tokens
//! and the stream always covers the input exactly.
//!
//! # Example
//!
//! ```
//! use saw_lexer::{Scanner, TokenKind};
//!
//! let tokens = Scanner::tokenize("let x = 5");
//! assert_eq!(tokens[0].kind, TokenKind::Keyword);
//! assert_eq!(tokens[0].text, "let");
//! ```

pub mod cryptol;
pub mod scanner;
pub mod token;

pub use cryptol::CryptolKind;
pub use scanner::Scanner;
pub use token::{Span, Token, TokenKind};

/// Error returned by the strict entry point [`Scanner::check`] when the
/// input contains a span the lexer does not recognize.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized input {text:?} at line {line}, column {column}")]
pub struct LexError {
    pub text: String,
    pub line: usize,
    pub column: usize,
}
