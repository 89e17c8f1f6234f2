//! SAWScript HTML Highlighter
//!
//! Renders the token stream from `saw-lexer` as HTML. Each token becomes a
//! `<span>` carrying a short CSS class in the classic highlighter naming
//! scheme (`k` for keywords, `s` for strings, ...), so the output can be
//! styled by the bundled stylesheet or any compatible theme.
//!
//! ```text
//! source → Scanner → html::render() → <pre class="sawscript">...</pre>
//! ```

pub mod css;
pub mod html;

pub use html::{render, render_page};

use saw_lexer::{CryptolKind, TokenKind};

/// The CSS class for a token kind. Whitespace is unstyled (empty class);
/// tokens from embedded Cryptol blocks get the `cry` region class joined
/// with their own classification.
pub fn css_class(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Whitespace => "",
        TokenKind::Keyword => "k",
        TokenKind::KeywordConstant => "kc",
        TokenKind::BuiltinName => "nb",
        TokenKind::Identifier => "n",
        TokenKind::VariableName => "nv",
        TokenKind::FunctionName => "nf",
        TokenKind::Number => "m",
        TokenKind::Operator => "o",
        TokenKind::Punctuation => "p",
        TokenKind::CommentLine => "c1",
        TokenKind::CommentMultiline => "cm",
        TokenKind::StringLiteral => "s",
        TokenKind::EmbeddedDelimiter => "l",
        TokenKind::Error => "err",
        TokenKind::Embedded(inner) => match inner {
            CryptolKind::Whitespace => "cry",
            CryptolKind::Keyword => "cry k",
            CryptolKind::Identifier => "cry n",
            CryptolKind::Number => "cry m",
            CryptolKind::StringLiteral => "cry s",
            CryptolKind::Operator => "cry o",
            CryptolKind::Punctuation => "cry p",
            CryptolKind::CommentLine => "cry c1",
            CryptolKind::CommentMultiline => "cry cm",
            CryptolKind::Error => "cry err",
        },
    }
}

/// HTML-escape token text for embedding in markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_markup_characters() {
        assert_eq!(escape("a < b && c > \"d\""), "a &lt; b &amp;&amp; c &gt; &quot;d&quot;");
    }

    #[test]
    fn test_escape_passthrough() {
        assert_eq!(escape("let x = 5"), "let x = 5");
    }

    #[test]
    fn test_whitespace_has_no_class() {
        assert_eq!(css_class(TokenKind::Whitespace), "");
    }

    #[test]
    fn test_embedded_class_carries_region() {
        assert_eq!(css_class(TokenKind::Embedded(CryptolKind::Number)), "cry m");
        assert_eq!(css_class(TokenKind::Embedded(CryptolKind::Whitespace)), "cry");
    }
}
