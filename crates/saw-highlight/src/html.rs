//! HTML emission.
//!
//! Walks the token stream and emits one `<span>` per styled token inside a
//! `<pre>` block. Token text passes through [`crate::escape`], so the output
//! is safe to embed in any page; whitespace is emitted bare to keep the
//! markup readable.

use saw_lexer::Scanner;

use crate::{css, css_class, escape};

/// Render SAWScript source as a highlighted `<pre>` block.
pub fn render(source: &str) -> String {
    let mut out = String::with_capacity(source.len() * 2);
    out.push_str("<pre class=\"sawscript\">");
    for tok in Scanner::new(source) {
        let class = css_class(tok.kind);
        if class.is_empty() {
            out.push_str(&escape(tok.text));
        } else {
            out.push_str(&format!(
                "<span class=\"{class}\">{}</span>",
                escape(tok.text)
            ));
        }
    }
    out.push_str("</pre>\n");
    out
}

/// Render a standalone HTML page with the default stylesheet embedded,
/// for previewing a script outside a documentation build.
pub fn render_page(title: &str, source: &str) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n");
    page.push_str(&format!("  <title>{}</title>\n", escape(title)));
    page.push_str(&format!("  <style>\n{}\n  </style>\n", css::STYLESHEET));
    page.push_str("</head>\n<body>\n");
    page.push_str(&render(source));
    page.push_str("</body>\n</html>\n");
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        assert_eq!(render(""), "<pre class=\"sawscript\"></pre>\n");
    }

    #[test]
    fn test_render_let_binding() {
        let html = render("let x = 5");
        assert_eq!(
            html,
            "<pre class=\"sawscript\"><span class=\"k\">let</span> \
             <span class=\"nf\">x</span> <span class=\"o\">=</span> \
             <span class=\"m\">5</span></pre>\n"
        );
    }

    #[test]
    fn test_render_escapes_token_text() {
        // `<-` must not leak raw markup into the output.
        let html = render("r <- f");
        assert!(html.contains("<span class=\"o\">&lt;-</span>"));
        assert!(!html.contains("<span class=\"o\"><-"));
    }

    #[test]
    fn test_render_embedded_block() {
        let html = render("{{ 1 + 2 }}");
        assert!(html.contains("<span class=\"l\">{{</span>"));
        assert!(html.contains("<span class=\"cry m\">1</span>"));
        assert!(html.contains("<span class=\"cry o\">+</span>"));
        assert!(html.contains("<span class=\"l\">}}</span>"));
    }

    #[test]
    fn test_render_marks_errors() {
        let html = render("@");
        assert!(html.contains("<span class=\"err\">@</span>"));
    }

    #[test]
    fn test_render_comment() {
        let html = render("// note\ndo");
        assert!(html.contains("<span class=\"c1\">// note</span>"));
        assert!(html.contains("<span class=\"k\">do</span>"));
    }

    #[test]
    fn test_render_page_structure() {
        let page = render_page("swap.saw", "let x = 5");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>swap.saw</title>"));
        assert!(page.contains("pre.sawscript"));
        assert!(page.contains("<span class=\"k\">let</span>"));
        assert!(page.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn test_render_page_escapes_title() {
        let page = render_page("a<b", "");
        assert!(page.contains("<title>a&lt;b</title>"));
    }
}
