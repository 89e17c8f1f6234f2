//! Default stylesheet.
//!
//! Covers every class the HTML renderer emits. Colors follow the classic
//! "default" highlighter palette so documentation themes that already style
//! these classes pick the output up unchanged.

/// Stylesheet for highlighted `<pre class="sawscript">` blocks.
pub const STYLESHEET: &str = "\
pre.sawscript { background: #f8f8f8; padding: 0.8em; line-height: 1.4; }
pre.sawscript .k   { color: #007020; font-weight: bold; }
pre.sawscript .kc  { color: #007020; font-weight: bold; }
pre.sawscript .nb  { color: #007020; }
pre.sawscript .nv  { color: #bb60d5; }
pre.sawscript .nf  { color: #06287e; }
pre.sawscript .m   { color: #40a070; }
pre.sawscript .o   { color: #666666; }
pre.sawscript .c1  { color: #60a0b0; font-style: italic; }
pre.sawscript .cm  { color: #60a0b0; font-style: italic; }
pre.sawscript .s   { color: #4070a0; }
pre.sawscript .l   { color: #40a070; }
pre.sawscript .cry { background: #f0f4ff; }
pre.sawscript .err { border: 1px solid #ff0000; }
";
