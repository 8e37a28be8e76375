use crate::port::highlighter::SyntaxHighlighter;

/// Fallback highlighter: escapes the code and tags the block with its
/// language so a stylesheet or a client-side highlighter can pick it up.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscapeHighlighter;

impl SyntaxHighlighter for HtmlEscapeHighlighter {
    fn name(&self) -> &str {
        "html-escape"
    }

    fn highlight(&self, code: &str, language: Option<&str>) -> String {
        let escaped = escape_html(code);
        match language.filter(|lang| !lang.is_empty()) {
            Some(lang) => format!(
                "<pre><code class=\"language-{}\">{escaped}</code></pre>",
                escape_html(lang)
            ),
            None => format!("<pre><code>{escaped}</code></pre>"),
        }
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
