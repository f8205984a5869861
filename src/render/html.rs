//! HTML highlighter
//!
//! Emits one `<div class="line">` per rendered line and one
//! `<span class="meta-{role}">` per span. Styling is left to the page's
//! stylesheet.

use super::{Highlighter, LintIndicator, RenderedLine, SpanRole};
use crate::errors::MetaResult;

/// HTML output highlighter
pub struct HtmlHighlighter {
    /// Class placed on the wrapping element
    container_class: String,
}

impl Default for HtmlHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlHighlighter {
    pub fn new() -> Self {
        Self {
            container_class: "meta-code".to_string(),
        }
    }

    pub fn with_container_class(class: impl Into<String>) -> Self {
        Self {
            container_class: class.into(),
        }
    }

    /// Escape text for use in element content and attribute values
    fn escape(&self, s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for ch in s.chars() {
            match ch {
                '&' => result.push_str("&amp;"),
                '<' => result.push_str("&lt;"),
                '>' => result.push_str("&gt;"),
                '"' => result.push_str("&quot;"),
                '\'' => result.push_str("&#39;"),
                '\u{a0}' => result.push_str("&nbsp;"),
                c => result.push(c),
            }
        }
        result
    }

    fn emit_indicator(&self, indicator: &LintIndicator) -> String {
        let message = self.escape(&indicator.message);
        format!(
            "<span class=\"lint lint-{}\" title=\"{}\" aria-label=\"{}\"></span>",
            indicator.severity, message, message
        )
    }

    fn emit_line(&self, line: &RenderedLine) -> String {
        let mut out = format!("<div class=\"line\" data-line=\"{}\">", line.number);

        if let Some(indicator) = &line.indicator {
            out.push_str(&self.emit_indicator(indicator));
        }

        for span in &line.spans {
            let text = self.escape(&span.text);
            match span.role {
                SpanRole::Indent => out.push_str(&text),
                role => {
                    out.push_str(&format!("<span class=\"meta-{}\">{}</span>", role, text));
                }
            }
        }

        out.push_str("</div>");
        out
    }
}

impl Highlighter for HtmlHighlighter {
    fn highlight(&self, lines: &[RenderedLine]) -> MetaResult<String> {
        let mut out = format!("<pre class=\"{}\">\n", self.escape(&self.container_class));
        for line in lines {
            out.push_str(&self.emit_line(line));
            out.push('\n');
        }
        out.push_str("</pre>\n");
        Ok(out)
    }
}
