//! JSON highlighter: the rendered records themselves, for programmatic use

use super::{Highlighter, RenderedLine};
use crate::errors::{MetaError, MetaResult};

/// JSON output highlighter
pub struct JsonHighlighter {
    /// Whether to pretty-print with indentation
    pretty: bool,
}

impl JsonHighlighter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Highlighter for JsonHighlighter {
    fn highlight(&self, lines: &[RenderedLine]) -> MetaResult<String> {
        let result = if self.pretty {
            serde_json::to_string_pretty(lines)
        } else {
            serde_json::to_string(lines)
        };
        result.map_err(|e| MetaError::io_error(format!("failed to serialize rendered lines: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::classify_str;
    use crate::render::{render, render_with_markers, LintMarker, LintMarkers};

    #[test]
    fn test_emit_rendered_line() {
        let lines = render(&[classify_str("@v 1.0.0")]);
        let json = JsonHighlighter::new(false).highlight(&lines).unwrap();
        assert_eq!(
            json,
            r#"[{"number":1,"spans":[{"role":"tag","text":"@v"},{"role":"plain","text":" 1.0.0"}]}]"#
        );
    }

    #[test]
    fn test_emit_indicator() {
        let markers: LintMarkers = vec![LintMarker::warning(1, "deprecated")]
            .into_iter()
            .collect();
        let lines = render_with_markers(&[classify_str("# old")], &markers);
        let json = JsonHighlighter::new(false).highlight(&lines).unwrap();
        assert!(json.contains(r#""indicator":{"severity":"warning","message":"deprecated"}"#));
    }

    #[test]
    fn test_round_trips_through_serde() {
        let lines = render(&[classify_str("rate:float 0.5"), classify_str("")]);
        let json = JsonHighlighter::new(true).highlight(&lines).unwrap();
        let back: Vec<RenderedLine> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lines);
    }
}
