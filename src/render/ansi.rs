//! Terminal highlighter using ANSI colours

use indexmap::IndexMap;
use owo_colors::{AnsiColors, OwoColorize, Style};

use super::{Highlighter, LintIndicator, RenderedLine, Severity, SpanRole};
use crate::errors::MetaResult;

/// Glyph drawn in the gutter of a marked line
const INDICATOR_GLYPH: &str = "●";

/// Role → style table
#[derive(Debug, Clone)]
pub struct Palette {
    styles: IndexMap<SpanRole, Style>,
    error: Option<Style>,
    warning: Option<Style>,
    message: Option<Style>,
}

impl Default for Palette {
    fn default() -> Self {
        let mut styles = IndexMap::new();
        styles.insert(SpanRole::Comment, Style::new().color(AnsiColors::Green));
        styles.insert(
            SpanRole::Tag,
            Style::new().color(AnsiColors::Magenta).bold(),
        );
        styles.insert(SpanRole::Key, Style::new().color(AnsiColors::Yellow));
        styles.insert(
            SpanRole::Separator,
            Style::new().color(AnsiColors::BrightBlack),
        );
        styles.insert(SpanRole::Type, Style::new().color(AnsiColors::Blue));
        styles.insert(
            SpanRole::Boolean,
            Style::new().color(AnsiColors::BrightGreen).bold(),
        );
        styles.insert(
            SpanRole::StringValue,
            Style::new().color(AnsiColors::BrightWhite),
        );
        styles.insert(SpanRole::Literal, Style::new().color(AnsiColors::BrightGreen));
        styles.insert(SpanRole::EnvMarker, Style::new().color(AnsiColors::Cyan));
        styles.insert(
            SpanRole::Punctuation,
            Style::new().color(AnsiColors::BrightBlack),
        );

        Self {
            styles,
            error: Some(Style::new().color(AnsiColors::Red)),
            warning: Some(Style::new().color(AnsiColors::Yellow)),
            message: Some(Style::new().dimmed()),
        }
    }
}

impl Palette {
    /// A palette that applies no styling at all
    pub fn plain() -> Self {
        Self {
            styles: IndexMap::new(),
            error: None,
            warning: None,
            message: None,
        }
    }

    /// Override the style used for a role
    pub fn with_style(mut self, role: SpanRole, style: Style) -> Self {
        self.styles.insert(role, style);
        self
    }

    pub fn style(&self, role: SpanRole) -> Option<Style> {
        self.styles.get(&role).copied()
    }

    fn severity_style(&self, severity: Severity) -> Option<Style> {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
        }
    }
}

/// ANSI terminal output
pub struct AnsiHighlighter {
    palette: Palette,
}

impl Default for AnsiHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnsiHighlighter {
    pub fn new() -> Self {
        Self {
            palette: Palette::default(),
        }
    }

    pub fn with_palette(palette: Palette) -> Self {
        Self { palette }
    }

    /// Colourless output, still with the lint gutter
    pub fn plain() -> Self {
        Self::with_palette(Palette::plain())
    }

    fn paint(out: &mut String, text: &str, style: Option<Style>) {
        match style {
            Some(style) => out.push_str(&text.style(style).to_string()),
            None => out.push_str(text),
        }
    }

    fn write_gutter(&self, out: &mut String, indicator: Option<&LintIndicator>) {
        match indicator {
            Some(ind) => {
                Self::paint(out, INDICATOR_GLYPH, self.palette.severity_style(ind.severity));
                out.push(' ');
            }
            None => out.push_str("  "),
        }
    }

    fn write_line(&self, out: &mut String, line: &RenderedLine, gutter: bool) {
        if gutter {
            self.write_gutter(out, line.indicator.as_ref());
        }

        for span in &line.spans {
            match span.role {
                // Terminals keep empty lines on their own
                SpanRole::Placeholder => {}
                SpanRole::Plain | SpanRole::Indent => out.push_str(&span.text),
                role => Self::paint(out, &span.text, self.palette.style(role)),
            }
        }

        if let Some(ind) = &line.indicator {
            let note = format!("  # {}: {}", ind.severity, ind.message);
            Self::paint(out, &note, self.palette.message);
        }
    }
}

impl Highlighter for AnsiHighlighter {
    fn highlight(&self, lines: &[RenderedLine]) -> MetaResult<String> {
        let gutter = lines.iter().any(|l| l.indicator.is_some());
        let mut out = String::new();

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.write_line(&mut out, line, gutter);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::classify_str;
    use crate::render::{render, render_with_markers, LintMarker, LintMarkers};

    fn rendered(lines: &[&str]) -> Vec<RenderedLine> {
        let classified: Vec<_> = lines.iter().map(|l| classify_str(l)).collect();
        render(&classified)
    }

    #[test]
    fn test_plain_output_reproduces_text() {
        let lines = rendered(&["# c", "@env dev", "  port:int 80", "", "other"]);
        let out = AnsiHighlighter::plain().highlight(&lines).unwrap();
        assert_eq!(out, "# c\n@env dev\n  port:int 80\n\nother");
    }

    #[test]
    fn test_coloured_output_contains_escape_codes() {
        let lines = rendered(&["debug:bool true"]);
        let out = AnsiHighlighter::new().highlight(&lines).unwrap();
        assert!(out.contains("\u{1b}["));
        assert!(out.contains("debug"));
        assert!(out.contains("true"));
    }

    #[test]
    fn test_gutter_only_when_marked() {
        let classified = vec![classify_str("a:int 1"), classify_str("b:int 2")];
        let markers: LintMarkers = vec![LintMarker::error(2, "duplicate")]
            .into_iter()
            .collect();
        let lines = render_with_markers(&classified, &markers);
        let out = AnsiHighlighter::plain().highlight(&lines).unwrap();
        assert_eq!(out, "  a:int 1\n● b:int 2  # error: duplicate");
    }

    #[test]
    fn test_palette_override() {
        let palette = Palette::plain().with_style(SpanRole::Key, Style::new().bold());
        let lines = rendered(&["k:int 1"]);
        let out = AnsiHighlighter::with_palette(palette).highlight(&lines).unwrap();
        assert!(out.starts_with("\u{1b}["));
        assert!(out.ends_with(":int 1"));
    }
}
