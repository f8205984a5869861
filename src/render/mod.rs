//! Renderer for classified meta lines
//!
//! Maps each [`ClassifiedLine`] to a sequence of [`Span`]s tagged with a
//! semantic [`SpanRole`], optionally overlaying a caller-supplied lint
//! marker. Rendering never fails. Turning rendered lines into text is the
//! job of a [`Highlighter`] (ANSI, HTML or JSON).

mod ansi;
mod html;
mod json;

pub use ansi::{AnsiHighlighter, Palette};
pub use html::HtmlHighlighter;
pub use json::JsonHighlighter;

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{MetaError, MetaResult};
use crate::lexer::{ClassifiedLine, Declaration, LexedLine, Lexer, ValueType, ENV_MARKER};

/// Placeholder emitted for blank lines so they keep their height
pub const BLANK_PLACEHOLDER: &str = "\u{a0}";

/// Semantic role of a span; highlighters choose the actual styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpanRole {
    Comment,
    Tag,
    Plain,
    Indent,
    Key,
    Separator,
    Type,
    Boolean,
    StringValue,
    /// Numbers and env literals
    Literal,
    EnvMarker,
    Punctuation,
    Placeholder,
}

impl SpanRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanRole::Comment => "comment",
            SpanRole::Tag => "tag",
            SpanRole::Plain => "plain",
            SpanRole::Indent => "indent",
            SpanRole::Key => "key",
            SpanRole::Separator => "separator",
            SpanRole::Type => "type",
            SpanRole::Boolean => "boolean",
            SpanRole::StringValue => "string-value",
            SpanRole::Literal => "literal",
            SpanRole::EnvMarker => "env-marker",
            SpanRole::Punctuation => "punctuation",
            SpanRole::Placeholder => "placeholder",
        }
    }
}

impl fmt::Display for SpanRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A run of text with one semantic role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub role: SpanRole,
    pub text: String,
}

impl Span {
    pub fn new(role: SpanRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caller-supplied annotation for one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintMarker {
    /// Line number (1-indexed)
    pub line: usize,
    pub message: String,
    #[serde(alias = "type")]
    pub severity: Severity,
}

impl LintMarker {
    pub fn new(line: usize, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            line,
            message: message.into(),
            severity,
        }
    }

    pub fn error(line: usize, message: impl Into<String>) -> Self {
        Self::new(line, message, Severity::Error)
    }

    pub fn warning(line: usize, message: impl Into<String>) -> Self {
        Self::new(line, message, Severity::Warning)
    }
}

/// Lint markers keyed by line number. When several markers target the same
/// line, the last one inserted wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintMarkers {
    by_line: IndexMap<usize, LintMarker>,
}

impl LintMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, marker: LintMarker) {
        self.by_line.insert(marker.line, marker);
    }

    pub fn get(&self, line: usize) -> Option<&LintMarker> {
        self.by_line.get(&line)
    }

    pub fn len(&self) -> usize {
        self.by_line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }

    /// Parse a JSON array of `{line, message, severity}` objects
    pub fn from_json(text: &str) -> MetaResult<Self> {
        let markers: Vec<LintMarker> = serde_json::from_str(text)
            .map_err(|e| MetaError::invalid_markers(format!("JSON: {}", e)))?;
        Ok(markers.into_iter().collect())
    }

    /// Parse a YAML sequence of `{line, message, severity}` mappings
    pub fn from_yaml(text: &str) -> MetaResult<Self> {
        let markers: Vec<LintMarker> = serde_yaml::from_str(text)
            .map_err(|e| MetaError::invalid_markers(format!("YAML: {}", e)))?;
        Ok(markers.into_iter().collect())
    }
}

impl FromIterator<LintMarker> for LintMarkers {
    fn from_iter<I: IntoIterator<Item = LintMarker>>(iter: I) -> Self {
        let mut markers = LintMarkers::new();
        for marker in iter {
            markers.insert(marker);
        }
        markers
    }
}

/// Gutter indicator shown for a marked line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintIndicator {
    pub severity: Severity,
    /// Tooltip / accessible text
    pub message: String,
}

impl From<&LintMarker> for LintIndicator {
    fn from(marker: &LintMarker) -> Self {
        Self {
            severity: marker.severity,
            message: marker.message.clone(),
        }
    }
}

/// Presentation record for one input line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedLine {
    /// Line number (1-indexed)
    pub number: usize,
    pub spans: Vec<Span>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub indicator: Option<LintIndicator>,
}

impl RenderedLine {
    /// The line's text with all roles stripped
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Partition one classified line into semantic spans
pub fn render_line(classified: &ClassifiedLine) -> Vec<Span> {
    match classified {
        ClassifiedLine::Comment { text } => vec![Span::new(SpanRole::Comment, text.as_str())],
        ClassifiedLine::Tag { name, rest } => {
            let mut spans = vec![Span::new(SpanRole::Tag, name.as_str())];
            if !rest.is_empty() {
                spans.push(Span::new(SpanRole::Plain, format!(" {}", rest)));
            }
            spans
        }
        ClassifiedLine::Declaration(decl) => render_declaration(decl),
        ClassifiedLine::Blank => vec![Span::new(SpanRole::Placeholder, BLANK_PLACEHOLDER)],
        ClassifiedLine::Opaque { text } => vec![Span::new(SpanRole::Plain, text.as_str())],
    }
}

fn render_declaration(decl: &Declaration) -> Vec<Span> {
    let mut spans = Vec::with_capacity(11);
    if !decl.indent.is_empty() {
        spans.push(Span::new(SpanRole::Indent, decl.indent.as_str()));
    }
    spans.push(Span::new(SpanRole::Key, decl.key.as_str()));
    spans.push(Span::new(SpanRole::Separator, ":"));
    spans.push(Span::new(SpanRole::Type, decl.value_type.as_str()));
    spans.push(Span::new(SpanRole::Plain, " "));

    if let Some(env) = &decl.env_reference {
        spans.push(Span::new(SpanRole::Plain, env.prefix.as_str()));
        spans.push(Span::new(SpanRole::EnvMarker, ENV_MARKER));
        spans.push(Span::new(SpanRole::Punctuation, "("));
        spans.push(Span::new(SpanRole::Plain, env.argument.as_str()));
        spans.push(Span::new(SpanRole::Punctuation, ")"));
        spans.push(Span::new(SpanRole::Plain, env.suffix.as_str()));
        return spans;
    }

    let role = match decl.value_type {
        ValueType::Bool => SpanRole::Boolean,
        ValueType::String => SpanRole::StringValue,
        ValueType::Int | ValueType::Float | ValueType::Env => SpanRole::Literal,
    };
    spans.push(Span::new(role, decl.raw_value.as_str()));
    spans
}

/// Render classified lines without lint markers. Line numbers are the
/// 1-based positions in `lines`.
pub fn render(lines: &[ClassifiedLine]) -> Vec<RenderedLine> {
    render_with_markers(lines, &LintMarkers::new())
}

/// Render classified lines, attaching an indicator to every line that has a
/// marker. Markers never change the spans.
pub fn render_with_markers(lines: &[ClassifiedLine], markers: &LintMarkers) -> Vec<RenderedLine> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, classified)| {
            let number = idx + 1;
            RenderedLine {
                number,
                spans: render_line(classified),
                indicator: markers.get(number).map(LintIndicator::from),
            }
        })
        .collect()
}

/// Render lines produced by the [`Lexer`], keeping their numbering
pub fn render_lexed(lines: &[LexedLine], markers: &LintMarkers) -> Vec<RenderedLine> {
    lines
        .iter()
        .map(|lexed| RenderedLine {
            number: lexed.number,
            spans: render_line(&lexed.classified),
            indicator: markers.get(lexed.number).map(LintIndicator::from),
        })
        .collect()
}

/// Classify and render a whole document
pub fn render_source(source: &str, markers: &LintMarkers) -> Vec<RenderedLine> {
    let lexed = Lexer::new(source, None).classify_all();
    render_lexed(&lexed, markers)
}

/// Text output format for rendered lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightFormat {
    Ansi,
    Html,
    Json,
}

impl HighlightFormat {
    pub const NAMES: [&'static str; 3] = ["ansi", "html", "json"];

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ansi" | "terminal" | "term" => Some(HighlightFormat::Ansi),
            "html" => Some(HighlightFormat::Html),
            "json" => Some(HighlightFormat::Json),
            _ => None,
        }
    }
}

/// Trait for highlight backends
pub trait Highlighter {
    /// Turn rendered lines into text
    fn highlight(&self, lines: &[RenderedLine]) -> MetaResult<String>;

    /// Write highlighted output to a writer
    fn highlight_to_writer<W: std::io::Write>(
        &self,
        lines: &[RenderedLine],
        writer: &mut W,
    ) -> MetaResult<()> {
        let output = self.highlight(lines)?;
        writer
            .write_all(output.as_bytes())
            .map_err(|e| MetaError::io_error(e.to_string()))
    }
}

/// Highlight a document in the specified format
pub fn highlight(
    source: &str,
    markers: &LintMarkers,
    format: HighlightFormat,
) -> MetaResult<String> {
    let lines = render_source(source, markers);
    match format {
        HighlightFormat::Ansi => AnsiHighlighter::new().highlight(&lines),
        HighlightFormat::Html => HtmlHighlighter::new().highlight(&lines),
        HighlightFormat::Json => JsonHighlighter::new(false).highlight(&lines),
    }
}
