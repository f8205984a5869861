//! Lexer (line classifier) for the meta configuration format.
//!
//! The meta format is line oriented: every line is classified on its own into
//! a [`ClassifiedLine`], with no state carried between lines. The
//! declaration grammar defined here is the single source of truth for the
//! highlighter and the converter.

pub mod line;

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

pub use line::{ClassifiedLine, Declaration, EnvReference, LexedLine, Line, ValueType};

/// The declaration grammar: indent, lowercase key, type keyword, value.
pub const DECLARATION_PATTERN: &str = r"^(\s*)([a-z_]+):(string|int|bool|float|env)\s+(.+)$";

/// Opening of an environment reference inside a value
pub const ENV_MARKER: &str = "$ENV";

static DECLARATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DECLARATION_PATTERN).expect("valid declaration pattern"));

static ENV_REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$ENV\(([^)]+)\)").expect("valid env reference pattern"));

/// Classify one line. Total and side-effect free; the branch order below is
/// part of the contract (comments win over tags, tags over declarations).
pub fn classify(line: &Line<'_>) -> ClassifiedLine {
    let text = line.text;
    let trimmed = text.trim();

    if trimmed.starts_with('#') {
        return ClassifiedLine::Comment {
            text: text.to_string(),
        };
    }

    if trimmed.starts_with('@') {
        let (name, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        return ClassifiedLine::Tag {
            name: name.to_string(),
            rest: rest.to_string(),
        };
    }

    if let Some(decl) = match_declaration(text) {
        return ClassifiedLine::Declaration(decl);
    }

    if trimmed.is_empty() {
        return ClassifiedLine::Blank;
    }

    ClassifiedLine::Opaque {
        text: text.to_string(),
    }
}

/// Classify a bare string as if it were line 1
pub fn classify_str(text: &str) -> ClassifiedLine {
    classify(&Line::new(text, 1))
}

/// Check whether `text` is exactly one well-formed declaration
pub fn is_declaration(text: &str) -> bool {
    DECLARATION_RE.is_match(text)
}

fn match_declaration(text: &str) -> Option<Declaration> {
    let caps = DECLARATION_RE.captures(text)?;
    let value_type = ValueType::keyword_from_str(&caps[3])?;
    let raw_value = caps[4].to_string();
    let env_reference = extract_env_reference(&raw_value);

    Some(Declaration {
        indent: caps[1].to_string(),
        key: caps[2].to_string(),
        value_type,
        raw_value,
        env_reference,
    })
}

/// Find the first `$ENV(...)` marker in a value. The argument runs up to the
/// first `)`; nested parentheses are not supported. A marker without a
/// closing parenthesis or with an empty argument is not a reference; the
/// search moves on to the next marker.
pub fn extract_env_reference(value: &str) -> Option<EnvReference> {
    let caps = ENV_REFERENCE_RE.captures(value)?;
    let whole = caps.get(0)?;
    let argument = caps.get(1)?;

    Some(EnvReference {
        prefix: value[..whole.start()].to_string(),
        argument: argument.as_str().to_string(),
        suffix: value[whole.end()..].to_string(),
    })
}

/// Split a document into lines. Splits on `\n` only, so a trailing newline
/// yields a final empty line; a `\r` left by CRLF endings is dropped.
pub fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Line classifier over a whole document
pub struct Lexer<'a> {
    /// Source text being classified
    source: &'a str,
    /// File path for debugging output
    file: Option<PathBuf>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text
    pub fn new(source: &'a str, file: Option<PathBuf>) -> Self {
        Self { source, file }
    }

    /// File path the source was read from, if any
    pub fn file(&self) -> Option<&PathBuf> {
        self.file.as_ref()
    }

    /// Iterate over the document's lines with 1-based numbers
    pub fn lines(&self) -> impl Iterator<Item = Line<'a>> {
        split_lines(self.source)
            .enumerate()
            .map(|(idx, text)| Line::new(text, idx + 1))
    }

    /// Classify every line of the document, in order
    pub fn classify_all(&self) -> Vec<LexedLine> {
        let lexed: Vec<LexedLine> = self
            .lines()
            .map(|line| LexedLine {
                number: line.number,
                classified: classify(&line),
            })
            .collect();

        tracing::debug!(
            file = ?self.file,
            lines = lexed.len(),
            declarations = lexed
                .iter()
                .filter(|l| l.classified.as_declaration().is_some())
                .count(),
            "classified document"
        );

        lexed
    }
}
