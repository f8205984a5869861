//! Error types, diagnostics, and result aliases for the meta toolchain.
//!
//! Classification and rendering never fail; the only hard errors come from
//! the format converter and from the I/O done by the CLI. All of them are
//! variants of [`MetaError`], rendered via `miette` diagnostics.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::converter::SourceFormat;

/// A foreign document that could not be turned into meta source.
///
/// The `Display` text (and [`MetaError::message`]) is fixed per format and
/// never echoes the input. The rendered diagnostic does show a snippet of
/// `src` around `span`. The underlying parser's cause is kept in `cause`.
#[derive(Error, Debug, Diagnostic)]
#[error("failed to parse {format} input")]
#[diagnostic(code(M0101), help("please check your input: {cause}"))]
pub struct ConversionError {
    pub format: SourceFormat,
    pub cause: String,
    #[source_code]
    pub src: String,
    #[label("{cause}")]
    pub span: Option<SourceSpan>,
}

impl ConversionError {
    pub fn new(format: SourceFormat, cause: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            format,
            cause: cause.into(),
            src: src.into(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: impl Into<SourceSpan>) -> Self {
        self.span = Some(span.into());
        self
    }
}

/// Main error type for the meta toolchain
#[derive(Error, Debug, Diagnostic)]
pub enum MetaError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Conversion(#[from] ConversionError),

    #[error("unsupported {format} structure")]
    #[diagnostic(code(M0102), help("{help}"))]
    UnsupportedStructure { format: SourceFormat, help: String },

    #[error("unknown format '{name}'")]
    #[diagnostic(code(M0201), help("expected one of: {expected}"))]
    UnknownFormat { name: String, expected: String },

    #[error("invalid lint markers")]
    #[diagnostic(code(M0301), help("{message}"))]
    InvalidMarkers { message: String },

    #[error("I/O error: {message}")]
    IoError { message: String },
}

impl MetaError {
    /// Create an IoError
    pub fn io_error(message: impl Into<String>) -> Self {
        MetaError::IoError {
            message: message.into(),
        }
    }

    pub fn unknown_format(name: impl Into<String>, expected: &[&str]) -> Self {
        MetaError::UnknownFormat {
            name: name.into(),
            expected: expected.join(", "),
        }
    }

    pub fn invalid_markers(message: impl Into<String>) -> Self {
        MetaError::InvalidMarkers {
            message: message.into(),
        }
    }

    /// Whether the error came from converting foreign input.
    pub fn is_conversion_error(&self) -> bool {
        matches!(
            self,
            MetaError::Conversion(_) | MetaError::UnsupportedStructure { .. }
        )
    }

    /// The foreign format involved, for conversion errors.
    pub fn format(&self) -> Option<SourceFormat> {
        match self {
            MetaError::Conversion(e) => Some(e.format),
            MetaError::UnsupportedStructure { format, .. } => Some(*format),
            _ => None,
        }
    }

    /// One-line, human readable description (used by the wasm bindings)
    pub fn message(&self) -> String {
        match self {
            MetaError::Conversion(e) => {
                format!("Failed to parse {}: {}", e.format.display_name(), e.cause)
            }
            MetaError::UnsupportedStructure { format, help } => {
                format!("Unsupported {} structure: {}", format.display_name(), help)
            }
            MetaError::UnknownFormat { name, expected } => {
                format!("unknown format '{}' (expected one of: {})", name, expected)
            }
            MetaError::InvalidMarkers { message } => format!("invalid lint markers: {}", message),
            MetaError::IoError { message } => format!("I/O error: {}", message),
        }
    }
}

/// Result type alias for meta operations
pub type MetaResult<T> = Result<T, MetaError>;

/// Convert a 1-based line/column pair reported by a parser into a byte offset
/// into `src`, clamped to the end of the input.
pub(crate) fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut offset = 0;
    for (idx, text) in src.split('\n').enumerate() {
        if idx + 1 == line {
            let col = column.saturating_sub(1).min(text.len());
            return Some((offset + col).min(src.len()));
        }
        offset += text.len() + 1;
    }
    Some(src.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of_first_line() {
        assert_eq!(offset_of("abc\ndef", 1, 1), Some(0));
        assert_eq!(offset_of("abc\ndef", 1, 3), Some(2));
    }

    #[test]
    fn test_offset_of_later_line() {
        assert_eq!(offset_of("abc\ndef", 2, 2), Some(5));
    }

    #[test]
    fn test_offset_of_clamps() {
        assert_eq!(offset_of("abc", 1, 99), Some(3));
        assert_eq!(offset_of("abc", 7, 1), Some(3));
        assert_eq!(offset_of("abc", 0, 0), None);
    }

    #[test]
    fn test_conversion_error_reports_format() {
        let err: MetaError = ConversionError::new(SourceFormat::Json, "EOF", "{").into();
        assert!(err.is_conversion_error());
        assert_eq!(err.format(), Some(SourceFormat::Json));
        assert_eq!(err.to_string(), "failed to parse json input");
        assert_eq!(err.message(), "Failed to parse JSON: EOF");
    }

    #[test]
    fn test_io_error_is_not_conversion() {
        let err = MetaError::io_error("disk on fire");
        assert!(!err.is_conversion_error());
        assert_eq!(err.format(), None);
        assert_eq!(err.message(), "I/O error: disk on fire");
    }

    #[test]
    fn test_unknown_format_lists_choices() {
        let err = MetaError::unknown_format("toml", &["env", "json", "yaml"]);
        assert_eq!(err.message(), "unknown format 'toml' (expected one of: env, json, yaml)");
    }
}
