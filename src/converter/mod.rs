//! Converters from foreign configuration formats to meta source
//!
//! Each branch turns its input into a list of [`Entry`] values using the
//! shared inference in [`infer`]; the entries are then framed identically
//! whatever the input format was.

pub mod dotenv;
pub mod infer;
pub mod json;
pub mod yaml;

pub use infer::{infer_json, infer_literal, strip_quotes, Entry, InferredValue};

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{MetaError, MetaResult};

/// File extension of meta source files
pub const META_EXTENSION: &str = "meta";

/// Name used when saving converted output without an explicit file name
pub const DEFAULT_OUTPUT_NAME: &str = "config.meta";

const BANNER_RULE: &str = "# ===============================";

/// Foreign input formats the converter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    #[default]
    Env,
    Json,
    Yaml,
}

impl SourceFormat {
    pub const NAMES: [&'static str; 3] = ["env", "json", "yaml"];

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "env" | "dotenv" | ".env" => Some(SourceFormat::Env),
            "json" => Some(SourceFormat::Json),
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            _ => None,
        }
    }

    /// Detect the format from a file name. Returns `None` when the name says
    /// nothing, so the caller can keep its current selection.
    pub fn detect(file_name: &str) -> Option<Self> {
        if file_name.ends_with(".json") {
            Some(SourceFormat::Json)
        } else if file_name.ends_with(".yaml") || file_name.ends_with(".yml") {
            Some(SourceFormat::Yaml)
        } else if file_name.ends_with(".env") {
            Some(SourceFormat::Env)
        } else {
            None
        }
    }

    /// Detect the format from a path's file name
    pub fn detect_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(Self::detect)
    }

    /// Human-facing name used in the banner and in error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceFormat::Env => ".env",
            SourceFormat::Json => "JSON",
            SourceFormat::Yaml => "YAML",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Env => "env",
            SourceFormat::Json => "json",
            SourceFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceFormat {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceFormat::parse(s).ok_or_else(|| MetaError::unknown_format(s, &Self::NAMES))
    }
}

/// Options for the framing written around converted declarations
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Environment tag line (default: `@common`)
    pub env_tag: String,
    /// Version written in the `@v` tag (default: `1.0.0`)
    pub version: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self {
            env_tag: "@common".to_string(),
            version: "1.0.0".to_string(),
        }
    }

    /// Set the environment tag; a missing `@` is added
    pub fn with_env_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.env_tag = if tag.starts_with('@') {
            tag
        } else {
            format!("@{}", tag)
        };
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// Convert foreign text to meta source with the default framing
pub fn convert(source: &str, format: SourceFormat) -> MetaResult<String> {
    convert_with_options(source, format, &ConvertOptions::new())
}

/// Convert foreign text to meta source
pub fn convert_with_options(
    source: &str,
    format: SourceFormat,
    options: &ConvertOptions,
) -> MetaResult<String> {
    if source.trim().is_empty() {
        return Ok(String::new());
    }

    let entries = convert_entries(source, format)?;
    tracing::debug!(%format, declarations = entries.len(), "converted input");
    Ok(frame(&entries, format, options))
}

/// Run only the branch for `format`, returning the typed entries
pub fn convert_entries(source: &str, format: SourceFormat) -> MetaResult<Vec<Entry>> {
    match format {
        SourceFormat::Env => Ok(dotenv::parse(source)),
        SourceFormat::Json => json::parse(source),
        SourceFormat::Yaml => Ok(yaml::parse(source)),
    }
}

/// Wrap entries in the banner and tag lines
fn frame(entries: &[Entry], format: SourceFormat, options: &ConvertOptions) -> String {
    let mut lines = vec![
        BANNER_RULE.to_string(),
        format!("# Auto-converted from {} to .meta format", format.display_name()),
        BANNER_RULE.to_string(),
        String::new(),
        options.env_tag.clone(),
        format!("@v {}", options.version),
    ];
    lines.extend(entries.iter().map(|e| e.to_string()));
    lines.push(String::new());
    lines.join("\n")
}
