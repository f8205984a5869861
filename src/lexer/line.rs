use std::fmt;

use serde::{Deserialize, Serialize};

/// One input line of meta source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Raw text, without the line terminator
    pub text: &'a str,
    /// Line number (1-indexed)
    pub number: usize,
}

impl<'a> Line<'a> {
    pub fn new(text: &'a str, number: usize) -> Self {
        Self { text, number }
    }

    /// The leading whitespace run
    pub fn indent(&self) -> &'a str {
        let trimmed = self.text.trim_start();
        &self.text[..self.text.len() - trimmed.len()]
    }
}

/// The value types a declaration can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Int,
    Bool,
    Float,
    Env,
}

impl ValueType {
    pub const ALL: [ValueType; 5] = [
        ValueType::String,
        ValueType::Int,
        ValueType::Bool,
        ValueType::Float,
        ValueType::Env,
    ];

    /// The keyword used in source
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Bool => "bool",
            ValueType::Float => "float",
            ValueType::Env => "env",
        }
    }

    /// Get the value type from its keyword, if it is one. Case-sensitive.
    pub fn keyword_from_str(s: &str) -> Option<ValueType> {
        match s {
            "string" => Some(ValueType::String),
            "int" => Some(ValueType::Int),
            "bool" => Some(ValueType::Bool),
            "float" => Some(ValueType::Float),
            "env" => Some(ValueType::Env),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An embedded `$ENV(...)` marker inside a declaration value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvReference {
    /// Text before `$ENV`
    pub prefix: String,
    /// Text strictly between the parentheses, kept opaque
    pub argument: String,
    /// Text after the closing parenthesis
    pub suffix: String,
}

/// A `key:type value` line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub indent: String,
    pub key: String,
    pub value_type: ValueType,
    pub raw_value: String,
    pub env_reference: Option<EnvReference>,
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{} {}",
            self.indent, self.key, self.value_type, self.raw_value
        )
    }
}

/// The classification of a single line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClassifiedLine {
    /// Trimmed line starts with `#`; `text` is the full original line
    Comment { text: String },
    /// Trimmed line starts with `@`
    Tag { name: String, rest: String },
    Declaration(Declaration),
    Blank,
    /// Anything else, verbatim
    Opaque { text: String },
}

impl ClassifiedLine {
    /// Short name of the variant, for debugging output
    pub fn kind_name(&self) -> &'static str {
        match self {
            ClassifiedLine::Comment { .. } => "comment",
            ClassifiedLine::Tag { .. } => "tag",
            ClassifiedLine::Declaration(_) => "declaration",
            ClassifiedLine::Blank => "blank",
            ClassifiedLine::Opaque { .. } => "opaque",
        }
    }

    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            ClassifiedLine::Declaration(decl) => Some(decl),
            _ => None,
        }
    }
}

impl fmt::Display for ClassifiedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifiedLine::Comment { text } => write!(f, "{}", text),
            ClassifiedLine::Tag { name, rest } if rest.is_empty() => write!(f, "{}", name),
            ClassifiedLine::Tag { name, rest } => write!(f, "{} {}", name, rest),
            ClassifiedLine::Declaration(decl) => write!(f, "{}", decl),
            ClassifiedLine::Blank => Ok(()),
            ClassifiedLine::Opaque { text } => write!(f, "{}", text),
        }
    }
}

/// A classified line together with its position in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexedLine {
    /// Line number (1-indexed)
    pub number: usize,
    pub classified: ClassifiedLine,
}

impl fmt::Display for LexedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.classified.kind_name(), self.number)
    }
}
