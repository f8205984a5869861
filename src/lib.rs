// Rust 1.93+ triggers false positives on thiserror/miette derive macro fields
#![allow(unused_assignments)]

//! Meta Configuration Format
//!
//! A line-oriented configuration format with typed declarations,
//! environment tags and deferred environment references. This crate
//! classifies meta source line by line, renders it for highlighting (with
//! optional lint markers), and converts `.env`, JSON and YAML into it.
//!
//! # Example
//!
//! ```meta
//! # ===============================
//! @common
//! @v 1.0.0
//! app_name:string My App
//! port:int 3000
//! debug:bool true
//! database_url:env postgres://$ENV(DB_HOST):5432
//! ```

pub mod converter;
pub mod errors;
pub mod lexer;
pub mod render;

pub use converter::{
    convert, convert_entries, convert_with_options, infer_json, infer_literal, ConvertOptions,
    Entry, InferredValue, SourceFormat, DEFAULT_OUTPUT_NAME, META_EXTENSION,
};
pub use errors::{ConversionError, MetaError, MetaResult};
pub use lexer::{
    classify, classify_str, extract_env_reference, ClassifiedLine, Declaration, EnvReference,
    LexedLine, Lexer, Line, ValueType, DECLARATION_PATTERN,
};
pub use render::{
    highlight, render, render_line, render_source, render_with_markers, AnsiHighlighter,
    HighlightFormat, Highlighter, HtmlHighlighter, JsonHighlighter, LintIndicator, LintMarker,
    LintMarkers, Palette, RenderedLine, Severity, Span, SpanRole,
};
