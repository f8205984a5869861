use wasm_bindgen::prelude::*;

use meta::{HighlightFormat, LintMarkers, MetaResult, SourceFormat};

#[wasm_bindgen]
pub struct ConvertResult {
    output: String,
    error: String,
    success: bool,
}

#[wasm_bindgen]
impl ConvertResult {
    #[wasm_bindgen(getter)]
    pub fn output(&self) -> String {
        self.output.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> String {
        self.error.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn success(&self) -> bool {
        self.success
    }
}

impl From<MetaResult<String>> for ConvertResult {
    fn from(result: MetaResult<String>) -> Self {
        match result {
            Ok(output) => ConvertResult {
                output,
                error: String::new(),
                success: true,
            },
            Err(e) => ConvertResult {
                output: String::new(),
                error: e.message(),
                success: false,
            },
        }
    }
}

/// Convert foreign configuration text to meta source.
///
/// - `source`: .env, JSON or YAML text
/// - `format`: "env", "json" or "yaml"
///
/// Nothing is emitted on failure; `error` carries a message such as
/// `Failed to parse JSON: ...`.
#[wasm_bindgen]
pub fn convert(source: &str, format: &str) -> ConvertResult {
    let result = format
        .parse::<SourceFormat>()
        .and_then(|format| meta::convert(source, format));
    result.into()
}

/// Render meta source as HTML.
///
/// - `markers_json`: JSON array of `{line, message, severity}` objects, or
///   an empty string for no markers
#[wasm_bindgen]
pub fn highlight_html(source: &str, markers_json: &str) -> ConvertResult {
    highlight_with(source, markers_json, HighlightFormat::Html)
}

/// Render meta source as a JSON array of lines and spans, for callers that
/// build their own view.
#[wasm_bindgen]
pub fn highlight_json(source: &str, markers_json: &str) -> ConvertResult {
    highlight_with(source, markers_json, HighlightFormat::Json)
}

fn highlight_with(source: &str, markers_json: &str, format: HighlightFormat) -> ConvertResult {
    let result = parse_markers(markers_json)
        .and_then(|markers| meta::highlight(source, &markers, format));
    result.into()
}

fn parse_markers(markers_json: &str) -> MetaResult<LintMarkers> {
    if markers_json.trim().is_empty() {
        return Ok(LintMarkers::new());
    }
    LintMarkers::from_json(markers_json)
}

/// Pick the input format for a file name, keeping `current` when the name
/// carries no recognised extension.
#[wasm_bindgen]
pub fn detect_format(file_name: &str, current: &str) -> String {
    match SourceFormat::detect(file_name) {
        Some(format) => format.as_str().to_string(),
        None => current.to_string(),
    }
}
