//! Restricted YAML importer
//!
//! Only flat `key: value` lines are understood. Nesting, lists, flow style
//! and multi-line scalars are out of scope; a line is either a single
//! mapping entry or it is skipped.

use super::infer::{infer_literal, strip_quotes, Entry};

/// Convert YAML text into declaration entries
pub fn parse(source: &str) -> Vec<Entry> {
    let mut entries = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            tracing::trace!(line = idx + 1, "skipping YAML line without ':'");
            continue;
        };

        let key = key.trim().to_lowercase();
        let value = strip_quotes(value.trim());

        // `parent:` heads a nested mapping, which has no scalar to declare
        if key.is_empty() || value.is_empty() {
            tracing::debug!(line = idx + 1, %key, "skipping YAML line with empty key or value");
            continue;
        }

        entries.push(Entry::new(key, infer_literal(value)));
    }

    entries
}
