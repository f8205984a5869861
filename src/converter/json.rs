//! JSON importer
//!
//! Flattens a JSON object depth-first in declared key order. Object keys are
//! lowercased and joined with `_`; array elements use their index as the
//! path segment.

use super::infer::{infer_json, Entry};
use super::SourceFormat;
use crate::errors::{offset_of, ConversionError, MetaError, MetaResult};

/// Convert JSON text into declaration entries
pub fn parse(source: &str) -> MetaResult<Vec<Entry>> {
    let value: serde_json::Value = serde_json::from_str(source).map_err(|e| {
        let err = ConversionError::new(SourceFormat::Json, e.to_string(), source);
        match offset_of(source, e.line(), e.column()) {
            Some(offset) => err.with_span((offset, 0)),
            None => err,
        }
    })?;

    let serde_json::Value::Object(_) = value else {
        return Err(MetaError::UnsupportedStructure {
            format: SourceFormat::Json,
            help: format!(
                "the top level must be an object, found {}",
                kind_name(&value)
            ),
        });
    };

    let mut entries = Vec::new();
    flatten(&value, "", &mut entries);
    Ok(entries)
}

fn flatten(value: &serde_json::Value, prefix: &str, entries: &mut Vec<Entry>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                let key = key.to_lowercase();
                let full_key = if prefix.is_empty() {
                    key
                } else {
                    format!("{}_{}", prefix, key)
                };
                flatten(val, &full_key, entries);
            }
        }
        serde_json::Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(item, &format!("{}_{}", prefix, i), entries);
            }
        }
        scalar => {
            let Some(inferred) = infer_json(scalar) else {
                return;
            };
            if inferred.literal.is_empty() {
                tracing::debug!(key = prefix, "skipping empty JSON string");
                return;
            }
            entries.push(Entry::new(prefix, inferred));
        }
    }
}

fn kind_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(source: &str) -> Vec<String> {
        parse(source)
            .unwrap()
            .iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn test_nested_object() {
        assert_eq!(
            lines(r#"{"db": {"host": "localhost", "port": 5432}}"#),
            vec!["db_host:string localhost", "db_port:int 5432"]
        );
    }

    #[test]
    fn test_declared_key_order_is_kept() {
        assert_eq!(
            lines(r#"{"zeta": 1, "alpha": 2, "mid": {"b": true, "a": false}}"#),
            vec!["zeta:int 1", "alpha:int 2", "mid_b:bool true", "mid_a:bool false"]
        );
    }

    #[test]
    fn test_keys_are_lowercased() {
        assert_eq!(
            lines(r#"{"Server": {"MaxConnections": 100}}"#),
            vec!["server_maxconnections:int 100"]
        );
    }

    #[test]
    fn test_arrays_use_indexes() {
        assert_eq!(
            lines(r#"{"hosts": ["a", "b"], "users": [{"name": "root"}]}"#),
            vec![
                "hosts_0:string a",
                "hosts_1:string b",
                "users_0_name:string root",
            ]
        );
    }

    #[test]
    fn test_nested_arrays() {
        assert_eq!(
            lines(r#"{"grid": [[1, 2]]}"#),
            vec!["grid_0_0:int 1", "grid_0_1:int 2"]
        );
    }

    #[test]
    fn test_scalar_types() {
        assert_eq!(
            lines(r#"{"rate": 0.25, "secret": "$TOKEN", "port": "8080", "on": "TRUE", "none": null}"#),
            vec![
                "rate:float 0.25",
                "secret:env $TOKEN",
                "port:int 8080",
                "on:bool true",
                "none:string null",
            ]
        );
    }

    #[test]
    fn test_empty_containers_and_strings_produce_nothing() {
        assert_eq!(lines(r#"{"a": {}, "b": [], "c": ""}"#), Vec::<String>::new());
    }

    #[test]
    fn test_malformed_json() {
        let err = parse("{bad json").unwrap_err();
        match err {
            MetaError::Conversion(e) => {
                assert_eq!(e.format, SourceFormat::Json);
                assert!(!e.cause.is_empty());
                assert!(e.span.is_some());
            }
            other => panic!("expected conversion error, got {:?}", other),
        }
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = parse("[1, 2]").unwrap_err();
        assert!(matches!(
            err,
            MetaError::UnsupportedStructure {
                format: SourceFormat::Json,
                ..
            }
        ));
    }
}
