//! .env importer
//!
//! Reads `KEY=value` lines. Keys are lowercased, one layer of quotes is
//! stripped from values, and comment, blank and malformed lines are skipped.

use super::infer::{infer_literal, strip_quotes, Entry};

/// Convert .env text into declaration entries
pub fn parse(source: &str) -> Vec<Entry> {
    let mut entries = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            tracing::trace!(line = idx + 1, "skipping .env line without '='");
            continue;
        };

        let key = key.trim().to_lowercase();
        let value = strip_quotes(value.trim());

        if key.is_empty() || value.is_empty() {
            tracing::debug!(line = idx + 1, %key, "skipping .env line with empty key or value");
            continue;
        }

        entries.push(Entry::new(key, infer_literal(value)));
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::ValueType;
    use pretty_assertions::assert_eq;

    fn lines(source: &str) -> Vec<String> {
        parse(source).iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_basic_types() {
        let source = "DEBUG=true\nPORT=3000\nRATE=0.5\nNAME=\"My App\"\nTOKEN=$SECRET\n";
        assert_eq!(
            lines(source),
            vec![
                "debug:bool true",
                "port:int 3000",
                "rate:float 0.5",
                "name:string My App",
                "token:env $SECRET",
            ]
        );
    }

    #[test]
    fn test_splits_on_first_equals() {
        let entries = parse("DATABASE_URL=postgres://u:p@h/db?sslmode=require");
        assert_eq!(entries[0].key, "database_url");
        assert_eq!(
            entries[0].value.literal,
            "postgres://u:p@h/db?sslmode=require"
        );
        assert_eq!(entries[0].value.value_type, ValueType::String);
    }

    #[test]
    fn test_skips_comments_blank_and_malformed() {
        let source = "# comment\n\n   \nNOT AN ASSIGNMENT\nA=1\n  # indented comment\n";
        assert_eq!(lines(source), vec!["a:int 1"]);
    }

    #[test]
    fn test_single_quotes_and_uppercase_bool() {
        assert_eq!(
            lines("GREETING='hello world'\nENABLED=FALSE"),
            vec!["greeting:string hello world", "enabled:bool false"]
        );
    }

    #[test]
    fn test_quoted_number_is_still_inferred() {
        assert_eq!(lines("PORT=\"8080\""), vec!["port:int 8080"]);
    }

    #[test]
    fn test_braced_reference_is_env() {
        assert_eq!(lines("HOME_DIR=${HOME}/app"), vec!["home_dir:env ${HOME}/app"]);
    }

    #[test]
    fn test_spaces_around_equals() {
        assert_eq!(lines("LOG_LEVEL = info"), vec!["log_level:string info"]);
    }

    #[test]
    fn test_empty_value_is_skipped() {
        assert_eq!(lines("EMPTY=\nQUOTED_EMPTY=\"\"\nB=2"), vec!["b:int 2"]);
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(lines("A=1\r\nB=yes\r\n"), vec!["a:int 1", "b:string yes"]);
    }
}
