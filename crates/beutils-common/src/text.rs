//! Text normalization and small file helpers

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

/// Return a slugified version of a string input.
///
/// Slugs here are normalized lookup keys: transliterated to ASCII,
/// lowercased, and trimmed. Whitespace inside the string is preserved.
pub fn slugify(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    deunicode::deunicode(input).to_lowercase().trim().to_string()
}

/// Read a JSON object from a file path, `None` when the file is missing
/// or does not parse.
pub fn read_json(path: impl AsRef<Path>) -> Option<Value> {
    let file = File::open(path).ok()?;
    serde_json::from_reader(BufReader::new(file)).ok()
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("São Tomé"), "sao tome");
        assert_eq!(slugify("  Côte d'Ivoire "), "cote d'ivoire");
        assert_eq!(slugify("United Kingdom"), "united kingdom");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        let once = slugify("Curaçao");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn test_read_json_missing_file() {
        assert!(read_json("/nonexistent/fixtures/fiat.json").is_none());
    }

    #[test]
    fn test_read_json_round_trip() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"code": "USD", "number": 840}}"#).expect("write");
        let value = read_json(file.path()).expect("parsed");
        assert_eq!(value["code"], "USD");
        assert_eq!(value["number"], 840);
    }
}
