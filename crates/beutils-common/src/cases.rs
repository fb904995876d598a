//! camelCase / snake_case conversion for JSON payloads
//!
//! The server speaks snake_case; clients may negotiate camelCase responses.
//! Conversion applies to object keys only, never to values.

use std::sync::LazyLock;

use serde_json::{Map, Value};

/// Uppercase letter followed by lowercase letters or digits marks a word
/// boundary in a camelCase identifier.
static CAMEL_BOUNDARY: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new("([A-Z])([a-z0-9]+)").expect("Invalid regex pattern"));

/// Transform a snake_case string into a camelCase string
pub fn camelize(input: &str) -> String {
    input
        .split('_')
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                word.to_lowercase()
            } else {
                title_word(word)
            }
        })
        .collect()
}

/// Transform a camelCase string into a snake_case string
pub fn snakeify(input: &str) -> String {
    CAMEL_BOUNDARY.replace_all(input, "_${1}${2}").to_lowercase()
}

/// Capitalize every alphabetic run in a word, lowercase the rest
fn title_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_alpha = false;
    for ch in word.chars() {
        if ch.is_alphabetic() && !prev_alpha {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        prev_alpha = ch.is_alphabetic();
    }
    out
}

/// Convert the keys of a JSON payload to camelCase
pub fn camelize_value(value: &Value) -> Value {
    convert_keys(value, &camelize)
}

/// Convert the keys of a JSON payload to snake_case
pub fn snakeify_value(value: &Value) -> Value {
    convert_keys(value, &snakeify)
}

/// Recursively convert object keys with `convert`.
///
/// Objects are converted at every depth. Array elements are converted only
/// when they are objects themselves; arrays nested directly inside arrays are
/// passed through untouched.
fn convert_keys(value: &Value, convert: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::Object(_) => convert_keys(item, convert),
                    other => other.clone(),
                })
                .collect(),
        ),
        Value::Object(entries) => {
            let mut out = Map::with_capacity(entries.len());
            for (key, val) in entries {
                let key = convert(key);
                match val {
                    Value::Object(_) => {
                        out.insert(key, convert_keys(val, convert));
                    }
                    Value::Array(items) => {
                        let items = items
                            .iter()
                            .map(|item| match item {
                                Value::Object(_) => convert_keys(item, convert),
                                other => other.clone(),
                            })
                            .collect();
                        out.insert(key, Value::Array(items));
                    }
                    other => {
                        out.insert(key, other.clone());
                    }
                }
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_camelize_string() {
        assert_eq!(camelize("first_name"), "firstName");
        assert_eq!(camelize("telegram_user_id"), "telegramUserId");
        assert_eq!(camelize("name"), "name");
        assert_eq!(camelize(""), "");
    }

    #[test]
    fn test_snakeify_string() {
        assert_eq!(snakeify("firstName"), "first_name");
        assert_eq!(snakeify("telegramUserId"), "telegram_user_id");
        assert_eq!(snakeify("name"), "name");
        assert_eq!(snakeify("HTTPServer"), "http_server");
    }

    #[test]
    fn test_camelize_value_nested() {
        let input = json!({
            "first_name": "Ada",
            "home_city": {"city_name": "London", "country_name": "United Kingdom"},
            "known_emails": ["ada@example.com"],
            "memberships": [{"joined_at": "2021-01-01", "is_active": true}],
        });
        let expected = json!({
            "firstName": "Ada",
            "homeCity": {"cityName": "London", "countryName": "United Kingdom"},
            "knownEmails": ["ada@example.com"],
            "memberships": [{"joinedAt": "2021-01-01", "isActive": true}],
        });
        assert_eq!(camelize_value(&input), expected);
    }

    #[test]
    fn test_snakeify_value_top_level_array() {
        let input = json!([{"pageNumber": 1}, "plain", 7]);
        let expected = json!([{"page_number": 1}, "plain", 7]);
        assert_eq!(snakeify_value(&input), expected);
    }

    #[test]
    fn test_arrays_inside_arrays_are_not_entered() {
        let input = json!({"rows": [[{"innerKey": 1}]]});
        // The nested array is passed through untouched.
        assert_eq!(snakeify_value(&input), json!({"rows": [[{"innerKey": 1}]]}));
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(camelize_value(&json!(null)), json!(null));
        assert_eq!(camelize_value(&json!(42)), json!(42));
        assert_eq!(camelize_value(&json!("snake_case")), json!("snake_case"));
    }

    proptest! {
        /// Lowercase words joined by underscores survive a camelize/snakeify
        /// round trip unchanged. Words after the first need two letters: a
        /// single trailing capital has no boundary to split on, matching the
        /// conversion rule.
        #[test]
        fn prop_snake_round_trip(key in "[a-z]{1,8}(_[a-z]{2,8}){0,4}") {
            prop_assert_eq!(snakeify(&camelize(&key)), key);
        }
    }
}
