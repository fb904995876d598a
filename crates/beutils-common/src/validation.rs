//! Interface validation for adapter payloads
//!
//! External APIs return loosely shaped JSON; adapters declare the fields they
//! rely on as an `Interface` and validate every item against it before use.
//! Failures are descriptive `BeutilsError::Validation` messages rather than a
//! structured taxonomy.

use serde_json::Value;

use crate::BeutilsError;

/// JSON value kinds an interface field may accept
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Kind of a JSON value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

/// Expectation for a single interface field
pub struct FieldSpec {
    kinds: Vec<ValueKind>,
    required: bool,
    validator: Option<fn(&Value) -> bool>,
}

impl FieldSpec {
    pub fn new(kinds: &[ValueKind]) -> Self {
        Self {
            kinds: kinds.to_vec(),
            required: true,
            validator: None,
        }
    }

    /// Allow nullish values for this field
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Attach a custom validator run after the kind check
    pub fn with_validator(mut self, validator: fn(&Value) -> bool) -> Self {
        self.validator = Some(validator);
        self
    }
}

/// Ordered set of field expectations
#[derive(Default)]
pub struct Interface {
    fields: Vec<(String, FieldSpec)>,
}

impl Interface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, spec: FieldSpec) -> Self {
        self.fields.push((name.to_string(), spec));
        self
    }
}

/// Validate a set of JSON items against an interface.
///
/// `label` names the payload in error messages, e.g. the adapter endpoint.
pub fn validate_items(
    label: &str,
    items: &[Value],
    interface: &Interface,
) -> Result<(), BeutilsError> {
    for item in items {
        let Some(entries) = item.as_object() else {
            return Err(BeutilsError::validation(format!(
                "{label} items must be objects"
            )));
        };

        for (key, spec) in &interface.fields {
            let kind_names: Vec<&str> = spec.kinds.iter().map(ValueKind::name).collect();

            let Some(value) = entries.get(key) else {
                return Err(BeutilsError::validation(format!(
                    "{label} missing {key} of type {kind_names:?}"
                )));
            };

            // `false` is a valid value for a required bool field
            if spec.required && is_nullish(value) {
                return Err(BeutilsError::validation(format!(
                    "{label} value for {key} cannot be nullish"
                )));
            }

            if !spec.kinds.contains(&ValueKind::of(value)) {
                return Err(BeutilsError::validation(format!(
                    "{label} {key} is not of type {kind_names:?}"
                )));
            }

            if let Some(validator) = spec.validator
                && !validator(value)
            {
                return Err(BeutilsError::validation(format!(
                    "{label} {key} is not valid: {value}"
                )));
            }
        }
    }

    Ok(())
}

fn is_nullish(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(_) => false,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn ticker_interface() -> Interface {
        Interface::new()
            .field("symbol", FieldSpec::new(&[ValueKind::String]))
            .field(
                "price",
                FieldSpec::new(&[ValueKind::Number]).with_validator(|v| {
                    v.as_f64().is_some_and(|p| p > 0.0)
                }),
            )
            .field(
                "volume",
                FieldSpec::new(&[ValueKind::Number, ValueKind::Null]).optional(),
            )
    }

    #[test]
    fn test_valid_items_pass() {
        let items = [json!({"symbol": "BTC", "price": 1.5, "volume": null})];
        assert!(validate_items("ticker", &items, &ticker_interface()).is_ok());
    }

    #[test]
    fn test_missing_key() {
        let items = [json!({"symbol": "BTC", "volume": 2})];
        let err = validate_items("ticker", &items, &ticker_interface()).unwrap_err();
        assert!(err.to_string().contains("ticker missing price"));
    }

    #[test]
    fn test_nullish_required_value() {
        let items = [json!({"symbol": "", "price": 1.0, "volume": 2})];
        let err = validate_items("ticker", &items, &ticker_interface()).unwrap_err();
        assert!(
            err.to_string()
                .contains("ticker value for symbol cannot be nullish")
        );
    }

    #[test]
    fn test_false_is_not_nullish() {
        let interface = Interface::new().field("active", FieldSpec::new(&[ValueKind::Bool]));
        let items = [json!({"active": false})];
        assert!(validate_items("flags", &items, &interface).is_ok());
    }

    #[test]
    fn test_wrong_kind() {
        let items = [json!({"symbol": "BTC", "price": "1.5"})];
        let err = validate_items("ticker", &items, &ticker_interface()).unwrap_err();
        assert!(err.to_string().contains("ticker price is not of type"));
    }

    #[test]
    fn test_custom_validator() {
        let items = [json!({"symbol": "BTC", "price": -3.0})];
        let err = validate_items("ticker", &items, &ticker_interface()).unwrap_err();
        assert!(err.to_string().contains("ticker price is not valid: -3.0"));
    }

    #[test]
    fn test_non_object_item() {
        let items = [json!("not an object")];
        let err = validate_items("ticker", &items, &ticker_interface()).unwrap_err();
        assert!(err.to_string().contains("ticker items must be objects"));
    }
}
