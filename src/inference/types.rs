//! Value kinds observed in documents

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single semi-structured record: field name to value, in document order
pub type Document = Map<String, Value>;

/// Key of the single-entry object that wraps a date value
pub const DATE_KEY: &str = "$date";

/// Kind of a JSON value as seen by the explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    /// Null (or an absent field)
    Null,
    /// Boolean
    Boolean,
    /// Whole number representable as i64 or u64
    Integer,
    /// Any other number
    Float,
    /// String
    String,
    /// Date-wrapper object `{"$date": "..."}`
    Date,
    /// Nested object that is not a date-wrapper
    Document,
    /// Array (not handled by any collator)
    Array,
}

impl ValueKind {
    /// Classify a JSON value
    pub fn of(value: &Value) -> ValueKind {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    ValueKind::Integer
                } else {
                    ValueKind::Float
                }
            }
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(obj) => {
                if is_date_wrapper(obj) {
                    ValueKind::Date
                } else {
                    ValueKind::Document
                }
            }
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Date => "date",
            ValueKind::Document => "document",
            ValueKind::Array => "array",
        }
    }

    /// Whether a collator exists for values of this kind
    pub fn is_collatable(&self) -> bool {
        matches!(
            self,
            ValueKind::Boolean
                | ValueKind::Integer
                | ValueKind::Float
                | ValueKind::String
                | ValueKind::Date
        )
    }

    /// Whether `value` is expected for a field of this kind.
    ///
    /// Null always conforms. Otherwise the value's kind must equal this kind
    /// exactly, so an integer in a float field is unexpected and vice versa.
    pub fn accepts(&self, value: &Value) -> bool {
        value.is_null() || ValueKind::of(value) == *self
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// True when the object is exactly `{"$date": ...}`
pub fn is_date_wrapper(obj: &Map<String, Value>) -> bool {
    obj.len() == 1 && obj.contains_key(DATE_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_of_scalars() {
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Boolean);
        assert_eq!(ValueKind::of(&json!(42)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(u64::MAX)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(4.5)), ValueKind::Float);
        assert_eq!(ValueKind::of(&json!("x")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([1, 2])), ValueKind::Array);
    }

    #[test]
    fn test_kind_of_objects() {
        assert_eq!(
            ValueKind::of(&json!({"$date": "2021-01-05T10:00:00"})),
            ValueKind::Date
        );
        assert_eq!(
            ValueKind::of(&json!({"$date": "2021-01-05", "tz": "UTC"})),
            ValueKind::Document
        );
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Document);
    }

    #[test]
    fn test_accepts() {
        assert!(ValueKind::Integer.accepts(&json!(null)));
        assert!(ValueKind::Integer.accepts(&json!(3)));
        assert!(!ValueKind::Integer.accepts(&json!(3.5)));
        assert!(!ValueKind::Float.accepts(&json!(3)));
        assert!(!ValueKind::Integer.accepts(&json!(true)));
        assert!(!ValueKind::Date.accepts(&json!({"when": "today"})));
    }

    #[test]
    fn test_collatable() {
        assert!(ValueKind::Date.is_collatable());
        assert!(!ValueKind::Document.is_collatable());
        assert!(!ValueKind::Array.is_collatable());
        assert!(!ValueKind::Null.is_collatable());
    }
}
