use std::{cmp::Ordering, collections::BTreeMap};

use rust_decimal::{Decimal, prelude::FromPrimitive};

/// A resource record: field names mapped to values.
///
/// Records mirror whatever the resource listing returned, so no schema is
/// assumed. Keys are kept sorted for deterministic output.
pub type Record = BTreeMap<String, Value>;

/// A value held by a resource record field.
///
/// Integers and floats are kept apart (JSON only has "number"), numeric
/// comparisons between the two go through [`Decimal`] so that `30 == 30.0`
/// holds exactly.
///
/// # Examples
///
/// ```
/// use resource_filter::{Record, Value};
///
/// let mut os_disk = Record::new();
/// os_disk.insert("os_type".to_string(), Value::String("Linux".to_string()));
///
/// let mut record = Record::new();
/// record.insert("instance_id".to_string(), Value::String("0".to_string()));
/// record.insert("os_disk".to_string(), Value::Object(os_disk));
///
/// let value = Value::Object(record);
/// assert_eq!(
///     value.lookup(&["os_disk", "os_type"]),
///     Some(&Value::String("Linux".to_string()))
/// );
/// assert_eq!(value.lookup(&["missing"]), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// Array of values
    Array(Vec<Value>),

    /// Nested mapping
    Object(Record),
}

impl Value {
    /// Follow a path of field names through nested objects.
    ///
    /// Returns `None` as soon as a segment is absent or the current value is
    /// not an object.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&Value> {
        let mut current = self;
        for segment in path {
            match current {
                Value::Object(map) => current = map.get(segment.as_ref())?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Integer(n) => Decimal::from_i64(*n),
            Value::Float(n) => Decimal::from_f64(*n),
            _ => None,
        }
    }

    /// Equality where integers and floats compare by numeric value.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(_), Value::Float(_)) | (Value::Float(_), Value::Integer(_)) => {
                match (self.as_decimal(), other.as_decimal()) {
                    (Some(a), Some(b)) => a == b,
                    _ => self.as_float() == other.as_float(),
                }
            }
            (a, b) => a == b,
        }
    }

    /// Ordering between two numbers or two strings.
    ///
    /// Any other pairing has no ordering and returns `None`.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (a, b) => match (a.as_decimal(), b.as_decimal()) {
                (Some(x), Some(y)) => Some(x.cmp(&y)),
                _ => a.as_float()?.partial_cmp(&b.as_float()?),
            },
        }
    }

    /// Human-readable type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(b),
            Value::Integer(i) => serde_json::Value::Number(i.into()),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

/// Convert a JSON object into a record.
///
/// Returns `None` for anything that is not a JSON object.
pub fn record_from_json(v: serde_json::Value) -> Option<Record> {
    match Value::from(v) {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Convert a record back into a JSON object.
pub fn record_to_json(record: &Record) -> serde_json::Value {
    serde_json::Value::from(Value::Object(record.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_float_equality() {
        assert!(Value::Integer(30).loose_eq(&Value::Float(30.0)));
        assert!(!Value::Integer(30).loose_eq(&Value::Float(30.5)));
        assert!(!Value::Integer(0).loose_eq(&Value::String("0".into())));
    }

    #[test]
    fn test_compare_mixed_types() {
        assert_eq!(
            Value::Integer(2).compare(&Value::Float(2.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::String("b".into()).compare(&Value::String("a".into())),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::String("1".into()).compare(&Value::Integer(1)), None);
        assert_eq!(Value::Null.compare(&Value::Null), None);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Integer(1).type_name(), "integer");
        assert_eq!(Value::Float(1.5).type_name(), "float");
        assert_eq!(Value::from("vm").type_name(), "string");
        assert_eq!(Value::Object(Record::new()).type_name(), "object");
    }

    #[test]
    fn test_lookup_through_non_object() {
        let value = Value::from(serde_json::json!({"tags": ["a", "b"]}));
        assert_eq!(value.lookup(&["tags", "0"]), None);
        assert_eq!(value.lookup::<&str>(&[]), Some(&value));
    }

    #[test]
    fn test_json_round_trip_keeps_number_kinds() {
        let json = serde_json::json!({"disk_size_gb": 100, "ratio": 0.5, "name": null});
        let record = record_from_json(json.clone()).unwrap();
        assert_eq!(record["disk_size_gb"], Value::Integer(100));
        assert_eq!(record["ratio"], Value::Float(0.5));
        assert_eq!(record_to_json(&record), json);
        assert!(record_from_json(serde_json::json!([1, 2])).is_none());
    }
}
