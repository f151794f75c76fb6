//! Dynamic structured values
//!
//! The codec decodes into (and encodes from) a self-describing tree of
//! scalars, ordered sequences and ordered field maps. Field maps keep
//! schema-declared order: `serde_json::Map` would silently reorder keys,
//! so objects are stored as ordered `(name, value)` pairs and serialized
//! with a hand-written `Serialize` impl. Tagged unions are represented as
//! two-element arrays `[member_type_name, value]`.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::Serialize;

/// A dynamically-typed structured value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent optional
    Null,
    Bool(bool),
    /// Signed integer scalar
    Int(i64),
    /// Unsigned integer scalar
    Uint(u64),
    Float(f64),
    String(String),
    /// Raw bytes; textual form is lowercase hex
    Bytes(Vec<u8>),
    /// Ordered sequence
    Array(Vec<Value>),
    /// Ordered field map (field name, value)
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Builds an object from ordered (name, value) pairs.
    pub fn object(fields: Vec<(impl Into<String>, Value)>) -> Self {
        Value::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint(u) => Some(*u),
            Value::Int(i) if *i >= 0 => Some(*i as u64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Uint(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::Uint(u) => Some(*u as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Looks up a field by name in an object value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_object()?
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Short name of the value's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Converts a `serde_json::Value` into a structured value.
    ///
    /// Unsigned integers are preferred over signed; object key order follows
    /// the JSON map's iteration order.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => {
                Value::Array(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Bytes(b) => serializer.serialize_str(&hex::encode(b)),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

/// Textual form: compact JSON with field order preserved.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_preserves_declared_order() {
        let value = Value::object(vec![
            ("zeta", Value::Uint(1)),
            ("alpha", Value::Uint(2)),
            ("mid", Value::Uint(3)),
        ]);
        assert_eq!(value.to_string(), r#"{"zeta":1,"alpha":2,"mid":3}"#);
    }

    #[test]
    fn test_bytes_render_as_hex() {
        let value = Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(value.to_string(), "\"deadbeef\"");
    }

    #[test]
    fn test_null_renders_as_null() {
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_get_field() {
        let value = Value::object(vec![("a", Value::Uint(1)), ("b", Value::Bool(true))]);
        assert_eq!(value.get("b"), Some(&Value::Bool(true)));
        assert_eq!(value.get("missing"), None);
    }

    #[test]
    fn test_from_json_scalars() {
        let json: serde_json::Value = serde_json::from_str(r#"[1, -2, 1.5, "x", true, null]"#).unwrap();
        let value = Value::from_json(&json);
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Uint(1),
                Value::Int(-2),
                Value::Float(1.5),
                Value::String("x".into()),
                Value::Bool(true),
                Value::Null,
            ])
        );
    }

    #[test]
    fn test_as_u64_accepts_nonnegative_int() {
        assert_eq!(Value::Int(5).as_u64(), Some(5));
        assert_eq!(Value::Int(-5).as_u64(), None);
        assert_eq!(Value::Uint(5).as_i64(), Some(5));
    }

    #[test]
    fn test_rendering_is_stable() {
        let value = Value::object(vec![
            ("items", Value::Array(vec![Value::Uint(1), Value::Uint(2)])),
            ("flag", Value::Bool(false)),
        ]);
        assert_eq!(value.to_string(), value.to_string());
    }
}
