//! Decoded response bodies and typed field access
//!
//! Reddit answers the comments endpoint with a two-element array and every
//! other endpoint with an object. [`Payload`] records which one arrived so
//! formatters match on it once instead of re-probing the JSON.
//!
//! [`Fields`] wraps a JSON object together with its path from the root, so a
//! missing or mistyped field is reported as e.g. `data.children[0].data.title`.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Sequence(Vec<Value>),
    Object(Map<String, Value>),
}

impl Payload {
    /// Decode a response body
    ///
    /// An array is tried first, then an object. Scalars and invalid JSON are
    /// errors.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        if let Ok(sequence) = serde_json::from_slice::<Vec<Value>>(body) {
            return Ok(Self::Sequence(sequence));
        }

        serde_json::from_slice::<Map<String, Value>>(body).map(Self::Object)
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            Self::Sequence(_) => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            Self::Object(_) => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Sequence(items) => Value::Array(items),
            Self::Object(map) => Value::Object(map),
        }
    }
}

/// A required field was absent or had the wrong JSON type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing or invalid field `{path}` (expected {expected})")]
pub struct DecodeError {
    pub path: String,
    pub expected: &'static str,
}

/// A JSON object plus the path that led to it
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> Fields<'a> {
    pub fn new(map: &'a Map<String, Value>, path: impl Into<String>) -> Self {
        Self {
            map,
            path: path.into(),
        }
    }

    /// View `value` as an object found at `path`
    pub fn from_value(value: &'a Value, path: impl Into<String>) -> Result<Self, DecodeError> {
        let path = path.into();
        match value.as_object() {
            Some(map) => Ok(Self::new(map, path)),
            None => Err(DecodeError {
                path,
                expected: "object",
            }),
        }
    }

    /// Descend into a nested object
    pub fn nested(&self, key: &str) -> Result<Fields<'a>, DecodeError> {
        let map = self.object(key)?;
        Ok(Fields::new(map, self.key_path(key)))
    }

    /// Path of a key inside this object
    pub fn key_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    fn missing(&self, key: &str, expected: &'static str) -> DecodeError {
        DecodeError {
            path: self.key_path(key),
            expected,
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key)
    }

    pub fn object(&self, key: &str) -> Result<&'a Map<String, Value>, DecodeError> {
        self.get(key)
            .and_then(Value::as_object)
            .ok_or_else(|| self.missing(key, "object"))
    }

    pub fn array(&self, key: &str) -> Result<&'a [Value], DecodeError> {
        self.get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| self.missing(key, "array"))
    }

    pub fn str(&self, key: &str) -> Result<&'a str, DecodeError> {
        self.get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| self.missing(key, "string"))
    }

    /// Any JSON number, truncated toward zero
    pub fn int(&self, key: &str) -> Result<i64, DecodeError> {
        self.get(key)
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f.trunc() as i64)))
            .ok_or_else(|| self.missing(key, "number"))
    }

    pub fn float(&self, key: &str) -> Result<f64, DecodeError> {
        self.get(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| self.missing(key, "number"))
    }

    /// A string field that is present and non-empty
    pub fn optional_str(&self, key: &str) -> Option<&'a str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_prefers_sequence() {
        let payload = Payload::from_slice(br#"[{"kind":"Listing"},{"kind":"Listing"}]"#).unwrap();
        assert_eq!(payload.as_sequence().map(<[Value]>::len), Some(2));
        assert!(payload.as_object().is_none());
    }

    #[test]
    fn test_payload_falls_back_to_object() {
        let payload = Payload::from_slice(br#"{"kind":"Listing","data":{}}"#).unwrap();
        assert!(payload.as_object().is_some());
        assert!(payload.as_sequence().is_none());
    }

    #[test]
    fn test_payload_rejects_scalars_and_garbage() {
        assert!(Payload::from_slice(b"42").is_err());
        assert!(Payload::from_slice(b"\"text\"").is_err());
        assert!(Payload::from_slice(b"<html>blocked</html>").is_err());
        assert!(Payload::from_slice(b"").is_err());
    }

    #[test]
    fn test_payload_into_value() {
        let payload = Payload::from_slice(br#"{"a":1}"#).unwrap();
        assert_eq!(payload.into_value(), json!({ "a": 1 }));
    }

    #[test]
    fn test_fields_report_full_path() {
        let value = json!({ "title": "Hello", "score": 12.7 });
        let fields = Fields::from_value(&value, "data.children[0].data").unwrap();

        assert_eq!(fields.str("title").unwrap(), "Hello");
        assert_eq!(fields.int("score").unwrap(), 12);

        let err = fields.str("author").unwrap_err();
        assert_eq!(err.path, "data.children[0].data.author");
        assert_eq!(
            err.to_string(),
            "missing or invalid field `data.children[0].data.author` (expected string)"
        );

        let err = fields.int("title").unwrap_err();
        assert_eq!(err.expected, "number");
    }

    #[test]
    fn test_fields_root_path() {
        let value = json!({ "data": [] });
        let fields = Fields::from_value(&value, "").unwrap();
        let err = fields.object("data").unwrap_err();
        assert_eq!(err.path, "data");
    }

    #[test]
    fn test_fields_from_non_object() {
        let value = json!("t3");
        let err = Fields::from_value(&value, "data.children[3]").unwrap_err();
        assert_eq!(err.expected, "object");
    }

    #[test]
    fn test_optional_str_skips_empty() {
        let value = json!({ "selftext": "", "url": "https://example.com" });
        let fields = Fields::from_value(&value, "").unwrap();
        assert_eq!(fields.optional_str("selftext"), None);
        assert_eq!(fields.optional_str("missing"), None);
        assert_eq!(fields.optional_str("url"), Some("https://example.com"));
    }
}
