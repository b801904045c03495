//! A closed JSON value model used for manifest and host-command data.
//!
//! [`JsonValue`] is a plain sum type: match on it, or use the `is_*` / `as_*`
//! helpers when only one kind matters. A mismatched `as_*` is not an error, it
//! simply yields `None`.
//!
//! Objects keep their members in insertion order, so serialized manifests and
//! commands are byte-for-byte deterministic.
//!
//! ```rust
//! use chrome_ext::json::{JsonObject, JsonValue, NULL};
//!
//! let mut obj = JsonObject::new();
//! obj.insert("a", 1);
//! obj.insert("b", true);
//! let v = JsonValue::from(obj);
//!
//! assert!(v.is_object());
//! assert!(v.as_array().is_none());
//! assert_eq!(v.to_string(), r#"{"a":1,"b":true}"#);
//! assert_eq!(NULL.to_string(), "null");
//! ```

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::{fmt, io};

/// Numbers are always finite; non-finite floats cannot be represented.
pub use serde_json::Number as JsonNumber;

/// The shared null value. Every access refers to the same static.
pub static NULL: JsonValue = JsonValue::Null;

#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Array(Vec<JsonValue>),
    Boolean(bool),
    Number(JsonNumber),
    Object(JsonObject),
    String(String),
}

/// Discriminant of a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Array,
    Boolean,
    Number,
    Object,
    String,
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JsonKind::Null => "null",
            JsonKind::Array => "array",
            JsonKind::Boolean => "boolean",
            JsonKind::Number => "number",
            JsonKind::Object => "object",
            JsonKind::String => "string",
        })
    }
}

impl JsonValue {
    /// Returns the shared [`NULL`] instance.
    #[inline]
    pub fn null() -> &'static JsonValue {
        &NULL
    }

    /// Builds a number value. Returns `None` for NaN and infinities.
    pub fn number(value: f64) -> Option<JsonValue> {
        JsonNumber::from_f64(value).map(JsonValue::Number)
    }

    pub fn kind(&self) -> JsonKind {
        match self {
            JsonValue::Null => JsonKind::Null,
            JsonValue::Array(_) => JsonKind::Array,
            JsonValue::Boolean(_) => JsonKind::Boolean,
            JsonValue::Number(_) => JsonKind::Number,
            JsonValue::Object(_) => JsonKind::Object,
            JsonValue::String(_) => JsonKind::String,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, JsonValue::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&JsonNumber> {
        match self {
            JsonValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Serialize as compact JSON text into `sink`.
    ///
    /// The only failure mode is the sink itself; every constructible value is
    /// valid JSON.
    pub fn write<W: io::Write>(&self, sink: W) -> io::Result<()> {
        serde_json::to_writer(sink, self).map_err(io::Error::from)
    }

    /// Like [`write`](Self::write), indented for humans.
    pub fn write_pretty<W: io::Write>(&self, sink: W) -> io::Result<()> {
        serde_json::to_writer_pretty(sink, self).map_err(io::Error::from)
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            JsonValue::Boolean(b) => serializer.serialize_bool(*b),
            JsonValue::Number(n) => n.serialize(serializer),
            JsonValue::Object(obj) => obj.serialize(serializer),
            JsonValue::String(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Object members in insertion order.
///
/// Re-inserting an existing key replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonObject {
    members: Vec<(String, JsonValue)>,
}

impl JsonObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a member, returning the previous value for `key`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> Option<JsonValue> {
        let key = key.into();
        let value = value.into();
        match self.members.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.members.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.members.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.members.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for JsonObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.members.len()))?;
        for (k, v) in &self.members {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<JsonValue>> FromIterator<(K, V)> for JsonObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = JsonObject::new();
        for (k, v) in iter {
            obj.insert(k, v);
        }
        obj
    }
}

impl<K: Into<String>, V: Into<JsonValue>> FromIterator<(K, V)> for JsonValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        JsonValue::Object(iter.into_iter().collect())
    }
}

impl FromIterator<JsonValue> for JsonValue {
    fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
        JsonValue::Array(iter.into_iter().collect())
    }
}

// -------- Conversions --------

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Boolean(b)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_owned())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for JsonValue {
                fn from(n: $t) -> Self {
                    JsonValue::Number(JsonNumber::from(n))
                }
            }
        )*
    };
}

from_integer!(u8, i32, u32, i64, u64);

impl From<JsonNumber> for JsonValue {
    fn from(n: JsonNumber) -> Self {
        JsonValue::Number(n)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(items: Vec<JsonValue>) -> Self {
        JsonValue::Array(items)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(obj: JsonObject) -> Self {
        JsonValue::Object(obj)
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(JsonValue::Null, Into::into)
    }
}

/// Bridges values produced by `serde_json`'s parser. Member order survives
/// because the crate enables `serde_json/preserve_order`.
impl From<serde_json::Value> for JsonValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Boolean(b),
            serde_json::Value::Number(n) => JsonValue::Number(n),
            serde_json::Value::String(s) => JsonValue::String(s),
            serde_json::Value::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| (k, JsonValue::from(v)))
                .collect(),
        }
    }
}
