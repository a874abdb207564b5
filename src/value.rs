//! Owned, dynamically typed snapshot of a document.
//!
//! The [`JsonSerializer`](crate::JsonSerializer) keeps its tree in an arena
//! and exposes it through a cursor. [`Value`] is the detached counterpart: a
//! plain recursive enum that can be exported with
//! [`JsonSerializer::to_value`](crate::JsonSerializer::to_value), inspected or
//! edited freely, and loaded back with
//! [`JsonSerializer::from_value`](crate::JsonSerializer::from_value).
//!
//! `Value` implements `serde::Serialize` and `serde::Deserialize`, so a
//! snapshot can be handed to any serde data format.
//!
//! ## Examples
//!
//! ```rust
//! use versioned_json::{JsonSerializer, Serializer, Value};
//!
//! let mut serializer = JsonSerializer::new();
//! serializer.set_entry("player", 3).unwrap();
//! serializer.set_string("name", "Memingo").unwrap();
//! serializer.close_entry().unwrap();
//!
//! let snapshot = serializer.to_value();
//! let player = snapshot.as_object().and_then(|o| o.get("player")).unwrap();
//! assert_eq!(player.version(), Some(3));
//! assert_eq!(player.as_object().and_then(|o| o.get("name")), Some(&Value::from("Memingo")));
//! ```

use crate::{ValueMap, VERSION_KEY};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Any value that can live in a document.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(ValueMap),
}

/// A numeric leaf.
///
/// Integers are kept in a canonical form: negative values are `Int`,
/// non-negative values are `Uint`. This is the only information JSON text
/// preserves, so the fixed-width accessors (`i32`, `u32`, `i64`, `u64`) are
/// answered by range checks against it.
///
/// # Examples
///
/// ```rust
/// use versioned_json::Number;
///
/// assert_eq!(Number::from(-5i32), Number::Int(-5));
/// assert_eq!(Number::from(5i64), Number::Uint(5));
/// assert_eq!(Number::Uint(5).as_i32(), Some(5));
/// assert_eq!(Number::Int(-5).as_u32(), None);
/// assert_eq!(Number::Float(2.5).as_i64(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Int(_) | Number::Uint(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::Int(i) => Some(i),
            Number::Uint(u) => i64::try_from(u).ok(),
            Number::Float(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Number::Uint(u) => Some(u),
            Number::Int(_) | Number::Float(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        self.as_i64().and_then(|i| i32::try_from(i).ok())
    }

    #[inline]
    #[must_use]
    pub fn as_u32(&self) -> Option<u32> {
        self.as_u64().and_then(|u| u32::try_from(u).ok())
    }

    /// Returns the value of a `Float`. Integers are not converted.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Number::Float(f) => Some(f),
            Number::Int(_) | Number::Uint(_) => None,
        }
    }

    /// Short type name used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Number::Int(_) | Number::Uint(_) => "integer",
            Number::Float(_) => "double",
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Uint(u) => write!(f, "{}", u),
            Number::Float(fl) => f.write_str(&crate::ser::format_f64(*fl)),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        if value < 0 {
            Number::Int(value)
        } else {
            Number::Uint(value as u64)
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::from(i64::from(value))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number::Uint(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Uint(u64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ValueMap> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Returns the version tag if this value is an entry object.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use versioned_json::value;
    ///
    /// assert_eq!(value!({ "__VERSION__": 7, "x": 1 }).version(), Some(7));
    /// assert_eq!(value!({ "x": 1 }).version(), None);
    /// ```
    #[must_use]
    pub fn version(&self) -> Option<u64> {
        self.as_object()
            .and_then(|obj| obj.get(VERSION_KEY))
            .and_then(Value::as_u64)
    }

    /// Short type name used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(n) => n.kind(),
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

/// Formats the value as compact JSON text, non-finite doubles included.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => {
                let mut quoted = String::with_capacity(s.len() + 2);
                crate::ser::write_escaped(&mut quoted, s);
                f.write_str(&quoted)
            }
            Value::Array(arr) => {
                f.write_str("[")?;
                for (i, element) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str("]")
            }
            Value::Object(obj) => {
                f.write_str("{")?;
                for (i, (key, member)) in obj.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    let mut quoted = String::with_capacity(key.len() + 2);
                    crate::ser::write_escaped(&mut quoted, key);
                    write!(f, "{}:{}", quoted, member)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Int(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Uint(u)) => serializer.serialize_u64(*u),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::from(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Uint(value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = ValueMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| crate::Error::type_mismatch("int64", value.kind()))
    }
}

impl TryFrom<Value> for u64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_u64()
            .ok_or_else(|| crate::Error::type_mismatch("uint64", value.kind()))
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| crate::Error::type_mismatch("double", value.kind()))
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| crate::Error::type_mismatch("bool", value.kind()))
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(crate::Error::type_mismatch("string", other.kind())),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(Number::Uint(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_ranges() {
        let big = Number::Uint(u64::MAX);
        assert_eq!(big.as_u64(), Some(u64::MAX));
        assert_eq!(big.as_i64(), None);
        assert_eq!(big.as_u32(), None);

        let small = Number::Int(i64::from(i32::MIN));
        assert_eq!(small.as_i32(), Some(i32::MIN));
        assert_eq!(small.as_u64(), None);

        let past_i32 = Number::Int(i64::from(i32::MIN) - 1);
        assert_eq!(past_i32.as_i32(), None);
        assert_eq!(past_i32.as_i64(), Some(i64::from(i32::MIN) - 1));
    }

    #[test]
    fn test_float_is_never_integer() {
        let f = Number::Float(42.0);
        assert!(f.is_float());
        assert_eq!(f.as_i64(), None);
        assert_eq!(f.as_f64(), Some(42.0));
        assert_eq!(Number::Uint(42).as_f64(), None);
    }

    #[test]
    fn test_tryfrom() {
        assert_eq!(i64::try_from(Value::from(-3)).unwrap(), -3);
        assert_eq!(u64::try_from(Value::from(3u64)).unwrap(), 3);
        assert!(u64::try_from(Value::from(-3)).is_err());
        assert!(bool::try_from(Value::from(1)).is_err());
        assert_eq!(String::try_from(Value::from("s")).unwrap(), "s");

        let err = f64::try_from(Value::from("x")).unwrap_err();
        assert_eq!(err, crate::Error::type_mismatch("double", "string"));
    }

    #[test]
    fn test_display_is_compact_json() {
        let mut obj = ValueMap::new();
        obj.insert("a".to_string(), Value::from(vec![Value::from(1), Value::Null]));
        obj.insert("b\"".to_string(), Value::from(f64::NEG_INFINITY));
        assert_eq!(
            Value::Object(obj).to_string(),
            r#"{"a":[1,null],"b\"":-Infinity}"#
        );
        assert_eq!(Value::from(0.5).to_string(), "0.5");
        assert_eq!(Value::from(2.0).to_string(), "2.0");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}
