//! Dynamic value representation for query data.
//!
//! This module provides the [`QueryValue`] enum, the "serializable value" the
//! codec works on: scalars, arrays and string-keyed objects.
//!
//! ## Core Types
//!
//! - [`QueryValue`]: null, bool, number, string, array or object
//! - [`Number`]: integers, floats, big integers and the JavaScript special values
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_urlquery::{query, QueryValue};
//!
//! let text = QueryValue::from("hello");
//! let number = QueryValue::from(42);
//!
//! let obj = query!({
//!     "name": "Alice",
//!     "tags": ["a", "b"]
//! });
//! assert!(obj.is_object());
//! ```
//!
//! ### Text Rendering
//!
//! Scalars render the way a browser stringifies them before encoding, which
//! is also what [`serialize`](crate::serialize) writes after the `=`:
//!
//! ```rust
//! use serde_urlquery::{query, QueryValue};
//!
//! assert_eq!(QueryValue::from(1.0).to_string(), "1");
//! assert_eq!(QueryValue::Null.to_string(), "");
//! assert_eq!(query!(["a", ["b", "c"]]).to_string(), "a,b,c");
//! ```

use crate::QueryMap;
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed representation of query data.
///
/// `Null` stands for both a missing and an explicitly null value; it
/// serializes as an empty value (`key=`).
///
/// # Examples
///
/// ```rust
/// use serde_urlquery::{QueryValue, Number};
///
/// let null = QueryValue::Null;
/// let num = QueryValue::Number(Number::Integer(42));
/// let text = QueryValue::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum QueryValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<QueryValue>),
    Object(QueryMap),
}

/// A numeric value.
///
/// Integers beyond `i64` are kept exactly as [`Number::BigInt`]; query strings
/// are text, so nothing is lost on the way out.
///
/// # Examples
///
/// ```rust
/// use serde_urlquery::Number;
///
/// assert_eq!(Number::Integer(42).to_string(), "42");
/// assert_eq!(Number::Float(2.5).to_string(), "2.5");
/// assert_eq!(Number::Float(-0.0).to_string(), "0");
/// assert_eq!(Number::Infinity.to_string(), "Infinity");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    BigInt(BigInt),
    Infinity,
    NegativeInfinity,
    NaN,
}

impl Number {
    /// Converts this number to an `i64` if it is integral and in range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_urlquery::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// assert_eq!(Number::NaN.as_i64(), None);
    /// ```
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            Number::BigInt(bi) => i64::try_from(bi).ok(),
            _ => None,
        }
    }

    /// Converts this number to an `f64`, possibly losing precision.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
            Number::BigInt(bi) => bi.to_string().parse().unwrap_or(f64::NAN),
            Number::Infinity => f64::INFINITY,
            Number::NegativeInfinity => f64::NEG_INFINITY,
            Number::NaN => f64::NAN,
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Number::Integer(i) => *i == 0,
            Number::Float(f) => *f == 0.0,
            _ => false,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) if fl.is_nan() => write!(f, "NaN"),
            Number::Float(fl) if fl.is_infinite() => {
                write!(f, "{}", if *fl > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // -0 prints as 0
            Number::Float(fl) if *fl == 0.0 => write!(f, "0"),
            Number::Float(fl) => write!(f, "{}", fl),
            Number::BigInt(bi) => write!(f, "{}", bi),
            Number::Infinity => write!(f, "Infinity"),
            Number::NegativeInfinity => write!(f, "-Infinity"),
            Number::NaN => write!(f, "NaN"),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::BigInt(BigInt::from(value)),
        }
    }
}

impl From<i128> for Number {
    fn from(value: i128) -> Self {
        match i64::try_from(value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::BigInt(BigInt::from(value)),
        }
    }
}

impl From<u128> for Number {
    fn from(value: u128) -> Self {
        match i64::try_from(value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::BigInt(BigInt::from(value)),
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl QueryValue {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, QueryValue::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, QueryValue::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, QueryValue::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, QueryValue::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, QueryValue::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, QueryValue::Object(_))
    }

    /// Returns `true` for arrays and objects, the values that expand into
    /// more than one bracketed key.
    #[inline]
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, QueryValue::Array(_) | QueryValue::Object(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            QueryValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_urlquery::QueryValue;
    ///
    /// assert_eq!(QueryValue::from("hello").as_str(), Some("hello"));
    /// assert_eq!(QueryValue::from(42).as_str(), None);
    /// ```
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integral number, returns it as `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            QueryValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it.
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<QueryValue>> {
        match self {
            QueryValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it.
    #[must_use]
    pub fn as_object(&self) -> Option<&QueryMap> {
        match self {
            QueryValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// JavaScript falsiness: null, `false`, `""`, `0` and NaN.
    pub(crate) fn is_falsy(&self) -> bool {
        match self {
            QueryValue::Null => true,
            QueryValue::Bool(b) => !b,
            QueryValue::String(s) => s.is_empty(),
            QueryValue::Number(n) => n.is_zero() || n.as_f64().is_nan(),
            _ => false,
        }
    }

    /// A short name of the variant, used in error messages.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            QueryValue::Null => "null",
            QueryValue::Bool(_) => "bool",
            QueryValue::Number(_) => "number",
            QueryValue::String(_) => "string",
            QueryValue::Array(_) => "array",
            QueryValue::Object(_) => "object",
        }
    }

    fn fmt_array_item(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Null => Ok(()),
            other => write!(f, "{}", other),
        }
    }
}

/// Renders the text a browser would produce for the value: `Null` is empty,
/// arrays are comma-joined (nested arrays flattened) and objects become
/// `[object Object]`.
impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Null => Ok(()),
            QueryValue::Bool(b) => write!(f, "{}", b),
            QueryValue::Number(n) => write!(f, "{}", n),
            QueryValue::String(s) => f.write_str(s),
            QueryValue::Array(arr) => {
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    item.fmt_array_item(f)?;
                }
                Ok(())
            }
            QueryValue::Object(_) => f.write_str("[object Object]"),
        }
    }
}

impl Serialize for QueryValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            QueryValue::Null => serializer.serialize_unit(),
            QueryValue::Bool(b) => serializer.serialize_bool(*b),
            QueryValue::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            QueryValue::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            QueryValue::Number(Number::BigInt(bi)) => serializer.serialize_str(&bi.to_string()),
            QueryValue::Number(Number::Infinity) => serializer.serialize_f64(f64::INFINITY),
            QueryValue::Number(Number::NegativeInfinity) => {
                serializer.serialize_f64(f64::NEG_INFINITY)
            }
            QueryValue::Number(Number::NaN) => serializer.serialize_f64(f64::NAN),
            QueryValue::String(s) => serializer.serialize_str(s),
            QueryValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            QueryValue::Object(obj) => {
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

impl<'de> Deserialize<'de> for QueryValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct QueryValueVisitor;

        impl<'de> Visitor<'de> for QueryValueVisitor {
            type Value = QueryValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any query value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(QueryValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(QueryValue::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(QueryValue::Number(Number::from(value)))
            }

            fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E> {
                Ok(QueryValue::Number(Number::from(value)))
            }

            fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E> {
                Ok(QueryValue::Number(Number::from(value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(QueryValue::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(QueryValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(QueryValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(QueryValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(QueryValue::Null)
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
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(QueryValue::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = QueryMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(QueryValue::Object(values))
            }
        }

        deserializer.deserialize_any(QueryValueVisitor)
    }
}

// Decoded query values are strings, so the numeric extractors parse them.
impl TryFrom<QueryValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: QueryValue) -> crate::Result<Self> {
        match value {
            QueryValue::Number(n) => n.as_i64().ok_or_else(|| {
                crate::Error::custom(format!("cannot convert {} to i64", n))
            }),
            QueryValue::String(s) => s
                .trim()
                .parse()
                .map_err(|_| crate::Error::invalid_number(&s, "i64")),
            other => Err(crate::Error::type_mismatch("integer", other.kind())),
        }
    }
}

impl TryFrom<QueryValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: QueryValue) -> crate::Result<Self> {
        match value {
            QueryValue::Number(n) => Ok(n.as_f64()),
            QueryValue::String(s) => s
                .trim()
                .parse()
                .map_err(|_| crate::Error::invalid_number(&s, "f64")),
            other => Err(crate::Error::type_mismatch("number", other.kind())),
        }
    }
}

impl TryFrom<QueryValue> for bool {
    type Error = crate::Error;

    fn try_from(value: QueryValue) -> crate::Result<Self> {
        match value {
            QueryValue::Bool(b) => Ok(b),
            QueryValue::String(s) if s == "true" => Ok(true),
            QueryValue::String(s) if s == "false" => Ok(false),
            other => Err(crate::Error::type_mismatch("bool", other.kind())),
        }
    }
}

impl TryFrom<QueryValue> for String {
    type Error = crate::Error;

    fn try_from(value: QueryValue) -> crate::Result<Self> {
        match value {
            QueryValue::String(s) => Ok(s),
            other => Err(crate::Error::type_mismatch("string", other.kind())),
        }
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

macro_rules! from_number {
    ($($ty:ty => |$v:ident| $number:expr),* $(,)?) => {
        $(
            impl From<$ty> for QueryValue {
                fn from($v: $ty) -> Self {
                    QueryValue::Number($number)
                }
            }
        )*
    };
}

from_number! {
    i8 => |v| Number::Integer(i64::from(v)),
    i16 => |v| Number::Integer(i64::from(v)),
    i32 => |v| Number::Integer(i64::from(v)),
    i64 => |v| Number::Integer(v),
    i128 => |v| Number::from(v),
    u8 => |v| Number::Integer(i64::from(v)),
    u16 => |v| Number::Integer(i64::from(v)),
    u32 => |v| Number::Integer(i64::from(v)),
    u64 => |v| Number::from(v),
    u128 => |v| Number::from(v),
    f32 => |v| Number::Float(f64::from(v)),
    f64 => |v| Number::Float(v),
}

impl From<Number> for QueryValue {
    fn from(value: Number) -> Self {
        QueryValue::Number(value)
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::String(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::String(value.to_string())
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(QueryValue::Null, Into::into)
    }
}

impl From<Vec<QueryValue>> for QueryValue {
    fn from(value: Vec<QueryValue>) -> Self {
        QueryValue::Array(value)
    }
}

impl From<QueryMap> for QueryValue {
    fn from(value: QueryMap) -> Self {
        QueryValue::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_tryfrom_i64() {
        assert_eq!(i64::try_from(QueryValue::from(42)).unwrap(), 42);
        assert_eq!(i64::try_from(QueryValue::from("42")).unwrap(), 42);
        assert!(i64::try_from(QueryValue::from("forty")).is_err());
        assert!(i64::try_from(QueryValue::Array(vec![])).is_err());
    }

    #[test]
    fn test_tryfrom_f64_and_bool() {
        assert_eq!(f64::try_from(QueryValue::from("3.5")).unwrap(), 3.5);
        assert!(bool::try_from(QueryValue::from("true")).unwrap());
        assert!(!bool::try_from(QueryValue::Bool(false)).unwrap());
        assert!(bool::try_from(QueryValue::from("yes")).is_err());
    }

    #[test]
    fn test_tryfrom_string() {
        let value = QueryValue::String("hello".to_string());
        assert_eq!(String::try_from(value).unwrap(), "hello");
        assert!(String::try_from(QueryValue::from(42)).is_err());
    }

    #[test]
    fn test_number_display() {
        assert_eq!(Number::Float(1.0).to_string(), "1");
        assert_eq!(Number::Float(0.5).to_string(), "0.5");
        assert_eq!(Number::Float(-0.0).to_string(), "0");
        assert_eq!(Number::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Number::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Number::from(u64::MAX).to_string(), "18446744073709551615");
        assert!(matches!(Number::from(u64::MAX), Number::BigInt(_)));
        assert_eq!(Number::from(7u64), Number::Integer(7));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(QueryValue::Null.to_string(), "");
        assert_eq!(QueryValue::Bool(false).to_string(), "false");
        assert_eq!(QueryValue::from(0).to_string(), "0");

        let nested = QueryValue::Array(vec![
            QueryValue::from("a"),
            QueryValue::Null,
            QueryValue::Array(vec![QueryValue::from(1), QueryValue::from(2)]),
            QueryValue::Object(QueryMap::new()),
        ]);
        assert_eq!(nested.to_string(), "a,,1,2,[object Object]");
    }

    #[test]
    fn test_falsy() {
        assert!(QueryValue::Null.is_falsy());
        assert!(QueryValue::from("").is_falsy());
        assert!(QueryValue::Bool(false).is_falsy());
        assert!(QueryValue::from(0).is_falsy());
        assert!(!QueryValue::from("0").is_falsy());
        assert!(!QueryValue::Array(vec![]).is_falsy());
        assert!(!QueryValue::Object(QueryMap::new()).is_falsy());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(QueryValue::from(None::<i32>), QueryValue::Null);
        assert_eq!(QueryValue::from(Some("x")), QueryValue::from("x"));
    }
}
