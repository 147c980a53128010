//! Query-string deserialization.
//!
//! Parsing happens in two passes over the `&`-separated parameters:
//!
//! 1. **Array coalescing**: keys ending in `[]` collect their values into an
//!    array, in encounter order; any other repeated key keeps the last value.
//! 2. **Structure construction**: bracketed keys become nested objects
//!    (`a[b][c]=x` → `{a: {b: {c: "x"}}}`), unless
//!    [`shallow`](crate::UnserializeOptions::shallow) or
//!    [`split_values`](crate::UnserializeOptions::split_values) is set.
//!
//! The parser never fails. Bad percent escapes are kept verbatim and keys
//! that collide in incompatible ways are resolved by whichever write comes
//! last or, for a path running through a non-object, dropped. Keys that
//! nest deeper than [`max_depth`](crate::UnserializeOptions::max_depth)
//! keep their remaining segments as one literal key.
//!
//! ## Usage
//!
//! ```rust
//! use serde_urlquery::{query, unserialize, UnserializeOptions};
//!
//! let map = unserialize("foo[bar][]=baz&foo[bar][]=food", &UnserializeOptions::new());
//! assert_eq!(map.get("foo"), Some(&query!({ "bar": ["baz", "food"] })));
//! ```
//!
//! Typed targets go through [`Deserializer`]:
//!
//! ```rust
//! use serde_urlquery::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Search { q: String, page: u32 }
//!
//! let search: Search = from_str("?q=rust+serde&page=2").unwrap();
//! assert_eq!(search, Search { q: "rust serde".to_string(), page: 2 });
//! ```

use crate::encoding::{decode_component, decode_form_value};
use crate::{Error, Number, QueryMap, QueryValue, Result, SplitValues, UnserializeOptions};
use serde::de::{self, IntoDeserializer};
use std::str::FromStr;

/// Parses a query string into a map. See the module docs for the rules.
pub(crate) fn parse_query(input: &str, options: &UnserializeOptions) -> QueryMap {
    let input = input.strip_prefix('?').unwrap_or(input);
    let mut result = QueryMap::new();

    if input.is_empty() {
        return result;
    }

    // First pass: combine the values of `key[]` parameters.
    let mut params = QueryMap::new();
    for token in input.split('&') {
        let (key, value) = param_pair(token, options);

        if key.ends_with("[]") {
            match params.get_mut(&key) {
                Some(QueryValue::Array(items)) => items.push(value),
                _ => {
                    params.insert(key, QueryValue::Array(vec![value]));
                }
            }
        } else {
            params.insert(key, value);
        }
    }

    tracing::trace!(params = params.len(), "query parameters collected");

    for (key, value) in params {
        if options.shallow {
            insert_shallow(&mut result, key, value);
        } else if !options.split_values.is_none() {
            let value = split_value(value, &options.split_values);
            result.insert(key, value);
        } else {
            insert_nested(&mut result, &key, value, options.max_depth);
        }
    }

    result
}

fn param_pair(token: &str, options: &UnserializeOptions) -> (String, QueryValue) {
    let (raw_key, raw_value) = match token.split_once('=') {
        Some((k, v)) => (k, Some(v)),
        None => (token, None),
    };

    let key = if options.raw {
        raw_key.to_string()
    } else {
        decode_component(raw_key).into_owned()
    };

    let value = match raw_value {
        Some(v) if options.raw => QueryValue::String(v.to_string()),
        Some(v) => QueryValue::String(decode_form_value(v)),
        None => options.empty.clone(),
    };

    (key, value)
}

fn insert_shallow(result: &mut QueryMap, key: String, value: QueryValue) {
    let Some(stripped) = key.strip_suffix("[]") else {
        result.insert(key, value);
        return;
    };

    match (result.get_mut(stripped), value) {
        (Some(QueryValue::Array(existing)), QueryValue::Array(items)) => existing.extend(items),
        (_, value) => {
            result.insert(stripped.to_string(), value);
        }
    }
}

fn split_value(value: QueryValue, rule: &SplitValues) -> QueryValue {
    let QueryValue::String(text) = value else {
        return value;
    };

    match rule.split(&text) {
        Some(parts) if parts.len() > 1 => {
            QueryValue::Array(parts.into_iter().map(QueryValue::String).collect())
        }
        _ => QueryValue::String(text),
    }
}

/// Walks `a[b][c]` down to `a -> b -> c`, creating objects on the way.
/// A trailing `[]` names the array collected in the first pass, so the
/// segment before it is the terminal key. At most `max_depth` objects are
/// opened; deeper segments are rejoined as `c[d]` and used as the key.
fn insert_nested(root: &mut QueryMap, key: &str, value: QueryValue, max_depth: usize) {
    let cleaned = key.replace(']', "");
    let mut path: Vec<&str> = cleaned.split('[').collect();

    let mut last = path.pop().unwrap_or_default().to_string();
    if last.is_empty() {
        if let Some(previous) = path.pop() {
            last = previous.to_string();
        }
    }

    if path.len() > max_depth {
        let overflow = path.split_off(max_depth);
        tracing::debug!(
            depth = overflow.len() + max_depth,
            max_depth,
            "key nests too deep, remaining segments kept as one key"
        );
        let mut joined = String::with_capacity(cleaned.len() + overflow.len() * 2);
        for (i, segment) in overflow.iter().enumerate() {
            if i == 0 {
                joined.push_str(segment);
            } else {
                joined.push('[');
                joined.push_str(segment);
                joined.push(']');
            }
        }
        joined.push('[');
        joined.push_str(&last);
        joined.push(']');
        last = joined;
    }

    let mut current = root;
    for segment in path {
        let slot = current.get_or_insert_with(segment.to_string(), || {
            QueryValue::Object(QueryMap::new())
        });
        if slot.is_falsy() {
            *slot = QueryValue::Object(QueryMap::new());
        }
        match slot {
            QueryValue::Object(map) => current = map,
            other => {
                tracing::debug!(
                    key,
                    segment,
                    found = other.kind(),
                    "path runs through a non-object value, parameter dropped"
                );
                return;
            }
        }
    }

    current.insert(last, value);
}

/// Deserializer from query data into any `T: Deserialize`.
///
/// Decoded query values are all strings, so numbers, booleans and
/// characters are parsed from text when the target type asks for them.
/// Objects whose keys are all array indices (as produced by indexed
/// serialization) are accepted where a sequence is expected. An empty
/// value reads as `None` for `Option` targets, matching how `None`
/// serializes.
pub struct Deserializer {
    value: QueryValue,
}

impl Deserializer {
    /// Wraps an already-built value.
    pub fn new(value: QueryValue) -> Self {
        Deserializer { value }
    }

    /// Parses `input` with default options.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Self {
        Self::from_str_with_options(input, &UnserializeOptions::default())
    }

    /// Parses `input` with the given options.
    pub fn from_str_with_options(input: &str, options: &UnserializeOptions) -> Self {
        Deserializer::new(QueryValue::Object(parse_query(input, options)))
    }

    fn parse<T: FromStr>(self, expected: &str) -> Result<T> {
        let text = match self.value {
            QueryValue::String(s) => s,
            QueryValue::Number(n) => n.to_string(),
            QueryValue::Bool(b) => b.to_string(),
            other => return Err(Error::type_mismatch(expected, other.kind())),
        };
        text.trim()
            .parse()
            .map_err(|_| Error::invalid_number(&text, expected))
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visitor.$visit(self.parse::<$ty>(stringify!($ty))?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            QueryValue::Null => visitor.visit_unit(),
            QueryValue::Bool(b) => visitor.visit_bool(b),
            QueryValue::Number(Number::Integer(i)) => visitor.visit_i64(i),
            QueryValue::Number(Number::BigInt(bi)) => visitor.visit_string(bi.to_string()),
            QueryValue::Number(n) => visitor.visit_f64(n.as_f64()),
            QueryValue::String(s) => visitor.visit_string(s),
            QueryValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            QueryValue::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool(bool),
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            QueryValue::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => visitor.visit_char(c),
                    _ => Err(Error::type_mismatch("single character", "string")),
                }
            }
            other => Err(Error::type_mismatch("char", other.kind())),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            QueryValue::String(s) => visitor.visit_string(s),
            scalar @ (QueryValue::Number(_) | QueryValue::Bool(_)) => {
                visitor.visit_string(scalar.to_string())
            }
            other => Deserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            QueryValue::String(s) => visitor.visit_byte_buf(s.into_bytes()),
            other => Deserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            QueryValue::Null => visitor.visit_none(),
            QueryValue::String(s) if s.is_empty() => visitor.visit_none(),
            other => visitor.visit_some(Deserializer::new(other)),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            QueryValue::Null => visitor.visit_unit(),
            QueryValue::String(s) if s.is_empty() => visitor.visit_unit(),
            other => Err(Error::type_mismatch("unit", other.kind())),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            QueryValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            QueryValue::Object(obj) => match indexed_elements(obj) {
                Some(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
                None => Err(Error::type_mismatch("array", "object")),
            },
            other => Err(Error::type_mismatch("array", other.kind())),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            QueryValue::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            other => Err(Error::type_mismatch("object", other.kind())),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            QueryValue::String(s) => visitor.visit_enum(s.into_deserializer()),
            QueryValue::Object(obj) if obj.len() == 1 => {
                let mut entries = obj.into_iter();
                match entries.next() {
                    Some((variant, value)) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    None => Err(Error::custom("Expected enum variant")),
                }
            }
            other => Err(Error::type_mismatch("enum", other.kind())),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

/// Values of an object keyed `0`, `1`, …, ordered by index.
fn indexed_elements(obj: QueryMap) -> Option<Vec<QueryValue>> {
    let mut indexed = obj
        .into_iter()
        .map(|(key, value)| key.parse::<usize>().ok().map(|i| (i, value)))
        .collect::<Option<Vec<_>>>()?;
    indexed.sort_by_key(|(i, _)| *i);
    Some(indexed.into_iter().map(|(_, value)| value).collect())
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<QueryValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<QueryValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(Deserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, QueryValue>,
    value: Option<QueryValue>,
}

impl MapDeserializer {
    fn new(map: QueryMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(Deserializer::new(QueryValue::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(Deserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: QueryValue,
}

impl EnumDeserializer {
    fn new(variant: String, value: QueryValue) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(Deserializer::new(QueryValue::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: QueryValue,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            QueryValue::Null => Ok(()),
            QueryValue::String(s) if s.is_empty() => Ok(()),
            _ => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(Deserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(Deserializer::new(self.value), visitor)
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_map(Deserializer::new(self.value), visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{query, DEFAULT_MAX_DEPTH};

    fn parse(input: &str) -> QueryValue {
        QueryValue::Object(parse_query(input, &UnserializeOptions::new()))
    }

    #[test]
    fn test_flat_and_empty_flag() {
        assert_eq!(
            parse("?foo=bar&yoyo&baz=xyxxy"),
            query!({ "foo": "bar", "yoyo": true, "baz": "xyxxy" })
        );
        let options = UnserializeOptions::new().with_empty("");
        assert_eq!(
            QueryValue::Object(parse_query("foo=bar&yoyo", &options)),
            query!({ "foo": "bar", "yoyo": "" })
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_query("", &UnserializeOptions::new()).is_empty());
        assert!(parse_query("?", &UnserializeOptions::new()).is_empty());
    }

    #[test]
    fn test_arrays_and_nesting() {
        assert_eq!(parse("foo[]=1&foo[]=2"), query!({ "foo": ["1", "2"] }));
        assert_eq!(
            parse("foo[bar]=baz&foo[yummy]=food"),
            query!({ "foo": { "bar": "baz", "yummy": "food" } })
        );
        assert_eq!(
            parse("foo[bar][]=baz&foo[bar][]=food"),
            query!({ "foo": { "bar": ["baz", "food"] } })
        );
        assert_eq!(
            parse("foo[bar][baz]=qux&foo[bar][bing]=bam"),
            query!({ "foo": { "bar": { "baz": "qux", "bing": "bam" } } })
        );
    }

    #[test]
    fn test_last_write_wins() {
        assert_eq!(parse("a=1&a=2"), query!({ "a": "2" }));
    }

    #[test]
    fn test_split_on_first_equals() {
        assert_eq!(parse("expr=a=b"), query!({ "expr": "a=b" }));
    }

    #[test]
    fn test_decoding() {
        assert_eq!(
            parse("q=yes+I+can&caf%C3%A9=%E2%9C%93"),
            query!({ "q": "yes I can", "café": "✓" })
        );
        // Keys keep their `+`; only values treat it as a space.
        assert_eq!(parse("a+b=c+d"), query!({ "a+b": "c d" }));

        let raw = UnserializeOptions::new().with_raw(true);
        assert_eq!(
            QueryValue::Object(parse_query("q=yes+I%20can", &raw)),
            query!({ "q": "yes+I%20can" })
        );
    }

    #[test]
    fn test_shallow() {
        let options = UnserializeOptions::new().with_shallow(true);
        assert_eq!(
            QueryValue::Object(parse_query("foo[bar]=baz&foo[yummy]=food", &options)),
            query!({ "foo[bar]": "baz", "foo[yummy]": "food" })
        );
        assert_eq!(
            QueryValue::Object(parse_query("foo[]=1&foo[]=2&x[a][]=3", &options)),
            query!({ "foo": ["1", "2"], "x[a]": ["3"] })
        );
    }

    #[test]
    fn test_split_values() {
        let options = UnserializeOptions::new().with_split_values(true);
        assert_eq!(
            QueryValue::Object(parse_query("foo=bar,baz&one=single&flag", &options)),
            query!({ "foo": ["bar", "baz"], "one": "single", "flag": true })
        );

        // No nesting, and arrays from `[]` keys pass through.
        assert_eq!(
            QueryValue::Object(parse_query("a[b]=1,2&c[]=x", &options)),
            query!({ "a[b]": ["1", "2"], "c[]": ["x"] })
        );

        let options = UnserializeOptions::new().with_split_values(SplitValues::delimiter("|"));
        assert_eq!(
            QueryValue::Object(parse_query("tags=a|b|c", &options)),
            query!({ "tags": ["a", "b", "c"] })
        );
    }

    #[test]
    fn test_unspecified_collisions_do_not_panic() {
        // Behavior here is unspecified; these only pin down the current
        // fallthrough so changes are noticed.
        assert_eq!(
            parse("foo=bar&foo[baz]=qux"),
            query!({ "foo": "bar" })
        );
        assert_eq!(
            parse("foo=&foo[baz]=qux"),
            query!({ "foo": { "baz": "qux" } })
        );
        assert_eq!(parse("foo[]=a&foo[x]=b"), query!({ "foo": ["a"] }));
        assert_eq!(parse("foo[bar=1"), query!({ "foo": { "bar": "1" } }));
        assert_eq!(parse("foo]bar=1"), query!({ "foobar": "1" }));
        assert_eq!(parse("&&"), query!({ "": true }));
    }

    #[test]
    fn test_depth_limit() {
        let options = UnserializeOptions::new().with_max_depth(2);
        let map = QueryValue::Object(parse_query("a[b][c][d][]=1&a[b][c][d][]=2", &options));
        assert_eq!(map, query!({ "a": { "b": { "c[d]": ["1", "2"] } } }));

        let options = UnserializeOptions::new().with_max_depth(0);
        let map = QueryValue::Object(parse_query("a[b]=1&c=2", &options));
        assert_eq!(map, query!({ "a[b]": "1", "c": "2" }));

        // Keys within the limit are untouched.
        let options = UnserializeOptions::new().with_max_depth(3);
        assert_eq!(
            QueryValue::Object(parse_query("a[b][c]=1", &options)),
            query!({ "a": { "b": { "c": "1" } } })
        );
    }

    #[test]
    fn test_very_deep_key_is_capped() {
        let levels = 100_000;
        let mut input = String::from("a");
        for _ in 0..levels {
            input.push_str("[b]");
        }
        input.push_str("=1");

        let map = parse_query(&input, &UnserializeOptions::new());

        let mut current = &map;
        let mut depth = 0;
        loop {
            match current.get("b").or_else(|| current.get("a")) {
                Some(QueryValue::Object(next)) => {
                    current = next;
                    depth += 1;
                }
                _ => break,
            }
        }
        assert_eq!(depth, DEFAULT_MAX_DEPTH);
        assert_eq!(current.len(), 1);

        let (key, value) = current.iter().next().unwrap();
        assert_eq!(value, &QueryValue::from("1"));
        assert!(key.starts_with("b[b][b]"));
        assert_eq!(key.matches('[').count(), levels - DEFAULT_MAX_DEPTH);

        let encoded = crate::serialize(&QueryValue::Object(map.clone()), &Default::default());
        assert!(encoded.ends_with("=1"));
        drop(map);
    }

    #[test]
    fn test_deserializer_parses_scalars() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug, PartialEq)]
        struct Params {
            page: u32,
            ratio: f64,
            debug: bool,
            sort: Option<String>,
            ids: Vec<u64>,
        }

        let params: Params = de::Deserialize::deserialize(Deserializer::from_str(
            "page=3&ratio=0.5&debug&ids[0]=10&ids[1]=20",
        ))
        .unwrap();
        assert_eq!(
            params,
            Params {
                page: 3,
                ratio: 0.5,
                debug: true,
                sort: None,
                ids: vec![10, 20],
            }
        );
    }

    #[test]
    fn test_deserializer_errors() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug)]
        #[allow(dead_code)]
        struct Page {
            page: u32,
        }

        let err = Page::deserialize(Deserializer::from_str("page=first")).unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { .. }));

        let err = Page::deserialize(Deserializer::from_str("page[]=1")).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }
}
