//! Query-string serialization.
//!
//! This module provides two serializers:
//!
//! - [`Serializer`] walks a [`QueryValue`] tree and writes bracket-notation
//!   `key=value` pairs (the codec behind [`serialize`](crate::serialize)).
//! - [`QueryValueSerializer`] turns any `T: Serialize` into a [`QueryValue`],
//!   which is how [`to_string`](crate::to_string) accepts typed data.
//!
//! ## Key Notation
//!
//! | value                 | output                          |
//! |-----------------------|---------------------------------|
//! | `{a: "x"}`            | `a=x`                           |
//! | `{a: {b: "x"}}`       | `a[b]=x`                        |
//! | `{a: ["x", "y"]}`     | `a[]=x&a[]=y`                   |
//! | same, indexed         | `a[0]=x&a[1]=y`                 |
//! | `{a: [{b: "x"}]}`     | `a[][b]=x`                      |
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_urlquery::{query, Serializer, SerializeOptions};
//!
//! let mut serializer = Serializer::new(SerializeOptions::new());
//! serializer.serialize_value(&query!({ "q": "rust serde", "page": 2 }));
//! assert_eq!(serializer.into_inner(), "q=rust+serde&page=2");
//! ```

use crate::encoding::encode_component;
use crate::{Error, Number, QueryMap, QueryValue, Result, SerializeOptions};
use serde::{ser, Serialize};

/// The query-string serializer.
///
/// Created via [`Serializer::new`]; feed it one value with
/// [`Serializer::serialize_value`] and take the result with
/// [`Serializer::into_inner`].
pub struct Serializer {
    output: String,
    options: SerializeOptions,
    indexed: bool,
    pairs: usize,
}

impl Serializer {
    pub fn new(options: SerializeOptions) -> Self {
        let indexed = options.is_indexed();
        Serializer {
            output: String::with_capacity(128),
            options,
            indexed,
            pairs: 0,
        }
    }

    /// Appends the pairs for `data`.
    ///
    /// Objects contribute one top-level key per entry, arrays one per index.
    /// A bare scalar has no key to live under and produces nothing.
    pub fn serialize_value(&mut self, data: &QueryValue) {
        if let Some(prefix) = self.options.prefix().map(str::to_string) {
            self.build_params(&prefix, data);
            return;
        }

        match data {
            QueryValue::Object(map) => {
                for (key, value) in map.iter() {
                    self.build_params(key, value);
                }
            }
            QueryValue::Array(items) => {
                for (i, value) in items.iter().enumerate() {
                    self.build_params(&i.to_string(), value);
                }
            }
            scalar => {
                tracing::trace!(kind = scalar.kind(), "top-level scalar has no key, skipped");
            }
        }
    }

    /// Returns the finished query string, with `%20` written as `+`.
    pub fn into_inner(self) -> String {
        self.output.replace("%20", "+")
    }

    fn build_params(&mut self, key: &str, value: &QueryValue) {
        match value {
            QueryValue::Array(_) if self.options.array_to_string => {
                self.add(key, &value.to_string());
            }
            QueryValue::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    // Composite elements always get `[]`; only scalars carry the index.
                    let child = if self.indexed && !item.is_composite() {
                        format!("{}[{}]", key, i)
                    } else {
                        format!("{}[]", key)
                    };
                    self.build_params(&child, item);
                }
            }
            QueryValue::Object(map) => {
                for (name, item) in map.iter() {
                    self.build_params(&format!("{}[{}]", key, name), item);
                }
            }
            scalar => self.add(key, &scalar.to_string()),
        }
    }

    fn add(&mut self, key: &str, value: &str) {
        if self.pairs > 0 {
            self.output.push('&');
        }
        self.output.push_str(key);
        self.output.push('=');
        if self.options.raw {
            self.output.push_str(value);
        } else {
            self.output.push_str(&encode_component(value));
        }
        self.pairs += 1;
    }
}

/// Serializer producing a [`QueryValue`] from any `T: Serialize`.
///
/// Enum variants carrying data become single-key objects named after the
/// variant, so `Filter::Tag("rust")` turns into `{"Tag": "rust"}`.
pub struct QueryValueSerializer;

pub struct SerializeVec {
    vec: Vec<QueryValue>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: QueryMap,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

impl ser::Serializer for QueryValueSerializer {
    type Ok = QueryValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<QueryValue> {
        Ok(QueryValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<QueryValue> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<QueryValue> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<QueryValue> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<QueryValue> {
        Ok(QueryValue::Number(Number::Integer(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<QueryValue> {
        Ok(QueryValue::Number(Number::from(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<QueryValue> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u16(self, v: u16) -> Result<QueryValue> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u32(self, v: u32) -> Result<QueryValue> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u64(self, v: u64) -> Result<QueryValue> {
        Ok(QueryValue::Number(Number::from(v)))
    }

    fn serialize_u128(self, v: u128) -> Result<QueryValue> {
        Ok(QueryValue::Number(Number::from(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<QueryValue> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<QueryValue> {
        Ok(QueryValue::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<QueryValue> {
        Ok(QueryValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<QueryValue> {
        Ok(QueryValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<QueryValue> {
        let vec = v
            .iter()
            .map(|&b| QueryValue::Number(Number::Integer(b as i64)))
            .collect();
        Ok(QueryValue::Array(vec))
    }

    fn serialize_none(self) -> Result<QueryValue> {
        Ok(QueryValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<QueryValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<QueryValue> {
        Ok(QueryValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<QueryValue> {
        Ok(QueryValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<QueryValue> {
        Ok(QueryValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<QueryValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<QueryValue>
    where
        T: ?Sized + Serialize,
    {
        let mut map = QueryMap::with_capacity(1);
        map.insert(variant.to_string(), to_query_value(value)?);
        Ok(QueryValue::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn finish(self) -> QueryValue {
        wrap_variant(self.variant, QueryValue::Array(self.vec))
    }
}

impl SerializeMap {
    fn new(variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: QueryMap::new(),
            current_key: None,
            variant,
        }
    }

    fn finish(self) -> QueryValue {
        wrap_variant(self.variant, QueryValue::Object(self.map))
    }
}

fn wrap_variant(variant: Option<&'static str>, value: QueryValue) -> QueryValue {
    match variant {
        Some(name) => {
            let mut map = QueryMap::with_capacity(1);
            map.insert(name.to_string(), value);
            QueryValue::Object(map)
        }
        None => value,
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = QueryValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_query_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<QueryValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = QueryValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_query_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<QueryValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = QueryValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_query_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<QueryValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = QueryValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_query_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<QueryValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = QueryValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match to_query_value(key)? {
            QueryValue::String(s) => s,
            QueryValue::Number(n) => n.to_string(),
            QueryValue::Bool(b) => b.to_string(),
            other => return Err(Error::key_must_be_a_string(other.kind())),
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_query_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<QueryValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = QueryValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_query_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<QueryValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = QueryValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_query_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<QueryValue> {
        Ok(self.finish())
    }
}

fn to_query_value<T: Serialize + ?Sized>(value: &T) -> Result<QueryValue> {
    value.serialize(QueryValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;

    fn ser(value: &QueryValue, options: SerializeOptions) -> String {
        let mut serializer = Serializer::new(options);
        serializer.serialize_value(value);
        serializer.into_inner()
    }

    #[test]
    fn test_flat_object() {
        let data = query!({ "foo": "yes", "bar": "again" });
        assert_eq!(ser(&data, SerializeOptions::new()), "foo=yes&bar=again");
    }

    #[test]
    fn test_arrays_bare_and_indexed() {
        let data = query!({ "foo": ["yes", "again"] });
        assert_eq!(
            ser(&data, SerializeOptions::new()),
            "foo[]=yes&foo[]=again"
        );
        assert_eq!(
            ser(&data, SerializeOptions::new().with_indexed(true)),
            "foo[0]=yes&foo[1]=again"
        );
    }

    #[test]
    fn test_array_to_string() {
        let data = query!({ "foo": ["won", "too"] });
        assert_eq!(
            ser(&data, SerializeOptions::new().with_array_to_string(true)),
            "foo=won%2Ctoo"
        );
        assert_eq!(
            ser(
                &data,
                SerializeOptions::new()
                    .with_array_to_string(true)
                    .with_raw(true)
            ),
            "foo=won,too"
        );
    }

    #[test]
    fn test_composite_array_elements_use_empty_brackets() {
        let data = query!({ "foo": [{ "a": "1" }, ["x"], "s"] });
        assert_eq!(
            ser(&data, SerializeOptions::new().with_indexed(true)),
            "foo[][a]=1&foo[][0]=x&foo[2]=s"
        );
    }

    #[test]
    fn test_top_level_array_and_scalar() {
        assert_eq!(ser(&query!(["a", "b"]), SerializeOptions::new()), "0=a&1=b");
        assert_eq!(ser(&query!("alone"), SerializeOptions::new()), "");
    }

    #[test]
    fn test_space_and_percent20() {
        let data = query!({ "q": "a b" });
        assert_eq!(ser(&data, SerializeOptions::new()), "q=a+b");
        assert_eq!(ser(&data, SerializeOptions::new().with_raw(true)), "q=a b");
        // Literal %20 in raw output is still rewritten.
        let data = query!({ "q": "a%20b" });
        assert_eq!(ser(&data, SerializeOptions::new().with_raw(true)), "q=a+b");
    }

    #[test]
    fn test_value_serializer_variants() {
        #[derive(Serialize)]
        enum Filter {
            All,
            Tag(String),
            Range { from: u32, to: u32 },
            Pair(u8, u8),
        }

        assert_eq!(
            to_query_value(&Filter::All).unwrap(),
            QueryValue::from("All")
        );
        assert_eq!(
            to_query_value(&Filter::Tag("rust".into())).unwrap(),
            query!({ "Tag": "rust" })
        );
        assert_eq!(
            to_query_value(&Filter::Range { from: 1, to: 5 }).unwrap(),
            query!({ "Range": { "from": 1, "to": 5 } })
        );
        assert_eq!(
            to_query_value(&Filter::Pair(1, 2)).unwrap(),
            query!({ "Pair": [1, 2] })
        );
    }

    #[test]
    fn test_map_keys() {
        use std::collections::BTreeMap;

        let mut ids = BTreeMap::new();
        ids.insert(1u32, "one");
        ids.insert(2u32, "two");
        assert_eq!(
            to_query_value(&ids).unwrap(),
            query!({ "1": "one", "2": "two" })
        );

        let mut bad = BTreeMap::new();
        bad.insert(vec![1u8], "x");
        assert!(matches!(
            to_query_value(&bad),
            Err(Error::KeyMustBeAString(_))
        ));
    }
}
