//! # serde_urlquery
//!
//! Query-string serialization with bracket notation for nested data.
//!
//! Nested objects and arrays are flattened into `key[sub][]=value` pairs and
//! rebuilt from them:
//!
//! ```text
//! {"foo": {"bar": ["one", "two"]}}   <->   foo[bar][]=one&foo[bar][]=two
//! ```
//!
//! ## Key Features
//!
//! - **Bracket Notation**: `a[b]` for object keys, `a[]` (or `a[0]` when
//!   indexed) for array elements
//! - **Never Fails**: the codec accepts any input and always produces output;
//!   malformed escapes and conflicting keys degrade instead of erroring
//! - **Serde Compatible**: typed structs go in through [`to_string`] and come
//!   back out through [`from_str`], with numbers and booleans parsed from text
//! - **Location Helpers**: [`pathname`], [`basename`], [`segments`],
//!   [`segment`], [`loc`] and [`hash_sanitize`] for picking URLs apart
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_urlquery = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Dynamic values
//!
//! ```rust
//! use serde_urlquery::{query, serialize, unserialize, SerializeOptions, UnserializeOptions};
//!
//! let data = query!({ "foo": ["yes", "again"], "q": "yes I can" });
//! let encoded = serialize(&data, &SerializeOptions::new());
//! assert_eq!(encoded, "foo[]=yes&foo[]=again&q=yes+I+can");
//!
//! let decoded = unserialize(&encoded, &UnserializeOptions::new());
//! assert_eq!(decoded.get("q").and_then(|v| v.as_str()), Some("yes I can"));
//! ```
//!
//! ### Typed data
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_urlquery::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Search {
//!     q: String,
//!     page: u32,
//!     tags: Vec<String>,
//! }
//!
//! let search = Search {
//!     q: "rust".to_string(),
//!     page: 2,
//!     tags: vec!["serde".to_string(), "web".to_string()],
//! };
//!
//! let encoded = to_string(&search).unwrap();
//! assert_eq!(encoded, "q=rust&page=2&tags[]=serde&tags[]=web");
//!
//! let back: Search = from_str(&encoded).unwrap();
//! assert_eq!(search, back);
//! ```
//!
//! ## Lossy Shapes
//!
//! Array elements that are themselves objects or arrays are always written
//! with `[]`, so an array of objects comes back as objects merged by key
//! rather than as separate elements. Prefer arrays of scalars, or maps keyed
//! by id, when round trips matter.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Typed round trip through a query string
//! - **`macro.rs`** - Building values with the `query!` macro
//! - **`custom_options.rs`** - Prefixes, indexing, shallow and split parsing
//! - **`location.rs`** - Picking URLs apart
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
mod encoding;
pub mod error;
pub mod location;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use location::{basename, hash_sanitize, loc, pathname, segment, segments, Loc, Location};
pub use map::QueryMap;
pub use options::{SerializeOptions, SplitValues, UnserializeOptions, DEFAULT_MAX_DEPTH};
pub use ser::{QueryValueSerializer, Serializer};
pub use value::{Number, QueryValue};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serializes a value into a query string.
///
/// Object entries become top-level keys and array elements become keys
/// `0`, `1`, … unless a prefix is set, in which case the whole value
/// lives under it. A bare scalar without a prefix produces `""`.
///
/// # Examples
///
/// ```rust
/// use serde_urlquery::{query, serialize, SerializeOptions};
///
/// let data = query!({ "foo": ["yes", "again"] });
///
/// assert_eq!(
///     serialize(&data, &SerializeOptions::new()),
///     "foo[]=yes&foo[]=again"
/// );
///
/// let options = SerializeOptions::new().with_array_to_string(true).with_raw(true);
/// assert_eq!(serialize(&data, &options), "foo=yes,again");
/// ```
pub fn serialize(data: &QueryValue, options: &SerializeOptions) -> String {
    let mut serializer = Serializer::new(options.clone());
    serializer.serialize_value(data);
    serializer.into_inner()
}

/// Parses a query string into a map. A leading `?` is ignored.
///
/// # Examples
///
/// ```rust
/// use serde_urlquery::{query, unserialize, QueryValue, UnserializeOptions};
///
/// let map = unserialize("?foo=bar&yoyo&baz=xyxxy", &UnserializeOptions::new());
/// assert_eq!(
///     QueryValue::Object(map),
///     query!({ "foo": "bar", "yoyo": true, "baz": "xyxxy" })
/// );
/// ```
pub fn unserialize(query: &str, options: &UnserializeOptions) -> QueryMap {
    de::parse_query(query, options)
}

/// Parses the `search` part of a [`Location`].
///
/// ```rust
/// use serde_urlquery::{unserialize_location, UnserializeOptions};
///
/// let url = url::Url::parse("https://example.com/list?page=2&sort[by]=name").unwrap();
/// let map = unserialize_location(&url, &UnserializeOptions::new());
/// assert_eq!(map.get("page").and_then(|v| v.as_str()), Some("2"));
/// ```
pub fn unserialize_location<L>(location: &L, options: &UnserializeOptions) -> QueryMap
where
    L: Location + ?Sized,
{
    unserialize(&location.search(), options)
}

/// Serialize any `T: Serialize` to a query string.
///
/// # Examples
///
/// ```rust
/// use serde_urlquery::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x=1&y=2");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (e.g. map keys that
/// are not strings or numbers).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &SerializeOptions::default())
}

/// Serialize any `T: Serialize` to a query string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_urlquery::{to_string_with_options, SerializeOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let options = SerializeOptions::new().with_prefix("point");
/// let query = to_string_with_options(&Point { x: 1, y: 2 }, &options).unwrap();
/// assert_eq!(query, "point[x]=1&point[y]=2");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &SerializeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    Ok(serialize(&value, options))
}

/// Convert any `T: Serialize` to a `QueryValue`.
///
/// # Examples
///
/// ```rust
/// use serde_urlquery::{to_value, QueryValue};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: QueryValue = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<QueryValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(QueryValueSerializer)
}

/// Serialize any `T: Serialize` as a query string into a writer.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &SerializeOptions::default())
}

/// Serialize any `T: Serialize` as a query string into a writer with
/// custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(
    mut writer: W,
    value: &T,
    options: &SerializeOptions,
) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let query = to_string_with_options(value, options)?;
    writer
        .write_all(query.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a query string.
///
/// # Examples
///
/// ```rust
/// use serde_urlquery::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x=1&y=2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the parsed data does not fit type `T`, e.g. a
/// number field holding text that is not a number.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, &UnserializeOptions::default())
}

/// Deserialize an instance of type `T` from a query string parsed with
/// custom options.
///
/// # Examples
///
/// ```rust
/// use serde_urlquery::{from_str_with_options, UnserializeOptions};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Filter { tags: Vec<String> }
///
/// let options = UnserializeOptions::new().with_split_values(true);
/// let filter: Filter = from_str_with_options("tags=a,b", &options).unwrap();
/// assert_eq!(filter.tags, vec!["a", "b"]);
/// ```
///
/// # Errors
///
/// Returns an error if the parsed data does not fit type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &UnserializeOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::from_str_with_options(s, options))
}

/// Deserialize an instance of type `T` from a `QueryValue`.
///
/// # Errors
///
/// Returns an error if the value does not fit type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: QueryValue) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::new(value))
}

/// Deserialize an instance of type `T` from an I/O stream holding a query
/// string. One trailing line ending (`\n` or `\r\n`) is ignored.
///
/// # Examples
///
/// ```rust
/// use serde_urlquery::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x=1&y=2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails or the data does not
/// fit type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    let line = string.strip_suffix('\n').unwrap_or(&string);
    let line = line.strip_suffix('\r').unwrap_or(line);
    from_str(line)
}

/// Deserialize an instance of type `T` from bytes of a query string.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or the data does not
/// fit type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
