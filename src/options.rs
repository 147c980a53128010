//! Configuration options for query-string encoding and decoding.
//!
//! This module provides the types that customize the codec:
//!
//! - [`SerializeOptions`]: settings for [`serialize`](crate::serialize)
//! - [`UnserializeOptions`]: settings for [`unserialize`](crate::unserialize)
//! - [`SplitValues`]: how (and whether) decoded values are split into arrays
//!
//! ## Examples
//!
//! ```rust
//! use serde_urlquery::{query, serialize, SerializeOptions};
//!
//! let data = query!({ "foo": ["won", "too"] });
//!
//! let options = SerializeOptions::new().with_indexed(true);
//! assert_eq!(serialize(&data, &options), "foo[0]=won&foo[1]=too");
//!
//! let options = SerializeOptions::new().with_array_to_string(true).with_raw(true);
//! assert_eq!(serialize(&data, &options), "foo=won,too");
//! ```

use crate::QueryValue;
use regex::Regex;

/// Splitting rule applied to every value by [`unserialize`](crate::unserialize).
///
/// When anything other than [`SplitValues::None`] is selected, nested
/// structures are not built from bracketed keys.
///
/// # Examples
///
/// ```rust
/// use serde_urlquery::SplitValues;
///
/// assert!(SplitValues::None.is_none());
/// assert!(!SplitValues::Comma.is_none());
/// let pipes = SplitValues::delimiter("|");
/// assert_eq!(pipes, SplitValues::Delimiter("|".to_string()));
/// ```
#[derive(Clone, Debug, Default)]
pub enum SplitValues {
    /// Values are kept whole.
    #[default]
    None,
    /// Values are split on `,`.
    Comma,
    /// Values are split on a literal delimiter.
    Delimiter(String),
    /// Values are split on every match of a regular expression.
    Pattern(Regex),
}

impl SplitValues {
    /// Splits on a literal delimiter.
    #[must_use]
    pub fn delimiter(delimiter: impl Into<String>) -> Self {
        SplitValues::Delimiter(delimiter.into())
    }

    /// Splits on a regular expression.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error if `pattern` is not a valid expression.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(SplitValues::Pattern)
    }

    /// Returns `true` if values are kept whole.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, SplitValues::None)
    }

    /// Splits `value` according to this rule.
    ///
    /// Returns `None` when the rule is [`SplitValues::None`].
    pub(crate) fn split(&self, value: &str) -> Option<Vec<String>> {
        let parts: Vec<String> = match self {
            SplitValues::None => return None,
            SplitValues::Comma => value.split(',').map(str::to_string).collect(),
            // An empty delimiter splits into characters.
            SplitValues::Delimiter(d) if d.is_empty() => {
                value.chars().map(|c| c.to_string()).collect()
            }
            SplitValues::Delimiter(d) => value.split(d.as_str()).map(str::to_string).collect(),
            SplitValues::Pattern(re) => re.split(value).map(str::to_string).collect(),
        };
        Some(parts)
    }
}

impl PartialEq for SplitValues {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SplitValues::None, SplitValues::None) => true,
            (SplitValues::Comma, SplitValues::Comma) => true,
            (SplitValues::Delimiter(a), SplitValues::Delimiter(b)) => a == b,
            (SplitValues::Pattern(a), SplitValues::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl From<bool> for SplitValues {
    fn from(split: bool) -> Self {
        if split {
            SplitValues::Comma
        } else {
            SplitValues::None
        }
    }
}

impl From<Regex> for SplitValues {
    fn from(re: Regex) -> Self {
        SplitValues::Pattern(re)
    }
}

/// Configuration for [`serialize`](crate::serialize).
///
/// # Examples
///
/// ```rust
/// use serde_urlquery::SerializeOptions;
///
/// // Defaults: encoded values, `key[]` arrays, no prefix
/// let options = SerializeOptions::new();
/// assert!(!options.raw);
/// assert!(!options.is_indexed());
///
/// // A prefix turns indexing on unless explicitly disabled
/// let options = SerializeOptions::new().with_prefix("foo");
/// assert!(options.is_indexed());
/// let options = options.with_indexed(false);
/// assert!(!options.is_indexed());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SerializeOptions {
    /// Emit values without percent-encoding.
    pub raw: bool,
    /// Name to nest the whole input under; lets a bare array be serialized with a key.
    pub prefix: Option<String>,
    /// Render arrays as a single comma-joined value.
    pub array_to_string: bool,
    /// `Some(true)` for `key[0]` notation, `Some(false)` for `key[]`.
    /// `None` picks indexed notation only when a prefix is set.
    pub indexed: Option<bool>,
}

impl SerializeOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables (or re-enables) percent-encoding of values.
    #[must_use]
    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Nests the input under `prefix`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_urlquery::{query, serialize, SerializeOptions};
    ///
    /// let options = SerializeOptions::new().with_prefix("foo");
    /// assert_eq!(serialize(&query!(["oh", "won"]), &options), "foo[0]=oh&foo[1]=won");
    /// ```
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Joins arrays into one comma-separated value.
    #[must_use]
    pub fn with_array_to_string(mut self, array_to_string: bool) -> Self {
        self.array_to_string = array_to_string;
        self
    }

    /// Forces indexed (`true`) or bare (`false`) array notation.
    #[must_use]
    pub fn with_indexed(mut self, indexed: bool) -> Self {
        self.indexed = Some(indexed);
        self
    }

    /// The prefix, if one is set and non-empty.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// Whether scalar array elements get their index rendered.
    #[must_use]
    pub fn is_indexed(&self) -> bool {
        match self.indexed {
            Some(indexed) => indexed,
            None => self.prefix().is_some(),
        }
    }
}

/// Configuration for [`unserialize`](crate::unserialize).
///
/// # Examples
///
/// ```rust
/// use serde_urlquery::{QueryValue, SplitValues, UnserializeOptions};
///
/// let options = UnserializeOptions::new();
/// assert_eq!(options.empty, QueryValue::Bool(true));
///
/// let options = UnserializeOptions::new()
///     .with_empty("")
///     .with_split_values(SplitValues::Comma);
/// assert_eq!(options.empty, QueryValue::from(""));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UnserializeOptions {
    /// Keep keys and values exactly as written (no decoding, no `+` to space).
    pub raw: bool,
    /// Value given to a parameter with no `=` (e.g. `?foo&bar`).
    pub empty: QueryValue,
    /// Keep bracketed keys flat instead of building nested objects.
    pub shallow: bool,
    /// Split values into arrays.
    pub split_values: SplitValues,
    /// Most objects a single bracketed key may open. Segments past this
    /// depth stay together as one literal key on the deepest object.
    pub max_depth: usize,
}

/// Default for [`UnserializeOptions::max_depth`], the same limit PHP applies
/// through `max_input_nesting_level`.
pub const DEFAULT_MAX_DEPTH: usize = 64;

impl Default for UnserializeOptions {
    fn default() -> Self {
        UnserializeOptions {
            raw: false,
            empty: QueryValue::Bool(true),
            shallow: false,
            split_values: SplitValues::None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl UnserializeOptions {
    /// Creates default options (decoding on, `empty` is `true`, nested output).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables (or re-enables) percent-decoding.
    #[must_use]
    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Sets the value used for parameters written without `=`.
    #[must_use]
    pub fn with_empty(mut self, empty: impl Into<QueryValue>) -> Self {
        self.empty = empty.into();
        self
    }

    /// Keeps bracketed keys flat.
    #[must_use]
    pub fn with_shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }

    /// Sets the value splitting rule. Accepts a [`SplitValues`], a `bool`
    /// (`true` splits on commas) or a compiled [`Regex`].
    #[must_use]
    pub fn with_split_values(mut self, split_values: impl Into<SplitValues>) -> Self {
        self.split_values = split_values.into();
        self
    }

    /// Limits how deep bracketed keys may nest.
    ///
    /// ```rust
    /// use serde_urlquery::{query, unserialize, QueryValue, UnserializeOptions};
    ///
    /// let options = UnserializeOptions::new().with_max_depth(2);
    /// let map = unserialize("a[b][c][d]=1", &options);
    /// assert_eq!(QueryValue::Object(map), query!({ "a": { "b": { "c[d]": "1" } } }));
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
