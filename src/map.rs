//! Ordered map type for query objects.
//!
//! [`QueryMap`] wraps [`IndexMap`] so that parameters come back out of
//! [`serialize`](crate::serialize) in the order they went in, and so that
//! [`unserialize`](crate::unserialize) reports keys in encounter order.
//!
//! ## Examples
//!
//! ```rust
//! use serde_urlquery::{QueryMap, QueryValue};
//!
//! let mut map = QueryMap::new();
//! map.insert("name".to_string(), QueryValue::from("Alice"));
//! map.insert("page".to_string(), QueryValue::from(2));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::QueryValue;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An insertion-ordered map of string keys to query values.
///
/// # Examples
///
/// ```rust
/// use serde_urlquery::{QueryMap, QueryValue};
///
/// let mut map = QueryMap::new();
/// map.insert("first".to_string(), QueryValue::from(1));
/// map.insert("second".to_string(), QueryValue::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryMap(IndexMap<String, QueryValue>);

impl QueryMap {
    /// Creates an empty `QueryMap`.
    #[must_use]
    pub fn new() -> Self {
        QueryMap(IndexMap::new())
    }

    /// Creates an empty `QueryMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        QueryMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// A repeated key keeps its original position and returns the old value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_urlquery::{QueryMap, QueryValue};
    ///
    /// let mut map = QueryMap::new();
    /// assert!(map.insert("key".to_string(), QueryValue::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), QueryValue::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: QueryValue) -> Option<QueryValue> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut QueryValue> {
        self.0.get_mut(key)
    }

    /// Returns the value for `key`, inserting `default()` first if absent.
    pub fn get_or_insert_with<F>(&mut self, key: String, default: F) -> &mut QueryValue
    where
        F: FnOnce() -> QueryValue,
    {
        self.0.entry(key).or_insert_with(default)
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        self.0.shift_remove(key)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, QueryValue> {
        self.0.keys()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, QueryValue> {
        self.0.iter()
    }
}

impl IntoIterator for QueryMap {
    type Item = (String, QueryValue);
    type IntoIter = indexmap::map::IntoIter<String, QueryValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryMap {
    type Item = (&'a String, &'a QueryValue);
    type IntoIter = indexmap::map::Iter<'a, String, QueryValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, QueryValue)> for QueryMap {
    fn from_iter<T: IntoIterator<Item = (String, QueryValue)>>(iter: T) -> Self {
        QueryMap(IndexMap::from_iter(iter))
    }
}

impl<'de> Deserialize<'de> for QueryMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match QueryValue::deserialize(deserializer)? {
            QueryValue::Object(map) => Ok(map),
            other => Err(serde::de::Error::custom(format!(
                "expected object, found {}",
                other.kind()
            ))),
        }
    }
}

impl Serialize for QueryMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_insert_with() {
        let mut map = QueryMap::new();
        map.get_or_insert_with("a".to_string(), || QueryValue::from(1));
        map.get_or_insert_with("a".to_string(), || QueryValue::from(2));
        assert_eq!(map.get("a"), Some(&QueryValue::from(1)));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: QueryMap = ["a", "b", "c"]
            .iter()
            .map(|k| (k.to_string(), QueryValue::Null))
            .collect();
        map.remove("b");
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }
}
