/// Builds a [`QueryValue`](crate::QueryValue) from JSON-like syntax.
///
/// ```rust
/// use serde_urlquery::{query, serialize, SerializeOptions};
///
/// let data = query!({ "foo": { "bar": ["one", "two"] } });
/// assert_eq!(
///     serialize(&data, &SerializeOptions::new()),
///     "foo[bar][]=one&foo[bar][]=two"
/// );
/// ```
///
/// `query!(? "...")` parses a query-string literal with default
/// [`UnserializeOptions`](crate::UnserializeOptions):
///
/// ```rust
/// use serde_urlquery::query;
///
/// assert_eq!(query!(? "?a[b]=1&c"), query!({ "a": { "b": "1" }, "c": true }));
/// ```
///
/// Any other expression is converted with [`to_value`](crate::to_value).
/// A value that cannot be represented (such as a map with non-scalar keys)
/// becomes [`QueryValue::Null`](crate::QueryValue::Null); call `to_value`
/// directly to see the error.
#[macro_export]
macro_rules! query {
    (null) => {
        $crate::QueryValue::Null
    };

    (true) => {
        $crate::QueryValue::Bool(true)
    };

    (false) => {
        $crate::QueryValue::Bool(false)
    };

    ([]) => {
        $crate::QueryValue::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::QueryValue::Array(vec![$($crate::query!($elem)),*])
    };

    ({}) => {
        $crate::QueryValue::Object($crate::QueryMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::QueryMap::new();
        $(
            object.insert($key.to_string(), $crate::query!($value));
        )*
        $crate::QueryValue::Object(object)
    }};

    (? $query:literal) => {
        $crate::QueryValue::Object($crate::unserialize(
            $query,
            &$crate::UnserializeOptions::new(),
        ))
    };

    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::QueryValue::Null)
    }};
}
