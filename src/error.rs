//! Error types for the serde bridge.
//!
//! The codec itself ([`serialize`](crate::serialize) and
//! [`unserialize`](crate::unserialize)) never fails: malformed query strings
//! are coerced best-effort. Errors only appear when converting between typed
//! Rust data and [`QueryValue`](crate::QueryValue):
//!
//! - **Type Mismatches**: a query value could not become the requested Rust type
//! - **Invalid Numbers**: a string value did not parse as the requested number
//! - **Map Keys**: a map key did not serialize to a string-like value
//! - **I/O Errors**: reader/writer failures in `from_reader`/`to_writer`
//!
//! ## Examples
//!
//! ```rust
//! use serde_urlquery::{from_str, Error};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug)]
//! struct Page { page: u32 }
//!
//! let result: Result<Page, Error> = from_str("page=first");
//! assert!(result.is_err());
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while converting between
/// Rust values and query data.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Value present but of the wrong shape for the requested type
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// String value that does not parse as the requested number
    #[error("Invalid number {value:?}: expected {expected}")]
    InvalidNumber { value: String, expected: String },

    /// Map key that cannot be rendered as a query key
    #[error("Map key must be a string, integer, char or bool, found {0}")]
    KeyMustBeAString(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_urlquery::Error;
    ///
    /// let err = Error::type_mismatch("integer", "array");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an invalid number error for a string that failed to parse.
    pub fn invalid_number(value: &str, expected: &str) -> Self {
        Error::InvalidNumber {
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Creates an error for a map key with no query-string rendering.
    pub fn key_must_be_a_string(found: &str) -> Self {
        Error::KeyMustBeAString(found.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_urlquery::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
