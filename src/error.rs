//! Error types for document navigation, compilation and parsing.
//!
//! Every fallible operation of the crate returns [`Result`]. The variants fall
//! into a small number of categories:
//!
//! - **Lookup failures**: a named member or the array element at the current
//!   position does not exist ([`Error::NotFound`])
//! - **Type mismatches**: a value exists but has a different type
//!   ([`Error::TypeMismatch`])
//! - **Versioning**: an entry carries no version tag ([`Error::MissingVersion`])
//!   or a reader rejected the tag it found ([`Error::VersionMismatch`])
//! - **Structural misuse**: unbalanced or mismatched open/close calls, writes
//!   to the reserved version key ([`Error::Structural`], [`Error::ReservedKey`])
//! - **Parse failures**: malformed JSON text with line/column information
//!   ([`Error::Syntax`])
//!
//! ## Examples
//!
//! ```rust
//! use versioned_json::{Error, JsonSerializer, Serializer};
//!
//! let mut serializer = JsonSerializer::new();
//! serializer.set_string("name", "Alice").unwrap();
//!
//! match serializer.get_i32("name") {
//!     Err(Error::TypeMismatch { expected, found }) => {
//!         assert_eq!(expected, "int32");
//!         assert_eq!(found, "string");
//!     }
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by a [`Serializer`](crate::Serializer).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error while reading or writing compiled text
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed JSON text
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// Input bytes are not valid UTF-8
    #[error("Input is not valid UTF-8 (first invalid byte at offset {0})")]
    InvalidUtf8(usize),

    /// Nesting in parsed text exceeds the configured limit
    #[error("Nesting depth limit of {0} exceeded")]
    DepthLimitExceeded(usize),

    /// Named member or array element does not exist
    #[error("No value named '{name}' in the current context")]
    NotFound { name: String },

    /// Stored value exists but has another type
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Object opened as an entry has no version tag
    #[error("Entry '{name}' has no version tag")]
    MissingVersion { name: String },

    /// Entry was written with a schema version the reader does not understand
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u64, found: u64 },

    /// Open/close calls are unbalanced or addressed at the wrong frame kind
    #[error("Structural misuse: {0}")]
    Structural(String),

    /// Attempt to write the hidden version member directly
    #[error("'{}' is reserved for entry versions", crate::VERSION_KEY)]
    ReservedKey,

    /// NaN or infinity found while non-finite literals are disabled
    #[error("Cannot encode non-finite float {0} as strict JSON")]
    NonFiniteFloat(f64),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use versioned_json::Error;
    ///
    /// let err = Error::syntax(3, 7, "expected ':'");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a lookup failure for `name`.
    pub fn not_found(name: &str) -> Self {
        Error::NotFound {
            name: name.to_string(),
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use versioned_json::Error;
    ///
    /// let err = Error::type_mismatch("bool", "string");
    /// assert!(err.to_string().contains("expected bool"));
    /// ```
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Error::TypeMismatch { expected, found }
    }

    /// Creates a structural misuse error.
    pub fn structural(msg: &str) -> Self {
        Error::Structural(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for errors caused by malformed input text.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::Syntax { .. } | Error::InvalidUtf8(_) | Error::DepthLimitExceeded(_)
        )
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::not_found("hola").to_string(),
            "No value named 'hola' in the current context"
        );
        assert_eq!(
            Error::VersionMismatch {
                expected: 2,
                found: 1
            }
            .to_string(),
            "Version mismatch: expected 2, found 1"
        );
        assert!(Error::ReservedKey.to_string().contains("__VERSION__"));
    }

    #[test]
    fn test_parse_error_classification() {
        assert!(Error::syntax(1, 1, "x").is_parse_error());
        assert!(Error::InvalidUtf8(4).is_parse_error());
        assert!(Error::DepthLimitExceeded(512).is_parse_error());
        assert!(!Error::ReservedKey.is_parse_error());
        assert!(!Error::not_found("a").is_parse_error());
    }
}
