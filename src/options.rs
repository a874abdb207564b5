//! Configuration options for compiling and parsing documents.
//!
//! ## Examples
//!
//! ```rust
//! use versioned_json::{JsonOptions, JsonSerializer, Serializer};
//!
//! // Two-space indentation for pretty output
//! let mut serializer = JsonSerializer::with_options(JsonOptions::new().with_indent(2));
//! serializer.set_i32("x", 1).unwrap();
//! serializer.compile_pretty().unwrap();
//! assert_eq!(serializer.as_text(), "{\n  \"x\": 1\n}");
//!
//! // Strict JSON: NaN and infinities are rejected
//! let mut strict = JsonSerializer::with_options(JsonOptions::strict());
//! strict.set_f64("x", f64::NAN).unwrap();
//! assert!(strict.compile().is_err());
//! ```

/// Configuration options for a [`JsonSerializer`](crate::JsonSerializer).
///
/// Controls the indentation of pretty output, whether the non-standard
/// literals `NaN`, `Infinity` and `-Infinity` are written and accepted, and
/// how deeply nested parsed text may be.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonOptions {
    pub indent: usize,
    pub allow_non_finite: bool,
    pub max_depth: usize,
}

impl Default for JsonOptions {
    fn default() -> Self {
        JsonOptions {
            indent: 4,
            allow_non_finite: true,
            max_depth: 512,
        }
    }
}

impl JsonOptions {
    /// Creates default options (4-space indent, non-finite literals enabled,
    /// depth limit 512).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use versioned_json::JsonOptions;
    ///
    /// let options = JsonOptions::new();
    /// assert_eq!(options.indent, 4);
    /// assert!(options.allow_non_finite);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that only produce and accept RFC 8259 JSON.
    #[must_use]
    pub fn strict() -> Self {
        JsonOptions {
            allow_non_finite: false,
            ..Default::default()
        }
    }

    /// Sets the number of spaces per nesting level in pretty output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enables or disables the `NaN`/`Infinity`/`-Infinity` literals.
    #[must_use]
    pub fn with_non_finite(mut self, allow: bool) -> Self {
        self.allow_non_finite = allow;
        self
    }

    /// Sets the maximum container nesting accepted by the parser.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
