//! # versioned_json
//!
//! A schema-versioned document serialization engine with a JSON backend.
//!
//! ## Overview
//!
//! A [`Serializer`] owns a tree of named entries, arrays and typed leaves,
//! and a cursor that walks it. Callers open containers, write or read values
//! addressed at whatever is open, and close the containers again:
//!
//! - **Entries** are objects tagged with a schema version under the hidden
//!   member `"__VERSION__"`, so readers can evolve with their data
//! - **Arrays** switch the cursor into positional mode: names are ignored,
//!   writes append and reads walk the elements with
//!   [`move_array`](Serializer::move_array)
//! - **Leaves** are bool, 32/64-bit signed and unsigned integers, doubles,
//!   strings and null
//!
//! [`JsonSerializer`] compiles the tree to compact or indented JSON and parses
//! it back. Every value round-trips exactly, including NaN, the infinities,
//! `-0.0` and strings holding NUL or other control characters.
//!
//! ## Quick Start
//!
//! ```rust
//! use versioned_json::{JsonSerializer, Serializer};
//!
//! let mut writer = JsonSerializer::new();
//! writer.set_entry("settings", 2).unwrap();
//! writer.set_f64("volume", 0.75).unwrap();
//! writer.set_array("recent").unwrap();
//! writer.set_string("", "intro.ogg").unwrap();
//! writer.set_string("", "theme.ogg").unwrap();
//! writer.close_array().unwrap();
//! writer.close_entry().unwrap();
//! writer.compile().unwrap();
//!
//! let mut reader = JsonSerializer::new();
//! reader.parse_text(writer.as_text()).unwrap();
//! assert_eq!(reader.open_entry("settings").unwrap(), 2);
//! assert_eq!(reader.get_f64("volume").unwrap(), 0.75);
//!
//! let mut recent = Vec::new();
//! reader.open_array("recent").unwrap();
//! loop {
//!     recent.push(reader.get_string("").unwrap());
//!     if !reader.move_array() {
//!         break;
//!     }
//! }
//! reader.close_array().unwrap();
//! reader.close_entry().unwrap();
//! assert_eq!(recent, ["intro.ogg", "theme.ogg"]);
//! ```
//!
//! ## Aggregates
//!
//! Types implementing [`Serializable`] describe their own layout and can be
//! written with [`to_string`] and read with [`from_str`]:
//!
//! ```rust
//! use versioned_json::{check_version, from_str, to_string, Result, Serializable, Serializer};
//!
//! #[derive(Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! impl Serializable for Point {
//!     fn serialize<S: Serializer + ?Sized>(&self, s: &mut S, name: &str) -> Result<()> {
//!         s.set_entry(name, 0)?;
//!         s.set_i32("x", self.x)?;
//!         s.set_i32("y", self.y)?;
//!         s.close_entry()
//!     }
//!
//!     fn deserialize<S: Serializer + ?Sized>(s: &mut S, name: &str) -> Result<Self> {
//!         check_version(0, s.open_entry(name)?)?;
//!         let point = Point { x: s.get_i32("x")?, y: s.get_i32("y")? };
//!         s.close_entry()?;
//!         Ok(point)
//!     }
//! }
//!
//! let text = to_string(&Point { x: 1, y: -2 }, "origin").unwrap();
//! assert_eq!(text, r#"{"origin":{"__VERSION__":0,"x":1,"y":-2}}"#);
//! assert_eq!(from_str::<Point>(&text, "origin").unwrap(), Point { x: 1, y: -2 });
//! ```
//!
//! ## Dynamic Values
//!
//! A document can be exported as an owned [`Value`] tree, built with the
//! [`value!`] macro and imported back:
//!
//! ```rust
//! use versioned_json::{value, JsonSerializer, Serializer};
//!
//! let serializer = JsonSerializer::from_value(value!({ "answer": 42 })).unwrap();
//! assert_eq!(serializer.get_u64("answer").unwrap(), 42);
//! assert_eq!(serializer.to_value(), value!({ "answer": 42 }));
//! ```
//!
//! ## Logging
//!
//! Rejected operations and failed parses are reported through the [`log`]
//! facade at `debug` level; compile and parse sizes at `trace`. No logger is
//! installed by this crate.
//!
//! ## Demos
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Writing and reading one entry
//! - **`linked_records.rs`** - A recursive structure through `Serializable`
//! - **`schema_versions.rs`** - Reading data written by an older schema
//! - **`dynamic_values.rs`** - Working with `Value` and the `value!` macro
//!
//! Run any demo with: `cargo run --example <name>`

mod cursor;
mod de;
pub mod document;
pub mod error;
pub mod json;
pub mod macros;
pub mod map;
pub mod options;
mod ser;
pub mod serializable;
pub mod serializer;
pub mod value;

pub use document::{Document, Node, NodeId};
pub use error::{Error, Result};
pub use json::JsonSerializer;
pub use map::ValueMap;
pub use options::JsonOptions;
pub use serializable::{check_version, deserialize, Serializable};
pub use serializer::Serializer;
pub use value::{Number, Value};

use std::io;

/// Hidden member holding the version tag of every entry.
pub const VERSION_KEY: &str = "__VERSION__";

/// Writes `value` under `name` into a fresh document and compiles it.
///
/// # Errors
///
/// Returns an error if `value` fails to serialize or leaves containers open.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T: Serializable>(value: &T, name: &str) -> Result<String> {
    to_string_with_options(value, name, JsonOptions::default())
}

/// Like [`to_string`], with indented output.
///
/// # Examples
///
/// ```rust
/// use versioned_json::to_string_pretty;
///
/// let text = to_string_pretty(&vec![1u32, 2], "ids").unwrap();
/// assert_eq!(text, "{\n    \"ids\": [\n        1,\n        2\n    ]\n}");
/// ```
///
/// # Errors
///
/// Returns an error if `value` fails to serialize or leaves containers open.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T: Serializable>(value: &T, name: &str) -> Result<String> {
    render(value, name, JsonOptions::default(), true)
}

/// Like [`to_string`], with custom options.
///
/// # Errors
///
/// Returns an error if `value` fails to serialize, leaves containers open, or
/// holds a non-finite double while the options forbid them.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T: Serializable>(
    value: &T,
    name: &str,
    options: JsonOptions,
) -> Result<String> {
    render(value, name, options, false)
}

fn render<T: Serializable>(value: &T, name: &str, options: JsonOptions, pretty: bool) -> Result<String> {
    let mut serializer = JsonSerializer::with_options(options);
    value.serialize(&mut serializer, name)?;
    if pretty {
        serializer.compile_pretty()?;
    } else {
        serializer.compile()?;
    }
    Ok(serializer.text())
}

/// Writes `value` under `name` as compact JSON to `writer`.
///
/// # Examples
///
/// ```rust
/// use versioned_json::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &true, "enabled").unwrap();
/// assert_eq!(buffer, br#"{"enabled":true}"#);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T, name: &str) -> Result<()>
where
    W: io::Write,
    T: Serializable,
{
    let text = to_string(value, name)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Parses `s` and reads a `T` from the root member `name`.
///
/// # Errors
///
/// Returns an error if the text is not a valid document or `T` cannot be read
/// from it. Syntax errors include line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T: Serializable>(s: &str, name: &str) -> Result<T> {
    from_str_with_options(s, name, JsonOptions::default())
}

/// Like [`from_str`], with custom options.
///
/// # Errors
///
/// As [`from_str`]. Text nesting deeper than the options allow fails with
/// [`Error::DepthLimitExceeded`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T: Serializable>(s: &str, name: &str, options: JsonOptions) -> Result<T> {
    let mut serializer = JsonSerializer::with_options(options);
    serializer.parse_text(s)?;
    T::deserialize(&mut serializer, name)
}

/// Like [`from_str`], starting from bytes that must be valid UTF-8.
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] for malformed bytes, otherwise as
/// [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T: Serializable>(v: &[u8], name: &str) -> Result<T> {
    let mut serializer = JsonSerializer::new();
    serializer.parse_slice(v)?;
    T::deserialize(&mut serializer, name)
}

/// Reads the whole of `reader` and parses it as with [`from_str`].
///
/// # Examples
///
/// ```rust
/// use versioned_json::from_reader;
/// use std::io::Cursor;
///
/// let input = Cursor::new(br#"{"ids":[3,1,2]}"#);
/// let ids: Vec<u64> = from_reader(input, "ids").unwrap();
/// assert_eq!(ids, [3, 1, 2]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, otherwise as [`from_slice`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R, name: &str) -> Result<T>
where
    R: io::Read,
    T: Serializable,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&bytes, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    impl Serializable for User {
        fn serialize<S: Serializer + ?Sized>(&self, s: &mut S, name: &str) -> Result<()> {
            s.set_entry(name, 1)?;
            s.set_u32("id", self.id)?;
            s.set_string("name", &self.name)?;
            s.set_bool("active", self.active)?;
            self.tags.serialize(s, "tags")?;
            s.close_entry()
        }

        fn deserialize<S: Serializer + ?Sized>(s: &mut S, name: &str) -> Result<Self> {
            check_version(1, s.open_entry(name)?)?;
            let user = User {
                id: s.get_u32("id")?,
                name: s.get_string("name")?,
                active: s.get_bool("active")?,
                tags: deserialize(s, "tags")?,
            };
            s.close_entry()?;
            Ok(user)
        }
    }

    fn alice() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        }
    }

    #[test]
    fn test_user_roundtrip() {
        let text = to_string(&alice(), "user").unwrap();
        assert_eq!(
            text,
            r#"{"user":{"__VERSION__":1,"id":123,"name":"Alice","active":true,"tags":["admin","user"]}}"#
        );
        assert_eq!(from_str::<User>(&text, "user").unwrap(), alice());
    }

    #[test]
    fn test_pretty_roundtrip() {
        let text = to_string_pretty(&alice(), "user").unwrap();
        assert!(text.contains("\n        \"tags\": [\n            \"admin\","));
        assert_eq!(from_str::<User>(&text, "user").unwrap(), alice());
    }

    #[test]
    fn test_writer_and_reader() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &alice(), "user").unwrap();
        let back: User = from_reader(buffer.as_slice(), "user").unwrap();
        assert_eq!(back, alice());
    }

    #[test]
    fn test_newer_reader_rejects_old_version() {
        let text = r#"{"user":{"__VERSION__":0,"id":1}}"#;
        assert_eq!(
            from_str::<User>(text, "user"),
            Err(Error::VersionMismatch {
                expected: 1,
                found: 0
            })
        );
    }

    #[test]
    fn test_strict_options() {
        let strict = JsonOptions::strict();
        assert!(matches!(
            to_string_with_options(&f64::NAN, "x", strict.clone()),
            Err(Error::NonFiniteFloat(_))
        ));
        assert_eq!(to_string_with_options(&1.5f64, "x", strict).unwrap(), r#"{"x":1.5}"#);
    }

    #[test]
    fn test_from_slice_rejects_bad_utf8() {
        assert_eq!(
            from_slice::<bool>(b"{\"a\":\xc3}", "a"),
            Err(Error::InvalidUtf8(5))
        );
    }
}
