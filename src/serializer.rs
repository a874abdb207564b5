//! The format-agnostic serializer interface.
//!
//! A [`Serializer`] owns one document tree and a cursor into it. Every named
//! operation is addressed at the frame currently open on top of the cursor:
//!
//! - in an object frame (the root, or an entry) `name` selects a member
//! - in an array frame `name` is ignored; setters append a new element and
//!   getters read the element at the current position
//!
//! Entries and arrays are opened with `set_entry`/`open_entry` and
//! `set_array`/`open_array`, and must be closed with the matching
//! `close_entry`/`close_array` before the document can be compiled.
//!
//! The trait is object safe, so aggregate code can be written against
//! `&mut dyn Serializer`.

use crate::Result;

pub trait Serializer {
    // Document

    /// Replaces the document with one parsed from `text`. On failure the
    /// current document and cursor are left untouched.
    fn parse_text(&mut self, text: &str) -> Result<()>;

    /// Drops the document, the cursor state and the compiled buffer.
    fn clear(&mut self);

    /// Renders the document as compact text into the internal buffer.
    fn compile(&mut self) -> Result<()>;

    /// Renders the document as indented text into the internal buffer.
    fn compile_pretty(&mut self) -> Result<()>;

    /// Byte size of the compiled buffer.
    fn size(&self) -> usize;

    /// Character count of the compiled buffer.
    fn length(&self) -> usize;

    /// Owned copy of the compiled buffer.
    fn text(&self) -> String;

    /// Number of frames open above the root.
    fn depth(&self) -> usize;

    // Entries

    /// Creates a versioned entry and opens it.
    fn set_entry(&mut self, name: &str, version: u64) -> Result<()>;

    /// Opens an existing entry and returns its version tag.
    fn open_entry(&mut self, name: &str) -> Result<u64>;

    fn close_entry(&mut self) -> Result<()>;

    fn is_entry(&self, name: &str) -> bool;

    // Leaves

    fn set_bool(&mut self, name: &str, value: bool) -> Result<()>;
    fn is_bool(&self, name: &str) -> bool;
    fn get_bool(&self, name: &str) -> Result<bool>;

    fn set_i32(&mut self, name: &str, value: i32) -> Result<()>;
    fn is_i32(&self, name: &str) -> bool;
    fn get_i32(&self, name: &str) -> Result<i32>;

    fn set_u32(&mut self, name: &str, value: u32) -> Result<()>;
    fn is_u32(&self, name: &str) -> bool;
    fn get_u32(&self, name: &str) -> Result<u32>;

    fn set_i64(&mut self, name: &str, value: i64) -> Result<()>;
    fn is_i64(&self, name: &str) -> bool;
    fn get_i64(&self, name: &str) -> Result<i64>;

    fn set_u64(&mut self, name: &str, value: u64) -> Result<()>;
    fn is_u64(&self, name: &str) -> bool;
    fn get_u64(&self, name: &str) -> Result<u64>;

    fn set_f64(&mut self, name: &str, value: f64) -> Result<()>;
    fn is_f64(&self, name: &str) -> bool;
    fn get_f64(&self, name: &str) -> Result<f64>;

    fn set_string(&mut self, name: &str, value: &str) -> Result<()>;
    fn is_string(&self, name: &str) -> bool;
    /// Number of characters in the string.
    fn string_length(&self, name: &str) -> Result<usize>;
    /// Number of UTF-8 bytes in the string.
    fn string_size(&self, name: &str) -> Result<usize>;
    fn get_string(&self, name: &str) -> Result<String>;

    fn set_null(&mut self, name: &str) -> Result<()>;
    fn is_null(&self, name: &str) -> bool;

    // Arrays

    /// Creates an empty array and opens it at position 0.
    fn set_array(&mut self, name: &str) -> Result<()>;

    /// Pre-allocates room for `capacity` elements.
    ///
    /// In an object frame this reserves the array member `name`. In an array
    /// frame `name` is ignored and the reservation applies to the open array
    /// itself, the one the following appends go to. It never addresses the
    /// element at the current position, unlike [`array_len`](Self::array_len)
    /// and the other reads.
    fn reserve_array(&mut self, name: &str, capacity: usize) -> Result<()>;

    fn is_array(&self, name: &str) -> bool;

    /// Opens an existing array at position 0.
    fn open_array(&mut self, name: &str) -> Result<()>;

    /// Number of elements of an array.
    ///
    /// Addressed like every read: the member `name` in an object frame, the
    /// element at the current position in an array frame. Inside an array
    /// frame this is the length of a nested array, not of the open one. See
    /// [`reserve_array`](Self::reserve_array) for the write-side counterpart.
    fn array_len(&self, name: &str) -> Result<usize>;

    /// Whether [`move_array`](Serializer::move_array) would succeed.
    fn can_move_array(&self) -> bool;

    /// Advances the open array to its next element. Returns `false` and stays
    /// put at the last element.
    fn move_array(&mut self) -> bool;

    fn close_array(&mut self) -> Result<()>;
}
