//! The JSON-backed [`Serializer`].
//!
//! ```rust
//! use versioned_json::{JsonSerializer, Serializer};
//!
//! let mut writer = JsonSerializer::new();
//! writer.set_entry("player", 1).unwrap();
//! writer.set_string("name", "Alice").unwrap();
//! writer.set_array("scores").unwrap();
//! for score in [10, 20, 30] {
//!     writer.set_u32("", score).unwrap();
//! }
//! writer.close_array().unwrap();
//! writer.close_entry().unwrap();
//! writer.compile().unwrap();
//! assert_eq!(
//!     writer.as_text(),
//!     r#"{"player":{"__VERSION__":1,"name":"Alice","scores":[10,20,30]}}"#
//! );
//!
//! let mut reader = JsonSerializer::new();
//! reader.parse_text(writer.as_text()).unwrap();
//! assert_eq!(reader.open_entry("player").unwrap(), 1);
//! assert_eq!(reader.get_str("name").unwrap(), "Alice");
//! ```

use crate::cursor::{Cursor, FrameMode};
use crate::de::parse_document;
use crate::document::{Document, Node, NodeId};
use crate::ser::Compiler;
use crate::{Error, JsonOptions, Number, Result, Serializer, Value, VERSION_KEY};
use indexmap::IndexMap;

/// A [`Serializer`] that compiles to and parses from JSON text.
#[derive(Clone, Debug)]
pub struct JsonSerializer {
    document: Document,
    cursor: Cursor,
    buffer: String,
    options: JsonOptions,
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonSerializer {
    /// Creates a serializer holding an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(JsonOptions::default())
    }

    #[must_use]
    pub fn with_options(options: JsonOptions) -> Self {
        let document = Document::new();
        let cursor = Cursor::new(document.root());
        JsonSerializer {
            document,
            cursor,
            buffer: String::new(),
            options,
        }
    }

    /// Builds a serializer whose document is a copy of `value`, which must be
    /// an object nesting no deeper than the default
    /// [`max_depth`](JsonOptions::max_depth).
    ///
    /// ```rust
    /// use versioned_json::{value, JsonSerializer, Serializer};
    ///
    /// let mut serializer = JsonSerializer::from_value(value!({
    ///     "config": { "__VERSION__": 3, "verbose": true }
    /// }))
    /// .unwrap();
    /// assert_eq!(serializer.open_entry("config").unwrap(), 3);
    /// assert!(serializer.get_bool("verbose").unwrap());
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        let options = JsonOptions::default();
        match value {
            Value::Object(members) => {
                let document = Document::from_members(members);
                if document.depth(document.root()) > options.max_depth {
                    return Err(Error::DepthLimitExceeded(options.max_depth));
                }
                let cursor = Cursor::new(document.root());
                Ok(JsonSerializer {
                    document,
                    cursor,
                    buffer: String::new(),
                    options,
                })
            }
            other => Err(Error::type_mismatch("object", other.kind())),
        }
    }

    #[must_use]
    pub fn options(&self) -> &JsonOptions {
        &self.options
    }

    /// The document tree. Node ids stay valid until the next `clear` or
    /// successful parse.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Exports the whole document as an owned [`Value`].
    #[must_use]
    pub fn to_value(&self) -> Value {
        self.document.to_value(self.document.root())
    }

    /// Borrows the compiled buffer.
    #[must_use]
    pub fn as_text(&self) -> &str {
        &self.buffer
    }

    /// Borrowing variant of [`Serializer::get_string`].
    pub fn get_str(&self, name: &str) -> Result<&str> {
        let id = self.target(name)?;
        match self.document.node(id) {
            Node::String(s) => Ok(s),
            other => Err(Error::type_mismatch("string", other.kind())),
        }
    }

    /// Like [`Serializer::parse_text`] but starts from raw bytes, which must be
    /// valid UTF-8.
    pub fn parse_slice(&mut self, bytes: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            log::debug!("rejected input: invalid UTF-8 at byte {}", e.valid_up_to());
            Error::InvalidUtf8(e.valid_up_to())
        })?;
        self.parse_text(text)
    }

    /// Position of the array open on top of the cursor, if any.
    #[must_use]
    pub fn array_position(&self) -> Option<usize> {
        match self.cursor.top().mode {
            FrameMode::Array { position } => Some(position),
            FrameMode::Object => None,
        }
    }

    /// Resolves `name` to an existing node for reading.
    fn target(&self, name: &str) -> Result<NodeId> {
        let frame = self.cursor.top();
        match frame.mode {
            FrameMode::Object => self
                .document
                .member(frame.node, name)
                .ok_or_else(|| Error::not_found(name)),
            FrameMode::Array { position } => self
                .document
                .element(frame.node, position)
                .ok_or_else(|| Error::not_found(&format!("[{}]", position))),
        }
    }

    /// Name used in error messages for the node `name` addresses.
    fn label(&self, name: &str) -> String {
        match self.cursor.top().mode {
            FrameMode::Object => name.to_string(),
            FrameMode::Array { position } => format!("[{}]", position),
        }
    }

    /// Stores `node` where `name` addresses: appended in an array frame,
    /// inserted or replaced in an object frame.
    fn place(&mut self, name: &str, node: Node) -> Result<NodeId> {
        let frame = self.cursor.top();
        match frame.mode {
            FrameMode::Object => {
                if name == VERSION_KEY {
                    return Err(Error::ReservedKey);
                }
                self.document.insert_member(frame.node, name, node)
            }
            FrameMode::Array { .. } => self.document.push_element(frame.node, node),
        }
    }

    /// Fails when a container written at the cursor would nest deeper than
    /// the parser accepts. The root object counts as the first level.
    fn check_nesting(&self) -> Result<()> {
        if self.cursor.depth() + 2 > self.options.max_depth {
            log::debug!(
                "rejected container at depth {}: limit is {}",
                self.cursor.depth() + 2,
                self.options.max_depth
            );
            return Err(Error::DepthLimitExceeded(self.options.max_depth));
        }
        Ok(())
    }

    fn set_number(&mut self, name: &str, number: Number) -> Result<()> {
        self.place(name, Node::Number(number)).map(|_| ())
    }

    fn read<T>(
        &self,
        name: &str,
        expected: &'static str,
        convert: impl FnOnce(&Node) -> Option<T>,
    ) -> Result<T> {
        let node = self.document.node(self.target(name)?);
        convert(node).ok_or_else(|| Error::type_mismatch(expected, node.kind()))
    }

    fn read_number<T>(
        &self,
        name: &str,
        expected: &'static str,
        convert: impl FnOnce(Number) -> Option<T>,
    ) -> Result<T> {
        self.read(name, expected, |node| node.as_number().and_then(convert))
    }

    fn node_is(&self, name: &str, test: impl FnOnce(&Node) -> bool) -> bool {
        self.target(name)
            .map(|id| test(self.document.node(id)))
            .unwrap_or(false)
    }

    fn node_is_number(&self, name: &str, test: impl FnOnce(Number) -> bool) -> bool {
        self.node_is(name, |node| node.as_number().map_or(false, test))
    }

    fn render(&mut self, pretty: bool) -> Result<()> {
        if self.cursor.depth() != 0 {
            log::debug!(
                "refusing to compile with {} frame(s) still open",
                self.cursor.depth()
            );
            return Err(Error::structural(&format!(
                "cannot compile with {} open frame(s)",
                self.cursor.depth()
            )));
        }
        let output = Compiler::new(&self.document, &self.options, pretty)
            .compile(self.document.root())?;
        log::trace!("compiled document into {} bytes (pretty: {})", output.len(), pretty);
        self.buffer = output;
        Ok(())
    }
}

impl Serializer for JsonSerializer {
    fn parse_text(&mut self, text: &str) -> Result<()> {
        match parse_document(text, &self.options) {
            Ok(document) => {
                log::trace!("parsed {} bytes into {} nodes", text.len(), document.node_count());
                self.document = document;
                self.cursor.reset(self.document.root());
                Ok(())
            }
            Err(e) => {
                log::debug!("parse failed, keeping previous document: {}", e);
                Err(e)
            }
        }
    }

    fn clear(&mut self) {
        self.document = Document::new();
        self.cursor.reset(self.document.root());
        self.buffer.clear();
    }

    fn compile(&mut self) -> Result<()> {
        self.render(false)
    }

    fn compile_pretty(&mut self) -> Result<()> {
        self.render(true)
    }

    fn size(&self) -> usize {
        self.buffer.len()
    }

    fn length(&self) -> usize {
        self.buffer.chars().count()
    }

    fn text(&self) -> String {
        self.buffer.clone()
    }

    fn depth(&self) -> usize {
        self.cursor.depth()
    }

    fn set_entry(&mut self, name: &str, version: u64) -> Result<()> {
        self.check_nesting()?;
        let entry = self.place(name, Node::Object(IndexMap::new()))?;
        self.document
            .insert_member(entry, VERSION_KEY, Node::Number(Number::Uint(version)))?;
        self.cursor.push_object(entry);
        Ok(())
    }

    fn open_entry(&mut self, name: &str) -> Result<u64> {
        let id = self.target(name)?;
        let node = self.document.node(id);
        if !matches!(node, Node::Object(_)) {
            return Err(Error::type_mismatch("entry", node.kind()));
        }
        let version = self.document.version(id).ok_or_else(|| Error::MissingVersion {
            name: self.label(name),
        })?;
        self.cursor.push_object(id);
        Ok(version)
    }

    fn close_entry(&mut self) -> Result<()> {
        self.cursor.pop_object().map(|_| ())
    }

    fn is_entry(&self, name: &str) -> bool {
        self.target(name)
            .map(|id| self.document.version(id).is_some())
            .unwrap_or(false)
    }

    fn set_bool(&mut self, name: &str, value: bool) -> Result<()> {
        self.place(name, Node::Bool(value)).map(|_| ())
    }

    fn is_bool(&self, name: &str) -> bool {
        self.node_is(name, |node| matches!(node, Node::Bool(_)))
    }

    fn get_bool(&self, name: &str) -> Result<bool> {
        self.read(name, "bool", |node| match node {
            Node::Bool(b) => Some(*b),
            _ => None,
        })
    }

    fn set_i32(&mut self, name: &str, value: i32) -> Result<()> {
        self.set_number(name, Number::from(value))
    }

    fn is_i32(&self, name: &str) -> bool {
        self.node_is_number(name, |n| n.as_i32().is_some())
    }

    fn get_i32(&self, name: &str) -> Result<i32> {
        self.read_number(name, "int32", |n| n.as_i32())
    }

    fn set_u32(&mut self, name: &str, value: u32) -> Result<()> {
        self.set_number(name, Number::from(value))
    }

    fn is_u32(&self, name: &str) -> bool {
        self.node_is_number(name, |n| n.as_u32().is_some())
    }

    fn get_u32(&self, name: &str) -> Result<u32> {
        self.read_number(name, "uint32", |n| n.as_u32())
    }

    fn set_i64(&mut self, name: &str, value: i64) -> Result<()> {
        self.set_number(name, Number::from(value))
    }

    fn is_i64(&self, name: &str) -> bool {
        self.node_is_number(name, |n| n.as_i64().is_some())
    }

    fn get_i64(&self, name: &str) -> Result<i64> {
        self.read_number(name, "int64", |n| n.as_i64())
    }

    fn set_u64(&mut self, name: &str, value: u64) -> Result<()> {
        self.set_number(name, Number::from(value))
    }

    fn is_u64(&self, name: &str) -> bool {
        self.node_is_number(name, |n| n.as_u64().is_some())
    }

    fn get_u64(&self, name: &str) -> Result<u64> {
        self.read_number(name, "uint64", |n| n.as_u64())
    }

    fn set_f64(&mut self, name: &str, value: f64) -> Result<()> {
        self.set_number(name, Number::Float(value))
    }

    fn is_f64(&self, name: &str) -> bool {
        self.node_is_number(name, |n| n.is_float())
    }

    fn get_f64(&self, name: &str) -> Result<f64> {
        self.read_number(name, "double", |n| n.as_f64())
    }

    fn set_string(&mut self, name: &str, value: &str) -> Result<()> {
        self.place(name, Node::String(value.to_string())).map(|_| ())
    }

    fn is_string(&self, name: &str) -> bool {
        self.node_is(name, |node| matches!(node, Node::String(_)))
    }

    fn string_length(&self, name: &str) -> Result<usize> {
        self.get_str(name).map(|s| s.chars().count())
    }

    fn string_size(&self, name: &str) -> Result<usize> {
        self.get_str(name).map(str::len)
    }

    fn get_string(&self, name: &str) -> Result<String> {
        self.get_str(name).map(str::to_string)
    }

    fn set_null(&mut self, name: &str) -> Result<()> {
        self.place(name, Node::Null).map(|_| ())
    }

    fn is_null(&self, name: &str) -> bool {
        self.node_is(name, |node| matches!(node, Node::Null))
    }

    fn set_array(&mut self, name: &str) -> Result<()> {
        self.check_nesting()?;
        let array = self.place(name, Node::Array(Vec::new()))?;
        self.cursor.push_array(array);
        Ok(())
    }

    fn reserve_array(&mut self, name: &str, capacity: usize) -> Result<()> {
        let frame = self.cursor.top();
        let array = match frame.mode {
            FrameMode::Array { .. } => frame.node,
            FrameMode::Object => self.target(name)?,
        };
        self.document.reserve(array, capacity)
    }

    fn is_array(&self, name: &str) -> bool {
        self.node_is(name, |node| matches!(node, Node::Array(_)))
    }

    fn open_array(&mut self, name: &str) -> Result<()> {
        let id = self.target(name)?;
        let node = self.document.node(id);
        if !matches!(node, Node::Array(_)) {
            return Err(Error::type_mismatch("array", node.kind()));
        }
        self.cursor.push_array(id);
        Ok(())
    }

    fn array_len(&self, name: &str) -> Result<usize> {
        let id = self.target(name)?;
        self.document
            .array_len(id)
            .ok_or_else(|| Error::type_mismatch("array", self.document.node(id).kind()))
    }

    fn can_move_array(&self) -> bool {
        let frame = self.cursor.top();
        match frame.mode {
            FrameMode::Array { position } => self
                .document
                .array_len(frame.node)
                .map_or(false, |len| position + 1 < len),
            FrameMode::Object => false,
        }
    }

    fn move_array(&mut self) -> bool {
        match self.array_position() {
            Some(position) if self.can_move_array() => self.cursor.set_position(position + 1),
            _ => false,
        }
    }

    fn close_array(&mut self) -> Result<()> {
        self.cursor.pop_array().map(|_| ())
    }
}
