//! Document compilation.
//!
//! Renders a [`Document`] as JSON text, either compact (no insignificant
//! whitespace) or pretty (one member or element per line, indented by
//! [`JsonOptions::indent`] spaces per level).
//!
//! Doubles are written in the shortest form that parses back to the same
//! bits, always with a `.` or an exponent so they are read back as doubles
//! and not as integers. NaN and the infinities are written as the literals
//! `NaN`, `Infinity` and `-Infinity` unless the options forbid them.
//!
//! ```rust
//! use versioned_json::{JsonSerializer, Serializer};
//!
//! let mut serializer = JsonSerializer::new();
//! serializer.set_f64("ratio", 1.0).unwrap();
//! serializer.set_f64("limit", f64::INFINITY).unwrap();
//! serializer.compile().unwrap();
//! assert_eq!(serializer.as_text(), r#"{"ratio":1.0,"limit":Infinity}"#);
//! ```

use crate::document::{Document, Node, NodeId};
use crate::{Error, JsonOptions, Number, Result};

/// Writes a document into a string buffer.
pub(crate) struct Compiler<'a> {
    document: &'a Document,
    options: &'a JsonOptions,
    output: String,
    pretty: bool,
    indent_level: usize,
    depth: usize,
}

impl<'a> Compiler<'a> {
    pub(crate) fn new(document: &'a Document, options: &'a JsonOptions, pretty: bool) -> Self {
        Compiler {
            document,
            options,
            output: String::with_capacity(256),
            pretty,
            indent_level: 0,
            depth: 0,
        }
    }

    /// Renders the subtree rooted at `id`.
    pub(crate) fn compile(mut self, id: NodeId) -> Result<String> {
        self.write_node(id)?;
        Ok(self.output)
    }

    fn write_newline(&mut self) {
        if self.pretty {
            self.output.push('\n');
            for _ in 0..self.indent_level * self.options.indent {
                self.output.push(' ');
            }
        }
    }

    /// Same limit and counting as the parser, so compiled text always parses
    /// back under the same options.
    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            log::debug!("refusing to compile past depth {}", self.options.max_depth);
            return Err(Error::DepthLimitExceeded(self.options.max_depth));
        }
        Ok(())
    }

    fn write_node(&mut self, id: NodeId) -> Result<()> {
        let document = self.document;
        match document.node(id) {
            Node::Null => self.output.push_str("null"),
            Node::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Node::Number(n) => self.write_number(*n)?,
            Node::String(s) => write_escaped(&mut self.output, s),
            Node::Array(elements) => {
                self.enter()?;
                if elements.is_empty() {
                    self.output.push_str("[]");
                    self.depth -= 1;
                    return Ok(());
                }
                self.output.push('[');
                self.indent_level += 1;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.output.push(',');
                    }
                    self.write_newline();
                    self.write_node(*element)?;
                }
                self.indent_level -= 1;
                self.write_newline();
                self.output.push(']');
                self.depth -= 1;
            }
            Node::Object(members) => {
                self.enter()?;
                if members.is_empty() {
                    self.output.push_str("{}");
                    self.depth -= 1;
                    return Ok(());
                }
                self.output.push('{');
                self.indent_level += 1;
                for (i, (key, member)) in members.iter().enumerate() {
                    if i > 0 {
                        self.output.push(',');
                    }
                    self.write_newline();
                    write_escaped(&mut self.output, key);
                    self.output.push_str(if self.pretty { ": " } else { ":" });
                    self.write_node(*member)?;
                }
                self.indent_level -= 1;
                self.write_newline();
                self.output.push('}');
                self.depth -= 1;
            }
        }
        Ok(())
    }

    fn write_number(&mut self, number: Number) -> Result<()> {
        match number {
            Number::Int(i) => self.output.push_str(&i.to_string()),
            Number::Uint(u) => self.output.push_str(&u.to_string()),
            Number::Float(f) => {
                if !f.is_finite() && !self.options.allow_non_finite {
                    return Err(Error::NonFiniteFloat(f));
                }
                self.output.push_str(&format_f64(f));
            }
        }
        Ok(())
    }
}

/// Formats a double so that parsing the text yields the same bits.
pub(crate) fn format_f64(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        // `Debug` is the shortest round-trip form and keeps a `.0` on whole numbers
        format!("{:?}", value)
    }
}

/// Appends `s` as a quoted JSON string.
pub(crate) fn write_escaped(output: &mut String, s: &str) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '\u{0008}' => output.push_str("\\b"),
            '\u{000C}' => output.push_str("\\f"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                output.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => output.push(c),
        }
    }
    output.push('"');
}
