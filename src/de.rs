//! Document parsing.
//!
//! A single-pass recursive descent parser that materializes the whole text
//! into a fresh [`Document`]. The input must be one JSON object; it becomes
//! the document root. Beyond RFC 8259 the parser accepts the literals
//! `NaN`, `Infinity`, `-Infinity`, `Inf` and `-Inf` when
//! [`JsonOptions::allow_non_finite`] is set.
//!
//! Number lexemes without a fraction or exponent are integers (negative
//! values as [`Number::Int`], the rest as [`Number::Uint`]); everything else,
//! including integers too large for 64 bits, becomes [`Number::Float`].
//!
//! Errors carry the line and column of the offending character.

use crate::document::{Document, Node, NodeId};
use crate::{Error, JsonOptions, Number, Result};
use indexmap::IndexMap;

/// Parses `input` into a new document.
pub(crate) fn parse_document(input: &str, options: &JsonOptions) -> Result<Document> {
    let mut parser = Parser::new(input, options);
    parser.parse_root()?;
    Ok(parser.document)
}

struct Parser<'a> {
    input: &'a str,
    options: &'a JsonOptions,
    position: usize,
    line: usize,
    column: usize,
    depth: usize,
    document: Document,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: &'a JsonOptions) -> Self {
        Parser {
            input,
            options,
            position: 0,
            line: 1,
            column: 1,
            depth: 0,
            document: Document::new(),
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn error(&self, msg: &str) -> Error {
        Error::syntax(self.line, self.column, msg)
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek_char() {
            self.next_char();
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.next_char();
                Ok(())
            }
            Some(_) => Err(self.error(&format!("Expected '{}'", expected))),
            None => Err(self.error(&format!("Unexpected end of input, expected '{}'", expected))),
        }
    }

    /// Consumes `word` if the input continues with it.
    fn eat_keyword(&mut self, word: &str) -> bool {
        if self.input[self.position..].starts_with(word) {
            for _ in word.chars() {
                self.next_char();
            }
            true
        } else {
            false
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(Error::DepthLimitExceeded(self.options.max_depth));
        }
        Ok(())
    }

    fn parse_root(&mut self) -> Result<()> {
        if self.peek_char() == Some('\u{feff}') {
            self.next_char();
        }
        self.skip_whitespace();
        match self.peek_char() {
            Some('{') => {}
            Some(_) => return Err(self.error("Document root must be an object")),
            None => return Err(self.error("Empty document")),
        }
        let root = self.document.root();
        self.parse_object(root)?;

        self.skip_whitespace();
        if !self.at_end() {
            return Err(self.error("Unexpected trailing characters after document"));
        }
        Ok(())
    }

    fn parse_value(&mut self) -> Result<NodeId> {
        self.skip_whitespace();
        match self.peek_char() {
            Some('{') => {
                let id = self.document.alloc(Node::Object(IndexMap::new()));
                self.parse_object(id)?;
                Ok(id)
            }
            Some('[') => {
                let id = self.document.alloc(Node::Array(Vec::new()));
                self.parse_array(id)?;
                Ok(id)
            }
            Some('"') => {
                let s = self.parse_string()?;
                Ok(self.document.alloc(Node::String(s)))
            }
            Some('t' | 'f' | 'n') => {
                let node = if self.eat_keyword("true") {
                    Node::Bool(true)
                } else if self.eat_keyword("false") {
                    Node::Bool(false)
                } else if self.eat_keyword("null") {
                    Node::Null
                } else {
                    return Err(self.error("Invalid literal"));
                };
                Ok(self.document.alloc(node))
            }
            Some('N' | 'I' | '-' | '0'..='9') => {
                let number = self.parse_number()?;
                Ok(self.document.alloc(Node::Number(number)))
            }
            Some(ch) => Err(self.error(&format!("Unexpected character '{}'", ch.escape_debug()))),
            None => Err(self.error("Unexpected end of input, expected a value")),
        }
    }

    /// Parses `{ ... }` into the already allocated object `id`.
    fn parse_object(&mut self, id: NodeId) -> Result<()> {
        self.expect('{')?;
        self.enter()?;
        self.skip_whitespace();

        if self.peek_char() == Some('}') {
            self.next_char();
            self.depth -= 1;
            return Ok(());
        }

        loop {
            self.skip_whitespace();
            if self.peek_char() != Some('"') {
                return Err(self.error("Expected string key"));
            }
            let key = self.parse_string()?;
            self.skip_whitespace();
            self.expect(':')?;
            let child = self.parse_value()?;
            self.document.attach_member(id, key, child)?;

            self.skip_whitespace();
            match self.next_char() {
                Some(',') => continue,
                Some('}') => break,
                Some(_) => return Err(self.error("Expected ',' or '}' after object member")),
                None => return Err(self.error("Unterminated object")),
            }
        }

        self.depth -= 1;
        Ok(())
    }

    /// Parses `[ ... ]` into the already allocated array `id`.
    fn parse_array(&mut self, id: NodeId) -> Result<()> {
        self.expect('[')?;
        self.enter()?;
        self.skip_whitespace();

        if self.peek_char() == Some(']') {
            self.next_char();
            self.depth -= 1;
            return Ok(());
        }

        loop {
            let child = self.parse_value()?;
            self.document.attach_element(id, child)?;

            self.skip_whitespace();
            match self.next_char() {
                Some(',') => continue,
                Some(']') => break,
                Some(_) => return Err(self.error("Expected ',' or ']' after array element")),
                None => return Err(self.error("Unterminated array")),
            }
        }

        self.depth -= 1;
        Ok(())
    }

    fn parse_string(&mut self) -> Result<String> {
        self.expect('"')?;
        let mut result = String::new();

        loop {
            match self.next_char() {
                Some('"') => return Ok(result),
                Some('\\') => match self.next_char() {
                    Some('"') => result.push('"'),
                    Some('\\') => result.push('\\'),
                    Some('/') => result.push('/'),
                    Some('b') => result.push('\u{0008}'),
                    Some('f') => result.push('\u{000C}'),
                    Some('n') => result.push('\n'),
                    Some('r') => result.push('\r'),
                    Some('t') => result.push('\t'),
                    Some('u') => {
                        let ch = self.parse_unicode_escape()?;
                        result.push(ch);
                    }
                    Some(_) => return Err(self.error("Invalid escape sequence")),
                    None => return Err(self.error("Unexpected end of input in string")),
                },
                Some(ch) if (ch as u32) < 0x20 => {
                    return Err(self.error("Unescaped control character in string"))
                }
                Some(ch) => result.push(ch),
                None => return Err(self.error("Unterminated string")),
            }
        }
    }

    fn parse_hex4(&mut self) -> Result<u32> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .next_char()
                .and_then(|ch| ch.to_digit(16))
                .ok_or_else(|| {
                    self.error("Invalid unicode escape sequence (expected 4 hex digits)")
                })?;
            code = code * 16 + digit;
        }
        Ok(code)
    }

    /// Decodes the digits after `\u`, joining a UTF-16 surrogate pair if needed.
    fn parse_unicode_escape(&mut self) -> Result<char> {
        let first = self.parse_hex4()?;
        let code_point = match first {
            0xD800..=0xDBFF => {
                if !self.eat_keyword("\\u") {
                    return Err(self.error("High surrogate not followed by a low surrogate"));
                }
                let second = self.parse_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(self.error("Invalid low surrogate"));
                }
                0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(self.error("Unpaired low surrogate")),
            other => other,
        };
        char::from_u32(code_point).ok_or_else(|| self.error("Invalid unicode code point"))
    }

    fn parse_non_finite(&mut self, negative: bool) -> Result<Number> {
        if !self.options.allow_non_finite {
            return Err(self.error("Non-finite number literals are disabled"));
        }
        if !negative && self.eat_keyword("NaN") {
            return Ok(Number::Float(f64::NAN));
        }
        // Longest literal first: "Infinity" starts with "Inf"
        if self.eat_keyword("Infinity") || self.eat_keyword("Inf") {
            let value = if negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
            return Ok(Number::Float(value));
        }
        Err(self.error("Invalid number"))
    }

    fn parse_number(&mut self) -> Result<Number> {
        let start = self.position;
        let negative = self.peek_char() == Some('-');
        if negative {
            self.next_char();
        }

        match self.peek_char() {
            Some('N' | 'I') => return self.parse_non_finite(negative),
            Some('0') => {
                self.next_char();
                if matches!(self.peek_char(), Some('0'..='9')) {
                    return Err(self.error("Leading zeros are not allowed"));
                }
            }
            Some('1'..='9') => self.skip_digits(),
            _ => return Err(self.error("Invalid number")),
        }

        let mut is_float = false;
        if self.peek_char() == Some('.') {
            is_float = true;
            self.next_char();
            if !matches!(self.peek_char(), Some('0'..='9')) {
                return Err(self.error("Expected digits after decimal point"));
            }
            self.skip_digits();
        }
        if let Some('e' | 'E') = self.peek_char() {
            is_float = true;
            self.next_char();
            if let Some('+' | '-') = self.peek_char() {
                self.next_char();
            }
            if !matches!(self.peek_char(), Some('0'..='9')) {
                return Err(self.error("Expected digits in exponent"));
            }
            self.skip_digits();
        }

        let lexeme = &self.input[start..self.position];
        if !is_float {
            if negative {
                if let Ok(i) = lexeme.parse::<i64>() {
                    return Ok(Number::from(i));
                }
            } else if let Ok(u) = lexeme.parse::<u64>() {
                return Ok(Number::Uint(u));
            }
        }
        lexeme
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| self.error("Invalid number"))
    }

    fn skip_digits(&mut self) {
        while let Some('0'..='9') = self.peek_char() {
            self.next_char();
        }
    }
}
