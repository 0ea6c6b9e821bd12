//! Single-pass recursive descent parser over raw UTF-8 bytes.
//!
//! There is no separate tokenizer: the parser dispatches on the current
//! byte and lexes numbers, strings and literal names in place. Structural
//! bytes are trusted as ASCII; UTF-8 is validated only inside string
//! literals, which is the only place non-ASCII bytes are legal.
//!
//! Errors carry the 1-based line and column of the byte the parser was
//! looking at. Lines are counted in inter-token whitespace only, since a
//! raw line feed cannot appear inside any token.

use tracing::{debug, trace};

use super::bytes::{hex_decode, push_code_point, utf8_len, utf8_validate};
use super::limits::Limits;
use super::types::{Map, Value};
use crate::error::{ErrorKind, ParseError, ParseResult};

/// Read position plus the bookkeeping needed for diagnostics.
#[derive(Debug, Clone)]
struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
    /// Newlines seen so far (0-based line index).
    line: usize,
    /// Offset of the first byte of the current line.
    line_start: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            line: 0,
            line_start: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn advance(&mut self) {
        self.advance_by(1);
    }

    fn advance_by(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    fn remaining(&self) -> &'a [u8] {
        self.input.get(self.pos..).unwrap_or_default()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            match b {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'\n' => {
                    self.pos += 1;
                    self.line += 1;
                    self.line_start = self.pos;
                }
                _ => break,
            }
        }
    }

    /// Build an error at the current position, clamped to the last byte.
    fn error(&self, kind: ErrorKind) -> ParseError {
        let offset = if self.pos < self.input.len() {
            self.pos
        } else {
            self.input.len().saturating_sub(1)
        };
        let column = offset.saturating_sub(self.line_start) + 1;
        ParseError::new(kind, self.line + 1, column)
    }
}

/// States of the number lexer.
///
/// Terminal (accepting) states are `Zero`, `IntDigits`, `FracDigits` and
/// `ExpDigits`; stopping anywhere else is a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    /// Nothing read yet.
    MinusOrInt,
    /// Read `-`, expecting the first integer digit.
    Int,
    /// Read a lone leading `0`.
    Zero,
    /// Inside `[1-9][0-9]*`.
    IntDigits,
    /// Read `.`, expecting a digit.
    Frac,
    FracDigits,
    /// Read `e`/`E`, expecting a sign or digit.
    ExpSign,
    /// Read the exponent sign, expecting a digit.
    Exp,
    ExpDigits,
}

/// JSON parser over a byte slice.
///
/// A parser is good for one document. It owns a scratch buffer that is
/// reused for every string literal in that document.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    buffer: Vec<u8>,
    /// Latched `\uD800..\uDBFF` escape and the offset of its hex digits.
    high_surrogate: Option<(u32, usize)>,
    limits: Limits,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    pub fn new(input: &'a [u8], limits: Limits) -> Self {
        Self {
            cursor: Cursor::new(input),
            buffer: Vec::new(),
            high_surrogate: None,
            limits,
            depth: 0,
        }
    }

    /// Parse exactly one JSON value, surrounded by optional whitespace.
    pub fn parse(&mut self) -> ParseResult<Value> {
        self.cursor.skip_whitespace();
        if self.cursor.at_end() {
            return Err(self.cursor.error(ErrorKind::EmptyDocument));
        }

        let value = self.parse_value()?;

        // Ensure no trailing content
        self.cursor.skip_whitespace();
        if !self.cursor.at_end() {
            return Err(self.cursor.error(ErrorKind::UnexpectedToken));
        }

        Ok(value)
    }

    /// Parse a single JSON value, dispatching on its first byte.
    fn parse_value(&mut self) -> ParseResult<Value> {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            None => Err(self.cursor.error(ErrorKind::EmptyDocument)),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            Some(_) => self.parse_literal(),
        }
    }

    fn parse_number(&mut self) -> ParseResult<Value> {
        use NumberState::*;

        let start = self.cursor.pos;
        let mut state = MinusOrInt;

        while let Some(byte) = self.cursor.peek() {
            state = match (state, byte) {
                (MinusOrInt, b'-') => Int,
                (MinusOrInt, b'0') => Zero,
                (MinusOrInt | Int, b'1'..=b'9') => IntDigits,
                (IntDigits, b'0'..=b'9') => IntDigits,
                (Zero | IntDigits, b'.') => Frac,
                (Frac | FracDigits, b'0'..=b'9') => FracDigits,
                (Zero | IntDigits | FracDigits, b'e' | b'E') => ExpSign,
                (ExpSign, b'+' | b'-') => Exp,
                (ExpSign | Exp | ExpDigits, b'0'..=b'9') => ExpDigits,
                (_, b',' | b']' | b'}' | b' ' | b'\t' | b'\n' | b'\r') => break,
                _ => return Err(self.cursor.error(ErrorKind::NumberSyntax)),
            };
            self.cursor.advance();
        }

        let input = self.cursor.input;
        let lexeme = std::str::from_utf8(&input[start..self.cursor.pos]).ok();
        let value = match state {
            Zero => Some(Value::Int(0)),
            IntDigits => lexeme.and_then(|s| s.parse::<i64>().ok()).map(Value::Int),
            FracDigits | ExpDigits => lexeme
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|d| d.is_finite())
                .map(Value::Double),
            _ => return Err(self.cursor.error(ErrorKind::NumberSyntax)),
        };

        value.ok_or_else(|| {
            // Out of range: report at the start of the lexeme.
            self.cursor.pos = start;
            self.cursor.error(ErrorKind::NumberSyntax)
        })
    }

    /// Parse a string literal starting at its opening quote.
    fn parse_string(&mut self) -> ParseResult<String> {
        self.buffer.clear();

        // Consume opening quote
        self.cursor.advance();

        while let Some(byte) = self.cursor.peek() {
            if byte == b'\\' {
                self.parse_escape()?;
                continue;
            }

            self.check_unpaired_surrogate()?;

            match byte {
                b'"' => {
                    self.cursor.advance();
                    return std::str::from_utf8(&self.buffer)
                        .map(str::to_owned)
                        .map_err(|_| self.cursor.error(ErrorKind::InvalidCharacter));
                }
                0x00..=0x1F => return Err(self.cursor.error(ErrorKind::InvalidCharacter)),
                0x20..=0x7F => {
                    self.buffer.push(byte);
                    self.cursor.advance();
                }
                _ => {
                    let len = utf8_len(byte);
                    match self.cursor.remaining().get(..len) {
                        Some(seq) if utf8_validate(seq) => {
                            self.buffer.extend_from_slice(seq);
                            self.cursor.advance_by(len);
                        }
                        _ => return Err(self.cursor.error(ErrorKind::InvalidCharacter)),
                    }
                }
            }
        }

        Err(self.cursor.error(ErrorKind::UnclosedString))
    }

    /// Decode one escape sequence starting at the backslash.
    fn parse_escape(&mut self) -> ParseResult<()> {
        self.cursor.advance();

        let Some(byte) = self.cursor.peek() else {
            // Dangling backslash: the string is reported as unclosed.
            self.buffer.push(b'\\');
            return Ok(());
        };

        if byte == b'u' {
            self.cursor.advance();
            let code = self
                .read_hex4()
                .ok_or_else(|| self.cursor.error(ErrorKind::EscapeSyntax))?;

            match code {
                0xD800..=0xDBFF => {
                    self.check_unpaired_surrogate()?;
                    self.high_surrogate = Some((code, self.cursor.pos));
                }
                0xDC00..=0xDFFF => {
                    let Some((high, _)) = self.high_surrogate.take() else {
                        return Err(self.cursor.error(ErrorKind::UnpairedSurrogate));
                    };
                    let combined = 0x1_0000 + ((high & 0x3FF) << 10) + (code & 0x3FF);
                    push_code_point(&mut self.buffer, combined);
                }
                _ => {
                    self.check_unpaired_surrogate()?;
                    push_code_point(&mut self.buffer, code);
                }
            }
            self.cursor.advance_by(4);
            return Ok(());
        }

        self.check_unpaired_surrogate()?;
        let unescaped = match byte {
            b'"' | b'\\' | b'/' => byte,
            b'b' => 0x08,
            b'f' => 0x0C,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            _ => return Err(self.cursor.error(ErrorKind::EscapeSyntax)),
        };
        self.buffer.push(unescaped);
        self.cursor.advance();
        Ok(())
    }

    /// Read the 4 hex digits of a `\u` escape without consuming them.
    fn read_hex4(&self) -> Option<u32> {
        let digits = self.cursor.remaining().get(..4)?;
        digits.iter().try_fold(0u32, |acc, &b| {
            hex_decode(b).map(|nibble| (acc << 4) | u32::from(nibble))
        })
    }

    /// Fail if a high surrogate is still waiting for its low half.
    fn check_unpaired_surrogate(&mut self) -> ParseResult<()> {
        match self.high_surrogate {
            Some((_, pos)) => {
                self.cursor.pos = pos;
                Err(self.cursor.error(ErrorKind::UnpairedSurrogate))
            }
            None => Ok(()),
        }
    }

    /// Parse a JSON array.
    fn parse_array(&mut self) -> ParseResult<Value> {
        self.enter_container()?;

        // Consume opening bracket
        self.cursor.advance();

        let mut arr = Vec::new();

        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            None => return Err(self.cursor.error(ErrorKind::UnclosedArray)),
            Some(b']') => {
                self.cursor.advance();
                self.depth -= 1;
                return Ok(Value::Array(arr));
            }
            Some(_) => {}
        }

        loop {
            arr.push(self.parse_value()?);

            // Expect comma or closing bracket
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                None => return Err(self.cursor.error(ErrorKind::UnclosedArray)),
                Some(b',') => {
                    self.cursor.advance();
                    self.cursor.skip_whitespace();
                    match self.cursor.peek() {
                        None => return Err(self.cursor.error(ErrorKind::UnclosedArray)),
                        // Trailing comma is not allowed in JSON
                        Some(b']') => return Err(self.cursor.error(ErrorKind::UnexpectedToken)),
                        Some(_) => {}
                    }
                }
                Some(b']') => {
                    self.cursor.advance();
                    break;
                }
                Some(_) => return Err(self.cursor.error(ErrorKind::UnexpectedToken)),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(arr))
    }

    /// Parse a JSON object. Duplicate keys: the last occurrence wins.
    fn parse_object(&mut self) -> ParseResult<Value> {
        self.enter_container()?;

        // Consume opening brace
        self.cursor.advance();

        let mut map = Map::new();

        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            None => return Err(self.cursor.error(ErrorKind::UnclosedDictionary)),
            Some(b'}') => {
                self.cursor.advance();
                self.depth -= 1;
                return Ok(Value::Object(map));
            }
            Some(_) => {}
        }

        loop {
            // Expect string key
            if self.cursor.peek() != Some(b'"') {
                return Err(self.cursor.error(ErrorKind::UnexpectedToken));
            }
            let key = self.parse_string()?;

            // Expect colon
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                None => return Err(self.cursor.error(ErrorKind::UnclosedDictionary)),
                Some(b':') => self.cursor.advance(),
                Some(_) => return Err(self.cursor.error(ErrorKind::UnexpectedToken)),
            }

            self.cursor.skip_whitespace();
            if self.cursor.at_end() {
                return Err(self.cursor.error(ErrorKind::UnclosedDictionary));
            }
            let value = self.parse_value()?;
            map.insert(key, value);

            // Expect comma or closing brace
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                None => return Err(self.cursor.error(ErrorKind::UnclosedDictionary)),
                Some(b',') => {
                    self.cursor.advance();
                    self.cursor.skip_whitespace();
                    match self.cursor.peek() {
                        None => return Err(self.cursor.error(ErrorKind::UnclosedDictionary)),
                        // Trailing comma is not allowed in JSON
                        Some(b'}') => return Err(self.cursor.error(ErrorKind::UnexpectedToken)),
                        Some(_) => {}
                    }
                }
                Some(b'}') => {
                    self.cursor.advance();
                    break;
                }
                Some(_) => return Err(self.cursor.error(ErrorKind::UnexpectedToken)),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    /// Parse `true`, `false` or `null`.
    fn parse_literal(&mut self) -> ParseResult<Value> {
        let start = self.cursor.pos;
        let rest = self.cursor.remaining();

        let (value, len) = if rest.starts_with(b"true") {
            (Value::Bool(true), 4)
        } else if rest.starts_with(b"null") {
            (Value::Null, 4)
        } else if rest.starts_with(b"false") {
            (Value::Bool(false), 5)
        } else {
            return Err(self.cursor.error(ErrorKind::UnexpectedToken));
        };
        self.cursor.advance_by(len);

        // `trueX` is one bad token, not `true` followed by garbage.
        match self.cursor.peek() {
            None | Some(b',' | b']' | b'}' | b' ' | 0x08..=0x0D) => Ok(value),
            Some(_) => {
                self.cursor.pos = start;
                Err(self.cursor.error(ErrorKind::UnexpectedToken))
            }
        }
    }

    /// Check nesting depth before descending into an array or object.
    fn enter_container(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if !self.limits.allows_depth(self.depth) {
            debug!(
                depth = self.depth,
                max = ?self.limits.max_nesting_depth,
                "nesting depth limit exceeded"
            );
            return Err(self.cursor.error(ErrorKind::NestingTooDeep));
        }
        Ok(())
    }
}

/// Parse one JSON document from bytes (or anything byte-like, such as `&str`).
pub fn parse(input: impl AsRef<[u8]>) -> ParseResult<Value> {
    parse_with_limits(input.as_ref(), Limits::default())
}

/// Parse one JSON document from UTF-8 text.
pub fn parse_str(text: &str) -> ParseResult<Value> {
    parse(text.as_bytes())
}

/// Parse one JSON document with custom limits.
pub fn parse_with_limits(input: &[u8], limits: Limits) -> ParseResult<Value> {
    trace!(len = input.len(), "parsing JSON document");
    let result = Parser::new(input, limits).parse();
    if let Err(err) = &result {
        debug!(
            kind = %err.kind(),
            line = err.line(),
            column = err.column(),
            "JSON parse failed"
        );
    }
    result
}
