//! Deterministic JSON serialization.
//!
//! Output is canonical: object members are always emitted in ascending
//! byte order of their keys, independent of the `pretty` flag, so equal
//! values always serialize to identical bytes.
//!
//! Pretty mode puts every element and member on its own line, with CRLF
//! line breaks and one tab per nesting level, and a space after `:`.

use tracing::trace;

use super::bytes::{hex_encode_high, hex_encode_low};
use super::types::{Map, Value};

/// Byte accumulator plus the current nesting level.
pub struct Serializer {
    buffer: Vec<u8>,
    pretty: bool,
    level: usize,
}

impl Serializer {
    /// Create a serializer. `pretty` enables line breaks and indentation.
    pub fn new(pretty: bool) -> Self {
        Self {
            buffer: Vec::new(),
            pretty,
            level: 0,
        }
    }

    /// Serialize `value`, returning the accumulated bytes.
    pub fn serialize(mut self, value: &Value) -> Vec<u8> {
        self.write_value(value);
        self.buffer
    }

    fn write_value(&mut self, value: &Value) {
        match value {
            Value::Null => self.buffer.extend_from_slice(b"null"),
            Value::Bool(true) => self.buffer.extend_from_slice(b"true"),
            Value::Bool(false) => self.buffer.extend_from_slice(b"false"),
            Value::Int(n) => self.write_int(*n),
            Value::Double(d) => self.write_double(*d),
            Value::String(s) => self.write_string(s),
            Value::Array(arr) => self.write_array(arr),
            Value::Object(obj) => self.write_object(obj),
        }
    }

    /// Decimal digits, most significant first.
    fn write_int(&mut self, n: i64) {
        if n < 0 {
            self.buffer.push(b'-');
        }
        let mut magnitude = n.unsigned_abs();
        let mut digits = [0u8; 20];
        let mut len = 0;
        loop {
            // `magnitude % 10` is always < 10.
            #[allow(clippy::cast_possible_truncation)]
            let digit = (magnitude % 10) as u8;
            digits[len] = b'0' + digit;
            len += 1;
            magnitude /= 10;
            if magnitude == 0 {
                break;
            }
        }
        self.buffer.extend(digits[..len].iter().rev());
    }

    /// Shortest round-trip form; whole values keep a `.0` so they read
    /// back as doubles.
    fn write_double(&mut self, d: f64) {
        if d.is_finite() {
            self.buffer.extend_from_slice(format!("{d:?}").as_bytes());
        } else {
            // No JSON spelling exists for NaN or infinities.
            self.buffer.extend_from_slice(b"null");
        }
    }

    /// Serialize a string with JSON escaping.
    fn write_string(&mut self, s: &str) {
        self.buffer.push(b'"');
        for &byte in s.as_bytes() {
            match byte {
                b'"' => self.buffer.extend_from_slice(b"\\\""),
                b'\\' => self.buffer.extend_from_slice(b"\\\\"),
                b'/' => self.buffer.extend_from_slice(b"\\/"),
                0x08 => self.buffer.extend_from_slice(b"\\b"),
                0x0C => self.buffer.extend_from_slice(b"\\f"),
                b'\n' => self.buffer.extend_from_slice(b"\\n"),
                b'\r' => self.buffer.extend_from_slice(b"\\r"),
                b'\t' => self.buffer.extend_from_slice(b"\\t"),
                0x00..=0x1F => {
                    self.buffer.extend_from_slice(b"\\u00");
                    self.buffer.push(hex_encode_high(byte));
                    self.buffer.push(hex_encode_low(byte));
                }
                _ => self.buffer.push(byte),
            }
        }
        self.buffer.push(b'"');
    }

    fn write_array(&mut self, arr: &[Value]) {
        self.buffer.push(b'[');
        self.level += 1;
        for (i, value) in arr.iter().enumerate() {
            if i > 0 {
                self.buffer.push(b',');
            }
            self.write_indent();
            self.write_value(value);
        }
        self.level -= 1;
        if !arr.is_empty() {
            self.write_indent();
        }
        self.buffer.push(b']');
    }

    /// Members in ascending key order; `Map` iterates that way already.
    fn write_object(&mut self, obj: &Map) {
        self.buffer.push(b'{');
        self.level += 1;
        for (i, (key, value)) in obj.iter().enumerate() {
            if i > 0 {
                self.buffer.push(b',');
            }
            self.write_indent();
            self.write_string(key);
            self.buffer.push(b':');
            if self.pretty {
                self.buffer.push(b' ');
            }
            self.write_value(value);
        }
        self.level -= 1;
        if !obj.is_empty() {
            self.write_indent();
        }
        self.buffer.push(b'}');
    }

    fn write_indent(&mut self) {
        if self.pretty {
            self.buffer.extend_from_slice(b"\r\n");
            self.buffer.resize(self.buffer.len() + self.level, b'\t');
        }
    }
}

/// Serialize a value to UTF-8 JSON bytes.
pub fn serialize(value: &Value, pretty: bool) -> Vec<u8> {
    let bytes = Serializer::new(pretty).serialize(value);
    trace!(len = bytes.len(), pretty, "serialized JSON value");
    bytes
}

/// Serialize a value to a JSON `String`.
pub fn stringify(value: &Value, pretty: bool) -> String {
    // Every `Value::String` is valid UTF-8 and everything else is ASCII.
    match String::from_utf8(serialize(value, pretty)) {
        Ok(s) => s,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Returns true if `input` is exactly the compact canonical form of `value`.
pub fn is_canonical(input: &[u8], value: &Value) -> bool {
    serialize(value, false) == input
}
