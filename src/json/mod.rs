//! JSON parsing and canonical serialization.
//!
//! Implements RFC 8259 parsing directly over bytes with precise error
//! positions, and a deterministic serializer with sorted object keys.
//!
//! # Architecture
//!
//! The JSON subsystem is organized into focused modules:
//!
//! - [`bytes`] - Hex and UTF-8 byte helpers
//! - [`types`] - Core JSON value types
//! - [`limits`] - Optional nesting limits
//! - [`parser`] - Recursive descent parser with embedded lexers
//! - [`serializer`] - Canonical serialization, compact or pretty
//!
//! # Example
//!
//! ```
//! use canon_json::json::{parse, stringify, Value};
//!
//! let value = parse(b"{\"b\":1,\"a\":2.5}").unwrap();
//! assert_eq!(value["a"], Value::Double(2.5));
//!
//! // Canonical output sorts object keys
//! assert_eq!(stringify(&value, false), "{\"a\":2.5,\"b\":1}");
//! ```

pub mod bytes;
pub mod limits;
pub mod parser;
pub mod serializer;
pub mod types;

// Re-export commonly used items
pub use limits::Limits;
pub use parser::{parse, parse_str, parse_with_limits, Parser};
pub use serializer::{is_canonical, serialize, stringify, Serializer};
pub use types::{Map, Value, ValueType};
