//! Canon JSON - a byte-level JSON codec.
//!
//! This crate parses UTF-8 JSON text into a tagged [`Value`] tree and
//! serializes values back to bytes in a canonical, diff-stable form.
//!
//! # Architecture
//!
//! - [`json`] - value model, parser and serializer
//! - [`error`] - parse error taxonomy with line/column positions
//! - [`conformance`] - corpus-driven conformance runner
//!
//! # Example
//!
//! ```
//! use canon_json::{parse, stringify, ErrorKind};
//!
//! let value = parse("[1, 2.0, \"three\"]").unwrap();
//! assert_eq!(stringify(&value, false), "[1,2.0,\"three\"]");
//!
//! let err = parse("01").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NumberSyntax);
//! assert_eq!(err.to_string(), "Invalid number syntax at (1,2)");
//! ```

// Library code reports failures through `ParseError`, never by panicking.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod conformance;
pub mod error;
pub mod json;

// Re-export commonly used types
pub use error::{ErrorKind, ParseError, ParseResult};
pub use json::{parse, parse_str, parse_with_limits, serialize, stringify, Limits, Value, ValueType};
