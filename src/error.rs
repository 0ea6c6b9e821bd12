//! Error handling for the JSON codec.
//!
//! Parsing stops at the first grammar violation and reports it as a
//! [`ParseError`]: a closed [`ErrorKind`] plus the 1-based line and column
//! where the parser was standing when the violation was detected.
//!
//! Serialization is total over the value model and has no error type.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// Kind of parse failure.
///
/// Every kind has a stable numeric code so that callers (and the CLI's
/// machine-readable output) can match on failures without string compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input holds no value, or only whitespace.
    EmptyDocument,
    /// A byte that cannot start or continue the current production.
    UnexpectedToken,
    /// Input ended inside an array.
    UnclosedArray,
    /// Input ended inside an object.
    UnclosedDictionary,
    /// Input ended inside a string literal.
    UnclosedString,
    /// Raw control byte or malformed UTF-8 inside a string literal.
    InvalidCharacter,
    /// A `\uXXXX` surrogate escape without its partner.
    UnpairedSurrogate,
    /// Number lexeme violates the grammar or overflows `i64`.
    NumberSyntax,
    /// Unknown escape character or malformed `\u` escape.
    EscapeSyntax,
    /// Array/object nesting exceeded the configured limit.
    NestingTooDeep,
}

impl ErrorKind {
    /// All kinds, in code order.
    pub const ALL: [ErrorKind; 10] = [
        ErrorKind::EmptyDocument,
        ErrorKind::UnexpectedToken,
        ErrorKind::UnclosedArray,
        ErrorKind::UnclosedDictionary,
        ErrorKind::UnclosedString,
        ErrorKind::InvalidCharacter,
        ErrorKind::UnpairedSurrogate,
        ErrorKind::NumberSyntax,
        ErrorKind::EscapeSyntax,
        ErrorKind::NestingTooDeep,
    ];

    /// Get the numeric error code.
    pub const fn code(&self) -> u32 {
        match self {
            ErrorKind::EmptyDocument => 100,
            ErrorKind::UnexpectedToken => 101,
            ErrorKind::UnclosedArray => 102,
            ErrorKind::UnclosedDictionary => 103,
            ErrorKind::UnclosedString => 104,
            ErrorKind::InvalidCharacter => 105,
            ErrorKind::UnpairedSurrogate => 106,
            ErrorKind::NumberSyntax => 107,
            ErrorKind::EscapeSyntax => 108,
            ErrorKind::NestingTooDeep => 109,
        }
    }

    /// Get the error name.
    pub const fn name(&self) -> &'static str {
        match self {
            ErrorKind::EmptyDocument => "EmptyDocument",
            ErrorKind::UnexpectedToken => "UnexpectedToken",
            ErrorKind::UnclosedArray => "UnclosedArray",
            ErrorKind::UnclosedDictionary => "UnclosedDictionary",
            ErrorKind::UnclosedString => "UnclosedString",
            ErrorKind::InvalidCharacter => "InvalidCharacter",
            ErrorKind::UnpairedSurrogate => "UnpairedSurrogate",
            ErrorKind::NumberSyntax => "NumberSyntax",
            ErrorKind::EscapeSyntax => "EscapeSyntax",
            ErrorKind::NestingTooDeep => "NestingTooDeep",
        }
    }

    /// Look up a kind by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<ErrorKind> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether the human-readable message carries a `(line,column)` suffix.
    ///
    /// Exhaustion errors are reported without a position: the interesting
    /// location is the unmatched opener, which the parser no longer tracks.
    pub const fn has_location(&self) -> bool {
        !matches!(
            self,
            ErrorKind::EmptyDocument
                | ErrorKind::UnclosedArray
                | ErrorKind::UnclosedDictionary
                | ErrorKind::UnclosedString
        )
    }

    fn description(&self) -> &'static str {
        match self {
            ErrorKind::EmptyDocument => "Empty document",
            ErrorKind::UnexpectedToken => "Unexpected token",
            ErrorKind::UnclosedArray => "Unclosed array",
            ErrorKind::UnclosedDictionary => "Unclosed dictionary",
            ErrorKind::UnclosedString => "Unclosed string",
            ErrorKind::InvalidCharacter => "Invalid character",
            ErrorKind::UnpairedSurrogate => "Unpaired escaped surrogate",
            ErrorKind::NumberSyntax => "Invalid number syntax",
            ErrorKind::EscapeSyntax => "Invalid escape syntax",
            ErrorKind::NestingTooDeep => "Nesting too deep",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parse failure with its 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{}", render(.kind, .line, .column))]
pub struct ParseError {
    kind: ErrorKind,
    line: usize,
    column: usize,
}

impl ParseError {
    pub(crate) const fn new(kind: ErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }

    /// The failure kind.
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 1-based line of the failure.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// 1-based column (byte offset from the line start) of the failure.
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Shorthand for `self.kind().code()`.
    pub const fn code(&self) -> u32 {
        self.kind.code()
    }

    /// Human-readable description, e.g. `Unexpected token at (1,6)`.
    pub fn message(&self) -> String {
        render(&self.kind, &self.line, &self.column)
    }
}

fn render(kind: &ErrorKind, line: &usize, column: &usize) -> String {
    if kind.has_location() {
        format!("{} at ({},{})", kind.description(), line, column)
    } else {
        kind.description().to_string()
    }
}
