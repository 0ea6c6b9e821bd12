//! Corpus-driven conformance testing.
//!
//! A corpus is a JSON file of test vectors, each pairing an input document
//! with either its expected canonical serialization or the expected parse
//! error. Running the corpus checks the parser and serializer together and
//! compares outputs as exact strings, not parsed structures.

pub mod corpus;

pub use corpus::{Corpus, CorpusResults, CorpusRunner, Expected, TestResult, TestVector};

use thiserror::Error;

/// Errors that can occur while loading a corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus file could not be read.
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),
    /// The corpus file is not a valid corpus document.
    #[error("failed to parse corpus JSON: {0}")]
    Format(#[from] serde_json::Error),
}
