//! Corpus loading and execution.
//!
//! Corpus files are read with `serde_json` rather than with this crate's
//! own parser, so a parser bug cannot silently corrupt its own test vectors.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::CorpusError;
use crate::error::ParseError;
use crate::json::{parse_with_limits, stringify, Limits};

/// A corpus containing test vectors.
#[derive(Debug, Deserialize)]
pub struct Corpus {
    /// Corpus format version.
    pub version: String,
    /// List of test vectors.
    pub vectors: Vec<TestVector>,
}

/// A single test vector.
#[derive(Debug, Clone, Deserialize)]
pub struct TestVector {
    /// Unique identifier for the test.
    pub id: String,
    /// Input document as text.
    #[serde(default)]
    pub input: Option<String>,
    /// Input document as hex-encoded bytes, for inputs that are not UTF-8.
    #[serde(default)]
    pub input_hex: Option<String>,
    /// Serialize in pretty mode when comparing successful output.
    #[serde(default)]
    pub pretty: bool,
    /// Nesting limit to parse with.
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Expected outcome.
    pub expected: Expected,
}

/// Expected outcome of a test vector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expected {
    /// Parsing succeeds and serializes to exactly this text.
    Ok(String),
    /// Parsing fails with this error.
    Err {
        /// `ErrorKind` name, e.g. `NumberSyntax`.
        kind: String,
        /// Expected 1-based line, if checked.
        #[serde(default)]
        line: Option<usize>,
        /// Expected 1-based column, if checked.
        #[serde(default)]
        column: Option<usize>,
    },
}

impl TestVector {
    /// The raw input bytes of this vector.
    pub fn input_bytes(&self) -> Result<Vec<u8>, String> {
        match (&self.input, &self.input_hex) {
            (Some(text), None) => Ok(text.as_bytes().to_vec()),
            (None, Some(hex)) => hex::decode(hex).map_err(|e| format!("Invalid hex: {}", e)),
            _ => Err("Exactly one of 'input' and 'input_hex' is required".to_string()),
        }
    }
}

/// Result of running a single test vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    /// Test passed.
    Pass,
    /// Test failed with mismatch.
    Fail {
        /// Expected result from the corpus.
        expected: String,
        /// Actual result from the implementation.
        actual: String,
    },
    /// The vector itself is malformed.
    Error {
        /// Error message.
        message: String,
    },
}

impl TestResult {
    /// Returns true if this is a passing result.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns true if this is a failing result.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }
}

/// Results from running the corpus.
#[derive(Debug, Default)]
pub struct CorpusResults {
    /// Number of tests that passed.
    pub passed: usize,
    /// Number of tests that failed.
    pub failed: usize,
    /// Number of tests that errored.
    pub errors: usize,
    /// Detailed results for each test.
    pub details: Vec<(String, TestResult)>,
}

impl CorpusResults {
    /// Create a new empty results container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a test result.
    pub fn record(&mut self, id: &str, result: TestResult) {
        match &result {
            TestResult::Pass => self.passed += 1,
            TestResult::Fail { .. } => self.failed += 1,
            TestResult::Error { .. } => self.errors += 1,
        }
        self.details.push((id.to_string(), result));
    }

    /// Get total number of tests run.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errors
    }

    /// Returns true if all tests passed (no failures or errors).
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    /// Get a summary string of the results.
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} errors (total: {})",
            self.passed,
            self.failed,
            self.errors,
            self.total()
        )
    }

    /// Get everything that did not pass.
    pub fn failures(&self) -> Vec<&(String, TestResult)> {
        self.details.iter().filter(|(_, r)| !r.is_pass()).collect()
    }
}

/// Corpus runner that executes test vectors.
pub struct CorpusRunner {
    corpus: Corpus,
}

impl CorpusRunner {
    /// Load corpus from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CorpusError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Load corpus from its JSON text.
    pub fn from_json(content: &str) -> Result<Self, CorpusError> {
        let corpus: Corpus = serde_json::from_str(content)?;
        Ok(Self { corpus })
    }

    /// Corpus format version.
    pub fn version(&self) -> &str {
        &self.corpus.version
    }

    /// Get the number of test vectors.
    pub fn vector_count(&self) -> usize {
        self.corpus.vectors.len()
    }

    /// Run all test vectors and return results.
    pub fn run_all(&self) -> CorpusResults {
        let mut results = CorpusResults::new();

        for vector in &self.corpus.vectors {
            let result = run_vector(vector);
            if !result.is_pass() {
                debug!(id = %vector.id, ?result, "corpus vector did not pass");
            }
            results.record(&vector.id, result);
        }

        results
    }
}

/// Run a single test vector.
pub fn run_vector(vector: &TestVector) -> TestResult {
    let bytes = match vector.input_bytes() {
        Ok(b) => b,
        Err(message) => return TestResult::Error { message },
    };

    let limits = match vector.max_depth {
        Some(depth) => Limits::unbounded().with_max_nesting_depth(depth),
        None => Limits::unbounded(),
    };
    let result = parse_with_limits(&bytes, limits);

    match (&vector.expected, result) {
        (Expected::Ok(expected), Ok(value)) => {
            let actual = stringify(&value, vector.pretty);
            if &actual == expected {
                TestResult::Pass
            } else {
                TestResult::Fail {
                    expected: expected.clone(),
                    actual,
                }
            }
        }
        (Expected::Ok(expected), Err(e)) => TestResult::Fail {
            expected: format!("ok: {}", expected),
            actual: format!("err: {}", describe(&e)),
        },
        (Expected::Err { kind, .. }, Ok(value)) => TestResult::Fail {
            expected: format!("err: {}", kind),
            actual: format!("ok: {}", value),
        },
        (Expected::Err { kind, line, column }, Err(e)) => {
            let matches = e.kind().name() == kind.as_str()
                && line.map_or(true, |l| l == e.line())
                && column.map_or(true, |c| c == e.column());
            if matches {
                TestResult::Pass
            } else {
                let position = match (line, column) {
                    (Some(l), Some(c)) => format!(" at ({},{})", l, c),
                    _ => String::new(),
                };
                TestResult::Fail {
                    expected: format!("err: {}{}", kind, position),
                    actual: format!("err: {}", describe(&e)),
                }
            }
        }
    }
}

fn describe(e: &ParseError) -> String {
    format!("{} at ({},{})", e.kind().name(), e.line(), e.column())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(json: &str) -> TestVector {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_ok_vector_passes() {
        let v = vector(r#"{"id":"t","input":"{\"b\":1,\"a\":2}","expected":{"ok":"{\"a\":2,\"b\":1}"}}"#);
        assert_eq!(run_vector(&v), TestResult::Pass);
    }

    #[test]
    fn test_err_vector_with_position() {
        let v = vector(r#"{"id":"t","input":"01","expected":{"err":{"kind":"NumberSyntax","line":1,"column":2}}}"#);
        assert_eq!(run_vector(&v), TestResult::Pass);

        let v = vector(r#"{"id":"t","input":"01","expected":{"err":{"kind":"NumberSyntax","line":1,"column":1}}}"#);
        assert!(run_vector(&v).is_fail());
    }

    #[test]
    fn test_hex_input() {
        let v = vector(r#"{"id":"t","input_hex":"22c00022","expected":{"err":{"kind":"InvalidCharacter","column":2}}}"#);
        assert_eq!(run_vector(&v), TestResult::Pass);
    }

    #[test]
    fn test_malformed_vector_is_error() {
        let v = vector(r#"{"id":"t","expected":{"ok":"null"}}"#);
        assert!(matches!(run_vector(&v), TestResult::Error { .. }));

        let v = vector(r#"{"id":"t","input_hex":"zz","expected":{"ok":"null"}}"#);
        assert!(matches!(run_vector(&v), TestResult::Error { .. }));
    }

    #[test]
    fn test_results_summary() {
        let runner = CorpusRunner::from_json(
            r#"{"version":"1","vectors":[
                {"id":"a","input":"true","expected":{"ok":"true"}},
                {"id":"b","input":"true","expected":{"ok":"false"}},
                {"id":"c","input":"[[1]]","max_depth":1,"expected":{"err":{"kind":"NestingTooDeep"}}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(runner.version(), "1");
        assert_eq!(runner.vector_count(), 3);

        let results = runner.run_all();
        assert_eq!(results.passed, 2);
        assert_eq!(results.failed, 1);
        assert!(!results.all_passed());
        assert_eq!(results.failures().len(), 1);
        assert_eq!(results.summary(), "2 passed, 1 failed, 0 errors (total: 3)");
    }
}
