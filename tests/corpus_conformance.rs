//! Corpus-based conformance tests.
//!
//! Runs every vector in `corpus/corpus.json` and checks the parser and
//! serializer produce exactly the recorded output or error position.

use canon_json::conformance::{CorpusRunner, Expected, TestResult};
use std::path::Path;

/// Path to the corpus file relative to the crate root.
const CORPUS_PATH: &str = "corpus/corpus.json";

fn load_runner() -> CorpusRunner {
    let corpus_path = Path::new(env!("CARGO_MANIFEST_DIR")).join(CORPUS_PATH);
    CorpusRunner::load(&corpus_path)
        .unwrap_or_else(|e| panic!("Failed to load corpus at {:?}: {}", corpus_path, e))
}

/// Load and run the full corpus.
#[test]
fn test_full_corpus() {
    let runner = load_runner();
    println!("Loaded corpus v{} with {} vectors", runner.version(), runner.vector_count());

    let results = runner.run_all();

    println!("\n=== Corpus Conformance Results ===");
    println!("{}", results.summary());

    if !results.failures().is_empty() {
        println!("\nFailures:");
        for (id, result) in results.failures() {
            match result {
                TestResult::Fail { expected, actual } => {
                    println!("  {} - expected: {}, actual: {}", id, expected, actual)
                }
                TestResult::Error { message } => println!("  {} - {}", id, message),
                TestResult::Pass => {}
            }
        }
    }

    assert!(
        results.all_passed(),
        "Corpus conformance failed: {}",
        results.summary()
    );
}

/// The corpus must cover every error kind the parser can produce.
#[test]
fn test_corpus_covers_all_error_kinds() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(CORPUS_PATH);
    let content = std::fs::read_to_string(path).unwrap();
    let corpus: canon_json::conformance::Corpus = serde_json::from_str(&content).unwrap();

    for kind in canon_json::ErrorKind::ALL {
        let covered = corpus.vectors.iter().any(|v| {
            matches!(&v.expected, Expected::Err { kind: name, .. } if name == kind.name())
        });
        assert!(covered, "no corpus vector for {}", kind.name());
    }
}

#[test]
fn test_corpus_ids_unique() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(CORPUS_PATH);
    let content = std::fs::read_to_string(path).unwrap();
    let corpus: canon_json::conformance::Corpus = serde_json::from_str(&content).unwrap();

    let mut ids: Vec<&str> = corpus.vectors.iter().map(|v| v.id.as_str()).collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total, "duplicate vector ids in corpus");
}
