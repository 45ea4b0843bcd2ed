//! Integration tests for reading a claim corpus from disk.

use factcheck_core::FactSet;
use factcheck_corpus::CorpusReader;
use std::io::Write;

fn write_corpus(dir: &tempfile::TempDir, name: &str, content: &str) {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(path).unwrap_or_else(|e| panic!("create corpus: {e}"));
    file.write_all(content.as_bytes())
        .unwrap_or_else(|e| panic!("write corpus: {e}"));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn reads_training_labels_and_ngrams() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    write_corpus(
        &dir,
        "training.tsv",
        "10\tMarie Curie's birth place is Warsaw.\t1.0\n11\tParis 's award is Nobel\t0.0\r\n\n",
    );

    let corpus = CorpusReader::new(dir.path(), FactSet::Training)
        .read()
        .expect("corpus should be read");

    assert_eq!(corpus.records.len(), 2);
    let first = &corpus.records[0];
    assert_eq!(first.id, "10");
    assert_eq!(first.label.as_deref(), Some("1.0"));
    assert_eq!(first.unigrams.last().map(String::as_str), Some("."));
    assert!(first.trigrams.contains(&"'s birth place".to_string()));
    assert_eq!(corpus.records[1].label.as_deref(), Some("0.0"));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_set_ignores_label_column_and_skips_malformed_lines() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    write_corpus(&dir, "test.tsv", "1\tNobel's award is Curie\t1.0\nbroken line\n");

    let corpus = CorpusReader::new(dir.path(), FactSet::Test)
        .read()
        .expect("corpus should be read");

    assert_eq!(corpus.records.len(), 1);
    assert_eq!(corpus.records[0].label, None);
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn fingerprint_matches_read() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    write_corpus(&dir, "training.tsv", "1\tA 's b\t1.0\n");
    let reader = CorpusReader::new(dir.path(), FactSet::Training);

    let corpus = reader.read().expect("corpus should be read");
    assert_eq!(reader.fingerprint().expect("fingerprint"), corpus.fingerprint);
}

#[test]
fn missing_file_is_an_error() {
    let reader = CorpusReader::new(std::path::Path::new("/nonexistent"), FactSet::Training);
    assert!(reader.read().is_err());
}
