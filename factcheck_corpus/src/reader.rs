//! TSV claim corpus reader.

use anyhow::Context;
use factcheck_core::{CorpusRecord, FactSet, content_fingerprint};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::ngrams::collect_ngrams;
use crate::tokenizer::tokenize;

/// A tokenized corpus plus the fingerprint of the file it was read from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawCorpus {
    pub fact_set: FactSet,
    pub fingerprint: String,
    pub records: Vec<CorpusRecord>,
}

/// Reads `<input_dir>/<fact_set>.tsv`, one `id \t text \t label` claim per line.
#[derive(Debug, Clone)]
pub struct CorpusReader {
    path: PathBuf,
    fact_set: FactSet,
}

impl CorpusReader {
    #[must_use]
    pub fn new(input_dir: &Path, fact_set: FactSet) -> Self {
        Self {
            path: input_dir.join(format!("{fact_set}.tsv")),
            fact_set,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fingerprint of the corpus file without tokenizing it.
    pub fn fingerprint(&self) -> anyhow::Result<String> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("Failed to read corpus file {}", self.path.display()))?;
        Ok(content_fingerprint(self.fact_set.as_str(), &bytes))
    }

    /// Read and tokenize every claim in the file.
    pub fn read(&self) -> anyhow::Result<RawCorpus> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("Failed to read corpus file {}", self.path.display()))?;
        let content = String::from_utf8(bytes)
            .with_context(|| format!("Corpus file {} is not UTF-8", self.path.display()))?;
        let fingerprint = content_fingerprint(self.fact_set.as_str(), content.as_bytes());

        let records: Vec<CorpusRecord> = content
            .lines()
            .enumerate()
            .filter_map(|(line_no, line)| self.parse_line(line_no + 1, line))
            .collect();

        info!(
            "Read {} claims from {} ({})",
            records.len(),
            self.path.display(),
            self.fact_set
        );

        Ok(RawCorpus {
            fact_set: self.fact_set,
            fingerprint,
            records,
        })
    }

    fn parse_line(&self, line_no: usize, line: &str) -> Option<CorpusRecord> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }

        let mut fields = line.split('\t');
        let (Some(id), Some(text)) = (fields.next(), fields.next()) else {
            warn!("Skipping malformed corpus line {line_no}: expected id and text columns");
            return None;
        };

        let label = if self.fact_set.is_labelled() {
            let label = fields.next().map(str::to_string);
            if label.is_none() {
                warn!("Corpus line {line_no} (id {id}) has no label column");
            }
            label
        } else {
            None
        };

        debug!("Tokenizing claim {id}");
        Some(build_record(id, label, text))
    }
}

/// Tokenize one claim and collect its unigram, bigram and trigram sequences.
#[must_use]
pub fn build_record(id: &str, label: Option<String>, text: &str) -> CorpusRecord {
    let unigrams = tokenize(text);
    let bigrams = collect_ngrams(&unigrams, 2);
    let trigrams = collect_ngrams(&unigrams, 3);
    CorpusRecord {
        id: id.to_string(),
        label,
        text: text.to_string(),
        unigrams,
        bigrams,
        trigrams,
    }
}
