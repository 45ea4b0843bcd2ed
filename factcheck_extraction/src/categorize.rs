//! Unsupervised relation category discovery.
//!
//! Relation words are mined from the surface pattern `ENTITY 's RELATION`:
//! a unigram or bigram `x` becomes a candidate when `'s x` appears one
//! n-gram level higher in the same sentence. Candidates are then promoted by
//! frequency, cleaned of trailing function words, filtered for rarity and
//! proper nouns, and finally deduplicated so only the most specific label of
//! a nested pair survives.

use factcheck_core::CorpusRecord;
use factcheck_core::text::PUNCTUATION;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, info};

use crate::stopwords::default_stopwords;

/// Corpus-tuning constants for category extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizerConfig {
    /// A pooled bigram candidate must occur more often than this to be promoted.
    #[serde(default = "CategorizerConfig::default_promotion_threshold")]
    pub promotion_threshold: usize,

    /// Minimum pooled frequency for a candidate that also appears in the pool.
    #[serde(default = "CategorizerConfig::default_min_pool_frequency")]
    pub min_pool_frequency: usize,

    #[serde(default = "default_stopwords")]
    pub stopwords: Vec<String>,

    /// Characters whose contiguous runs count as punctuation.
    #[serde(default = "CategorizerConfig::default_punctuation")]
    pub punctuation: String,
}

impl CategorizerConfig {
    const fn default_promotion_threshold() -> usize {
        140
    }

    const fn default_min_pool_frequency() -> usize {
        12
    }

    fn default_punctuation() -> String {
        PUNCTUATION.to_string()
    }
}

impl Default for CategorizerConfig {
    fn default() -> Self {
        Self {
            promotion_threshold: Self::default_promotion_threshold(),
            min_pool_frequency: Self::default_min_pool_frequency(),
            stopwords: default_stopwords(),
            punctuation: Self::default_punctuation(),
        }
    }
}

/// Raw output of the possessive cross-check, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePools {
    /// Unigrams `x` with `'s x` among the sentence's bigrams.
    pub low_level: Vec<String>,
    /// Bigrams `x` with `'s x` among the sentence's trigrams.
    pub high_level: Vec<String>,
}

pub struct CategoryExtractor {
    config: CategorizerConfig,
    stopwords: HashSet<String>,
}

impl CategoryExtractor {
    #[must_use]
    pub fn new(config: CategorizerConfig) -> Self {
        let stopwords = config.stopwords.iter().cloned().collect();
        Self { config, stopwords }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(CategorizerConfig::default())
    }

    #[must_use]
    pub const fn config(&self) -> &CategorizerConfig {
        &self.config
    }

    /// Discover the category vocabulary of a corpus, sorted.
    #[must_use]
    pub fn extract(&self, records: &[CorpusRecord]) -> Vec<String> {
        let pools = Self::collect_candidates(records);
        info!(
            "Possessive cross-check: {} unigram candidates, {} pooled bigram candidates",
            pools.low_level.len(),
            pools.high_level.len()
        );

        let counts = count(&pools.high_level);
        let mut candidates = pools.low_level;
        candidates.extend(self.promote(&counts));

        let cleaned = self.clean_tokens(&candidates);
        let categories = self.filter_rare(&cleaned, &counts);
        info!("Extracted {} categories", categories.len());
        categories
    }

    /// Emit every item of `lower` whose possessive probe `'s <item>` is in `higher`.
    #[must_use]
    pub fn cross_check(lower: &[String], higher: &[String]) -> Vec<String> {
        let higher: HashSet<&str> = higher.iter().map(String::as_str).collect();
        lower
            .iter()
            .filter(|item| higher.contains(format!("'s {item}").as_str()))
            .cloned()
            .collect()
    }

    /// Run the cross-check on both adjacent level pairs of every sentence.
    #[must_use]
    pub fn collect_candidates(records: &[CorpusRecord]) -> CandidatePools {
        let per_record: Vec<(Vec<String>, Vec<String>)> = records
            .par_iter()
            .map(|record| {
                (
                    Self::cross_check(&record.unigrams, &record.bigrams),
                    Self::cross_check(&record.bigrams, &record.trigrams),
                )
            })
            .collect();

        let mut pools = CandidatePools::default();
        for (low, high) in per_record {
            pools.low_level.extend(low);
            pools.high_level.extend(high);
        }
        pools
    }

    /// Pooled phrases frequent enough to join the low-level candidates.
    fn promote(&self, counts: &BTreeMap<String, usize>) -> Vec<String> {
        counts
            .iter()
            .filter(|(phrase, count)| {
                **count > self.config.promotion_threshold
                    && !self.is_punctuation(phrase)
                    && !self.is_stopword(phrase)
            })
            .map(|(phrase, count)| {
                debug!("Promoting pooled candidate '{phrase}' ({count} occurrences)");
                phrase.clone()
            })
            .collect()
    }

    /// Truncate two-word phrases ending in a stopword or punctuation to their
    /// first word. Idempotent.
    #[must_use]
    pub fn clean_tokens(&self, candidates: &[String]) -> Vec<String> {
        candidates
            .iter()
            .map(|phrase| {
                let words: Vec<&str> = phrase.split(' ').collect();
                match words.as_slice() {
                    [first, second]
                        if self.is_stopword(second) || self.is_punctuation(second) =>
                    {
                        (*first).to_string()
                    }
                    _ => phrase.clone(),
                }
            })
            .collect()
    }

    /// Drop rare or capitalized pooled candidates, then nested duplicates.
    fn filter_rare(&self, cleaned: &[String], counts: &BTreeMap<String, usize>) -> Vec<String> {
        let distinct: BTreeSet<&String> = cleaned.iter().collect();

        let survivors: Vec<String> = distinct
            .into_iter()
            .filter(|candidate| !candidate.trim().is_empty())
            .filter(|candidate| {
                counts.get(candidate.as_str()).is_none_or(|&count| {
                    count >= self.config.min_pool_frequency && !starts_uppercase(candidate)
                })
            })
            .cloned()
            .collect();

        eliminate_repetition(&survivors)
    }

    fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    fn is_punctuation(&self, token: &str) -> bool {
        self.config.punctuation.contains(token)
    }
}

/// Remove every candidate that is a strict substring of another candidate.
///
/// Plain substring containment, not word-bounded. A fixed point: applying it
/// to its own output changes nothing.
#[must_use]
pub fn eliminate_repetition(candidates: &[String]) -> Vec<String> {
    candidates
        .iter()
        .filter(|word| {
            !candidates
                .iter()
                .any(|other| other != *word && other.contains(word.as_str()))
        })
        .cloned()
        .collect()
}

fn count(items: &[String]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.clone()).or_insert(0) += 1;
    }
    counts
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use factcheck_corpus::build_record;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn corpus(sentences: &[(&str, usize)]) -> Vec<CorpusRecord> {
        let mut records = Vec::new();
        for (sentence, times) in sentences {
            for i in 0..*times {
                records.push(build_record(&format!("{i}"), None, sentence));
            }
        }
        records
    }

    #[test]
    fn cross_check_matches_possessive_probe() {
        let record = build_record("1", None, "Paris 's birth place is known");
        assert_eq!(
            CategoryExtractor::cross_check(&record.unigrams, &record.bigrams),
            strings(&["birth"])
        );
        assert_eq!(
            CategoryExtractor::cross_check(&record.bigrams, &record.trigrams),
            strings(&["birth place"])
        );
    }

    #[test]
    fn clean_tokens_truncates_trailing_function_words() {
        let extractor = CategoryExtractor::with_defaults();
        let cleaned = extractor.clean_tokens(&strings(&[
            "award .",
            "birth place",
            "author of",
            "award",
            "a b c",
        ]));
        assert_eq!(
            cleaned,
            strings(&["award", "birth place", "author", "award", "a b c"])
        );
    }

    #[test]
    fn clean_tokens_is_idempotent() {
        let extractor = CategoryExtractor::with_defaults();
        let once = extractor.clean_tokens(&strings(&["award .", "death place", "team the"]));
        assert_eq!(extractor.clean_tokens(&once), once);
    }

    #[test]
    fn repetition_keeps_most_specific_label() {
        let deduped = eliminate_repetition(&strings(&["place", "birth place", "award"]));
        assert_eq!(deduped, strings(&["birth place", "award"]));
    }

    #[test]
    fn repetition_is_plain_substring() {
        // "art" hides inside "party" even without a word boundary
        let deduped = eliminate_repetition(&strings(&["art", "party"]));
        assert_eq!(deduped, strings(&["party"]));
    }

    #[test]
    fn repetition_is_a_fixed_point() {
        let once = eliminate_repetition(&strings(&[
            "place",
            "birth place",
            "death place",
            "death",
            "team",
            "squad",
        ]));
        assert_eq!(eliminate_repetition(&once), once);
    }

    #[test]
    fn repetition_keeps_equal_duplicates() {
        let deduped = eliminate_repetition(&strings(&["team", "team"]));
        assert_eq!(deduped, strings(&["team", "team"]));
    }

    #[test]
    fn frequent_bigram_category_beats_its_parts() {
        let records = corpus(&[("Paris 's birth place is known", 141)]);
        let categories = CategoryExtractor::with_defaults().extract(&records);

        assert!(categories.contains(&"birth place".to_string()));
        assert!(!categories.contains(&"place".to_string()));
        assert!(!categories.contains(&"birth".to_string()));
    }

    #[test]
    fn rare_bigram_is_not_promoted() {
        let records = corpus(&[("Paris 's birth place is known", 140)]);
        let categories = CategoryExtractor::with_defaults().extract(&records);

        // only the unigram candidate survives
        assert_eq!(categories, strings(&["birth"]));
    }

    #[test]
    fn capitalized_pooled_candidate_is_dropped() {
        let config = CategorizerConfig {
            promotion_threshold: 2,
            ..CategorizerConfig::default()
        };
        let records = corpus(&[("Curie 's Nobel Prize was famous", 20)]);
        let categories = CategoryExtractor::new(config).extract(&records);

        assert!(!categories.contains(&"Nobel Prize".to_string()));
        // the unigram path is not case-filtered
        assert!(categories.contains(&"Nobel".to_string()));
    }

    #[test]
    fn pooled_candidate_needs_min_frequency() {
        let config = CategorizerConfig {
            promotion_threshold: 2,
            min_pool_frequency: 12,
            ..CategorizerConfig::default()
        };
        let records = corpus(&[("Tolkien 's book author is known", 5)]);
        let categories = CategoryExtractor::new(config).extract(&records);

        assert!(!categories.contains(&"book author".to_string()));
    }

    #[test]
    fn trailing_punctuation_bigram_cleans_to_word() {
        let config = CategorizerConfig {
            promotion_threshold: 2,
            ..CategorizerConfig::default()
        };
        let records = corpus(&[("This is Nobel 's award .", 20)]);
        let categories = CategoryExtractor::new(config).extract(&records);

        assert_eq!(categories, strings(&["award"]));
    }

    #[test]
    fn blank_candidates_are_dropped() {
        let extractor = CategoryExtractor::with_defaults();
        let counts = BTreeMap::new();
        assert!(
            extractor
                .filter_rare(&strings(&["", "   ", "\t"]), &counts)
                .is_empty()
        );
        assert_eq!(
            extractor.filter_rare(&strings(&["", "award", " "]), &counts),
            strings(&["award"])
        );
    }

    #[test]
    fn empty_corpus_has_no_categories() {
        assert!(CategoryExtractor::with_defaults().extract(&[]).is_empty());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn config_defaults_fill_partial_json() {
        let config: CategorizerConfig =
            serde_json::from_str(r#"{"promotion_threshold": 50}"#).expect("valid config");
        assert_eq!(config.promotion_threshold, 50);
        assert_eq!(config.min_pool_frequency, 12);
        assert!(config.stopwords.iter().any(|w| w == "'s"));
        assert_eq!(config.punctuation, PUNCTUATION);
    }
}
