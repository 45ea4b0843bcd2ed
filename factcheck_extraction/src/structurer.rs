//! Splits raw claims into `(entity, category, related_entity)` triples.

use factcheck_core::text::is_punctuation;
use factcheck_core::{Claim, CorpusRecord};
use factcheck_corpus::tokenize;
use tracing::{debug, info, warn};

const COPULA: &str = " is ";
const POSSESSIVE: &str = "'s";

/// Turns corpus sentences into structured claims for a fixed category vocabulary.
pub struct ClaimStructurer {
    categories: Vec<String>,
}

impl ClaimStructurer {
    #[must_use]
    pub const fn new(categories: Vec<String>) -> Self {
        Self { categories }
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// One claim per `(sentence, category)` pair where the category is a
    /// substring of the sentence. Output follows corpus order, then category
    /// order.
    #[must_use]
    pub fn structure(&self, records: &[CorpusRecord]) -> Vec<Claim> {
        let mut claims = Vec::new();
        for record in records {
            for category in &self.categories {
                if !record.text.contains(category.as_str()) {
                    continue;
                }
                let Some((entity, related_entity)) = Self::split_claim(&record.text, category)
                else {
                    warn!(
                        "Claim {} mentions '{category}' but could not be split: {}",
                        record.id, record.text
                    );
                    continue;
                };
                claims.push(Claim {
                    id: record.id.clone(),
                    label: record.label.clone(),
                    text: record.text.clone(),
                    category: category.clone(),
                    entity,
                    related_entity,
                });
            }
        }
        info!(
            "Structured {} claims from {} sentences",
            claims.len(),
            records.len()
        );
        claims
    }

    /// Split one sentence around `category`.
    ///
    /// Sentences ending in the category (`B is A's category`) and sentences
    /// with the category in the middle (`A's category is B`) are handled
    /// separately. Returns `None` when the sentence does not split in two.
    #[must_use]
    pub fn split_claim(sentence: &str, category: &str) -> Option<(String, String)> {
        let parts: Vec<&str> = category.split(' ').collect();
        let key = if parts.len() == 2 { parts[1] } else { category };

        let mut sentence = sentence.to_string();
        if tokenize(&sentence).last().is_some_and(|t| is_punctuation(t)) {
            sentence.pop();
        }

        if tokenize(&sentence).last().is_some_and(|t| t == key) {
            debug!("Category '{category}' closes the sentence");
            let stripped = sentence.replace(category, "").replace(POSSESSIVE, "");
            let mut info = stripped.split(COPULA);
            let related = info.next()?;
            let entity = info.next()?;
            Some((entity.to_string(), related.to_string()))
        } else {
            let stripped = sentence.replace(POSSESSIVE, "");
            let (entity, related) = if stripped.contains(COPULA) {
                let stripped = stripped.replace(category, "");
                let mut info = stripped.split(COPULA);
                (info.next()?.to_string(), info.next()?.to_string())
            } else {
                let separator = format!(" {category} ");
                let mut info = stripped.split(separator.as_str());
                (info.next()?.to_string(), info.next()?.to_string())
            };
            Some((entity, related))
        }
    }
}
