//! Claim verification cascade.
//!
//! A claim is checked on two channels. The entity channel looks for the
//! related entity on the entity's page, the related channel looks for the
//! entity on the related entity's page. Structured infobox evidence is tried
//! first; page paragraphs are the fallback:
//!
//! ```text
//! TABLE_MATCH -> PAGE_MATCH -> FALSE
//! ```
//!
//! The first positive check ends verification. Missing evidence and gateway
//! faults never abort it; they make the affected channel fail.

use factcheck_core::text::strip_trailing_space;
use factcheck_core::{
    Claim, InfoSlot, KnowledgeGateway, MatchedClaim, PageRef, SynonymTable, TableEvidence,
    Verdict,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// One info slot of a claim: the page to read and the text to find there.
struct Channel<'a> {
    slot: InfoSlot,
    page: &'a PageRef,
    locate: &'a str,
}

pub struct ClaimVerifier {
    synonyms: Arc<SynonymTable>,
    reported_gaps: Mutex<HashSet<String>>,
}

impl ClaimVerifier {
    #[must_use]
    pub fn new(synonyms: Arc<SynonymTable>) -> Self {
        Self {
            synonyms,
            reported_gaps: Mutex::new(HashSet::new()),
        }
    }

    #[must_use]
    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Resolve both info slots of a claim to their best page hit.
    pub async fn resolve(&self, claim: &Claim, gateway: &dyn KnowledgeGateway) -> MatchedClaim {
        let entity_page = search(gateway, &claim.entity).await;
        let related_page = search(gateway, &claim.related_entity).await;
        MatchedClaim {
            claim: claim.clone(),
            entity_page,
            related_page,
        }
    }

    /// Resolve and judge a claim in one step.
    pub async fn verify(&self, claim: &Claim, gateway: &dyn KnowledgeGateway) -> bool {
        let matched = self.resolve(claim, gateway).await;
        self.judge(&matched, gateway).await.matched
    }

    /// Run the table phase, then the paragraph phase, on a resolved claim.
    pub async fn judge(&self, matched: &MatchedClaim, gateway: &dyn KnowledgeGateway) -> Verdict {
        let category = matched.claim.category.as_str();
        let Some(synonyms) = self.synonyms_of(category) else {
            return Verdict::unmatched();
        };

        let channels = [
            Channel {
                slot: InfoSlot::Entity,
                page: &matched.entity_page,
                locate: strip_trailing_space(&matched.claim.related_entity),
            },
            Channel {
                slot: InfoSlot::RelatedEntity,
                page: &matched.related_page,
                locate: strip_trailing_space(&matched.claim.entity),
            },
        ];

        if let Some(verdict) = table_phase(&channels, synonyms, gateway).await {
            return verdict;
        }

        for channel in &channels {
            if page_match(channel, synonyms, gateway).await {
                debug!(
                    "Claim {} corroborated by {} page text",
                    matched.claim.id,
                    channel.slot.as_str()
                );
                return Verdict::page(channel.slot);
            }
        }

        debug!("Claim {} not corroborated", matched.claim.id);
        Verdict::unmatched()
    }

    /// Synonyms of `category`, reporting a missing or empty entry once.
    fn synonyms_of(&self, category: &str) -> Option<&[String]> {
        match self.synonyms.get(category) {
            Some(synonyms) if !synonyms.is_empty() => Some(synonyms),
            _ => {
                let first_report = self
                    .reported_gaps
                    .lock()
                    .map(|mut gaps| gaps.insert(category.to_string()))
                    .unwrap_or(true);
                if first_report {
                    warn!("No synonyms for category '{category}', its claims cannot be verified");
                }
                None
            }
        }
    }
}

/// Structured evidence first. A page without an infobox falls back to its
/// paragraphs right away; a matching table field ends the cascade.
async fn table_phase(
    channels: &[Channel<'_>],
    synonyms: &[String],
    gateway: &dyn KnowledgeGateway,
) -> Option<Verdict> {
    for channel in channels {
        if channel.locate.is_empty() {
            continue;
        }
        let Some(title) = channel.page.title() else {
            continue;
        };

        let table = match gateway.fetch_table(title).await {
            Ok(table) => table,
            Err(e) => {
                warn!("Table lookup for '{title}' failed, treating as no match: {e}");
                TableEvidence::NoMatch
            }
        };

        match table {
            TableEvidence::NoMatch => {}
            TableEvidence::NoTable => {
                if page_match(channel, synonyms, gateway).await {
                    return Some(Verdict::page(channel.slot));
                }
            }
            TableEvidence::Table(fields) => {
                let hit = fields
                    .iter()
                    .find(|(key, _)| synonyms.contains(key))
                    .filter(|(_, value)| value.contains(channel.locate));
                if let Some((key, _)) = hit {
                    debug!("Table field '{key}' of '{title}' holds '{}'", channel.locate);
                    return Some(Verdict::table(channel.slot));
                }
            }
        }
    }
    None
}

/// A paragraph of the channel's page holds both the text to locate and a
/// synonym of the category.
async fn page_match(
    channel: &Channel<'_>,
    synonyms: &[String],
    gateway: &dyn KnowledgeGateway,
) -> bool {
    if channel.locate.is_empty() {
        return false;
    }
    let Some(title) = channel.page.title() else {
        return false;
    };

    let paragraphs = match gateway.fetch_paragraphs(title).await {
        Ok(paragraphs) => paragraphs.unwrap_or_default(),
        Err(e) => {
            warn!("Paragraph lookup for '{title}' failed, treating as no match: {e}");
            return false;
        }
    };

    paragraphs.iter().any(|paragraph| {
        paragraph.contains(channel.locate)
            && synonyms
                .iter()
                .any(|synonym| paragraph.contains(synonym.as_str()))
    })
}

async fn search(gateway: &dyn KnowledgeGateway, info: &str) -> PageRef {
    let query = info.trim();
    match gateway.search(query).await {
        Ok(page) => page,
        Err(e) => {
            warn!("Search for '{query}' failed, treating as no match: {e}");
            PageRef::NoMatch
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factcheck_core::{GatewayCall, StaticGateway, default_lexicon};

    fn claim(entity: &str, category: &str, related: &str) -> Claim {
        Claim {
            id: "1".to_string(),
            label: Some("1.0".to_string()),
            text: format!("{entity}'s {category} is {related}"),
            category: category.to_string(),
            entity: entity.to_string(),
            related_entity: related.to_string(),
        }
    }

    fn verifier() -> ClaimVerifier {
        ClaimVerifier::new(Arc::new(default_lexicon()))
    }

    #[tokio::test]
    async fn resolve_searches_trimmed_slots() {
        let gateway = StaticGateway::new()
            .with_hit("Marie Curie", "Marie Curie")
            .with_hit("Warsaw", "Warsaw");
        let matched = verifier()
            .resolve(&claim("Marie Curie ", "birth place", "Warsaw"), &gateway)
            .await;

        assert_eq!(matched.entity_page, PageRef::Matched("Marie Curie".to_string()));
        assert_eq!(matched.related_page, PageRef::Matched("Warsaw".to_string()));
        assert_eq!(
            gateway.calls(),
            vec![
                GatewayCall::Search("Marie Curie".to_string()),
                GatewayCall::Search("Warsaw".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn first_synonym_field_in_document_order_decides() {
        // "birth" precedes "born" in the table, so "born" is never consulted
        let gateway = StaticGateway::new()
            .with_hit("Marie Curie", "Marie Curie")
            .with_table("Marie Curie", [("Birth", "1867"), ("Born", "Warsaw, Poland")]);

        assert!(
            !verifier()
                .verify(&claim("Marie Curie ", "birth place", "Warsaw"), &gateway)
                .await
        );
    }

    #[tokio::test]
    async fn empty_text_to_locate_fails_closed() {
        let gateway = StaticGateway::new()
            .with_hit("Warsaw", "Warsaw")
            .with_table("Warsaw", [("born", "anything")])
            .with_paragraphs("Warsaw", ["Someone was born here."]);

        assert!(!verifier().verify(&claim(" ", "birth place", "Warsaw"), &gateway).await);
    }

    #[tokio::test]
    async fn search_failure_is_no_match() {
        let gateway = StaticGateway::new()
            .with_failure("Marie Curie")
            .with_hit("Warsaw", "Warsaw");
        let matched = verifier()
            .resolve(&claim("Marie Curie ", "birth place", "Warsaw"), &gateway)
            .await;

        assert_eq!(matched.entity_page, PageRef::NoMatch);
        assert!(matched.related_page.is_matched());
    }

    #[tokio::test]
    async fn synonym_gap_is_reported_once_and_fetches_nothing() {
        let verifier = ClaimVerifier::new(Arc::new(SynonymTable::default()));
        let gateway = StaticGateway::new().with_hit("Dune", "Dune");

        for _ in 0..2 {
            let matched = verifier
                .resolve(&claim("Dune ", "author", "Frank Herbert"), &gateway)
                .await;
            assert_eq!(verifier.judge(&matched, &gateway).await, Verdict::unmatched());
        }
        assert!(gateway.table_fetches().is_empty());
        assert!(gateway.paragraph_fetches().is_empty());
        assert_eq!(verifier.reported_gaps.lock().map(|g| g.len()).ok(), Some(1));
    }
}
