//! Stage orchestration over the artifact store.
//!
//! Reader -> extractor -> structurer -> gateway -> verifier. Every stage reads
//! its artifact when present and otherwise computes it from the previous
//! stage, so a run resumes where the last one stopped.

use anyhow::Context;
use factcheck_config::Config;
use factcheck_core::{KnowledgeGateway, MatchedClaim, Prediction, SynonymTable};
use factcheck_corpus::{CorpusReader, RawCorpus};
use factcheck_extraction::{CategoryExtractor, ClaimStructurer};
use factcheck_store::{ArtifactKind, ArtifactStore, ProcessedClaims};
use factcheck_verify::ClaimVerifier;
use std::sync::Arc;
use tracing::{info, warn};

pub struct Pipeline {
    config: Config,
    store: ArtifactStore,
    verifier: ClaimVerifier,
}

impl Pipeline {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = ArtifactStore::open(&config.corpus.output_dir, config.corpus.fact_set)
            .context("Failed to open artifact directory")?;
        let verifier = ClaimVerifier::new(Arc::new(config.synonym_table()));
        Ok(Self {
            config,
            store,
            verifier,
        })
    }

    #[must_use]
    pub const fn store(&self) -> &ArtifactStore {
        &self.store
    }

    #[must_use]
    pub fn synonyms(&self) -> &SynonymTable {
        self.verifier.synonyms()
    }

    fn reader(&self) -> CorpusReader {
        CorpusReader::new(&self.config.corpus.input_dir, self.config.corpus.fact_set)
    }

    /// Tokenized corpus, warning when the cached copy no longer matches the
    /// source file.
    pub fn raw_corpus(&self) -> anyhow::Result<RawCorpus> {
        let reader = self.reader();
        let cached = self.store.exists(ArtifactKind::RawCorpus);
        let raw: RawCorpus = self
            .store
            .load_or_create(ArtifactKind::RawCorpus, || reader.read())?;

        if cached {
            match reader.fingerprint() {
                Ok(fingerprint) if fingerprint != raw.fingerprint => warn!(
                    "{} changed since {} was written; delete the artifact to re-read it",
                    reader.path().display(),
                    self.store.path(ArtifactKind::RawCorpus).display()
                ),
                Ok(_) => {}
                Err(e) => warn!("Cannot fingerprint corpus file: {e:#}"),
            }
        }
        Ok(raw)
    }

    /// Categories and structured claims.
    pub fn processed(&self) -> anyhow::Result<ProcessedClaims> {
        let processed = self
            .store
            .load_or_create(ArtifactKind::Processed, || self.build_processed())?;
        self.report_gaps(&processed.categories);
        Ok(processed)
    }

    fn build_processed(&self) -> anyhow::Result<ProcessedClaims> {
        let raw = self.raw_corpus()?;
        let extractor = CategoryExtractor::new(self.config.extraction.clone());
        let categories = extractor.extract(&raw.records);
        let claims = ClaimStructurer::new(categories.clone()).structure(&raw.records);
        Ok(ProcessedClaims { categories, claims })
    }

    /// Claims with the page hits of both info slots.
    pub async fn matched(
        &self,
        gateway: &dyn KnowledgeGateway,
    ) -> anyhow::Result<Vec<MatchedClaim>> {
        let matched = self
            .store
            .load_or_create_async(ArtifactKind::WikiMatch, || async move {
                let processed = self.processed()?;
                Ok(self
                    .verifier
                    .resolve_all(&processed.claims, gateway, &self.config.verification)
                    .await)
            })
            .await?;
        Ok(matched)
    }

    /// One prediction per claim, in claim order.
    pub async fn predictions(
        &self,
        gateway: &dyn KnowledgeGateway,
    ) -> anyhow::Result<Vec<Prediction>> {
        let predictions = self
            .store
            .load_or_create_async(ArtifactKind::Predictions, || async move {
                let matched = self.matched(gateway).await?;
                Ok(self
                    .verifier
                    .judge_all(&matched, gateway, &self.config.verification)
                    .await)
            })
            .await?;
        Ok(predictions)
    }

    /// Categories the synonym lexicon does not cover.
    #[must_use]
    pub fn synonym_gaps<'a>(&self, categories: &'a [String]) -> Vec<&'a str> {
        self.synonyms().gaps(categories)
    }

    fn report_gaps(&self, categories: &[String]) {
        let gaps = self.synonym_gaps(categories);
        if gaps.is_empty() {
            info!("All {} categories have synonyms", categories.len());
        } else {
            warn!(
                "{} of {} categories have no synonyms and will never verify: {}",
                gaps.len(),
                categories.len(),
                gaps.join(", ")
            );
        }
    }
}
