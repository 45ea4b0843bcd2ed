//! Corpus-wide matching and fact checking.

use factcheck_core::{Claim, KnowledgeGateway, MatchedClaim, Prediction};
use futures::{StreamExt, stream};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::verifier::ClaimVerifier;

/// Progress is logged every this many claims.
const PROGRESS_EVERY: usize = 50;

/// Batch verification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Claims processed at once; output order never depends on it
    #[serde(default = "VerifierConfig::default_concurrency")]
    pub concurrency: usize,
}

impl VerifierConfig {
    const fn default_concurrency() -> usize {
        1
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            concurrency: Self::default_concurrency(),
        }
    }
}

/// Accuracy of a prediction set against its labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub labelled: usize,
    pub correct: usize,
    pub predicted_true: usize,
}

impl BatchReport {
    #[must_use]
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        predictions
            .iter()
            .fold(Self::default(), |mut report, prediction| {
                report.record(prediction);
                report
            })
    }

    fn record(&mut self, prediction: &Prediction) {
        self.total += 1;
        if prediction.prediction {
            self.predicted_true += 1;
        }
        if let Some(correct) = prediction.is_correct() {
            self.labelled += 1;
            if correct {
                self.correct += 1;
            }
        }
    }

    /// `correct / labelled`, `None` without labelled predictions.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "Claim counts stay far below 2^52"
    )]
    pub fn accuracy(&self) -> Option<f64> {
        (self.labelled > 0).then(|| self.correct as f64 / self.labelled as f64)
    }
}

impl ClaimVerifier {
    /// Resolve the page hits of every claim, in claim order.
    pub async fn resolve_all(
        &self,
        claims: &[Claim],
        gateway: &dyn KnowledgeGateway,
        config: &VerifierConfig,
    ) -> Vec<MatchedClaim> {
        let total = claims.len();
        let mut matched = Vec::with_capacity(total);
        let (mut entity_hits, mut related_hits) = (0usize, 0usize);

        let mut results = stream::iter(claims)
            .map(|claim| self.resolve(claim, gateway))
            .buffered(config.concurrency.max(1));

        while let Some(item) = results.next().await {
            entity_hits += usize::from(item.entity_page.is_matched());
            related_hits += usize::from(item.related_page.is_matched());
            matched.push(item);

            let done = matched.len();
            if done % PROGRESS_EVERY == 0 || done == total {
                info!(
                    "Wiki matches collected: {done}/{total}, entity S/U {entity_hits}/{}, \
                     related S/U {related_hits}/{}",
                    done - entity_hits,
                    done - related_hits
                );
            }
        }
        matched
    }

    /// Judge every resolved claim, in claim order, logging running accuracy.
    pub async fn judge_all(
        &self,
        matched: &[MatchedClaim],
        gateway: &dyn KnowledgeGateway,
        config: &VerifierConfig,
    ) -> Vec<Prediction> {
        let total = matched.len();
        let mut predictions = Vec::with_capacity(total);
        let mut report = BatchReport::default();

        let mut verdicts = stream::iter(matched)
            .map(|item| async move {
                Prediction::new(&item.claim, self.judge(item, gateway).await)
            })
            .buffered(config.concurrency.max(1));

        while let Some(prediction) = verdicts.next().await {
            report.record(&prediction);
            predictions.push(prediction);

            let done = predictions.len();
            if done % PROGRESS_EVERY == 0 || done == total {
                info!(
                    "Fact checking: {done}/{total}, accuracy {}/{} ({:.4})",
                    report.correct,
                    report.labelled,
                    report.accuracy().unwrap_or_default()
                );
            }
        }
        predictions
    }

    /// Resolve and judge every claim.
    pub async fn verify_all(
        &self,
        claims: &[Claim],
        gateway: &dyn KnowledgeGateway,
        config: &VerifierConfig,
    ) -> Vec<Prediction> {
        let matched = self.resolve_all(claims, gateway, config).await;
        self.judge_all(&matched, gateway, config).await
    }
}
