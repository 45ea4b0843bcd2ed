//! Structured claims and their verification outcomes.

use serde::{Deserialize, Serialize};

use crate::evidence::{PageRef, Verdict};

/// Label value marking a claim as true in the corpus.
pub const TRUE_LABEL: &str = "1.0";

/// Label value marking a claim as false in the corpus.
pub const FALSE_LABEL: &str = "0.0";

/// A corpus sentence split into `(entity, category, related_entity)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claim {
    pub id: String,
    pub label: Option<String>,
    pub text: String,
    pub category: String,
    pub entity: String,
    pub related_entity: String,
}

impl Claim {
    /// Ground truth as a boolean, if the claim is labelled.
    #[must_use]
    pub fn expected(&self) -> Option<bool> {
        self.label.as_deref().map(|label| label == TRUE_LABEL)
    }
}

/// A claim together with the best page hit for each of its info slots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchedClaim {
    #[serde(flatten)]
    pub claim: Claim,
    pub entity_page: PageRef,
    pub related_page: PageRef,
}

/// Final per-claim output, kept alongside the original label for scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prediction {
    pub id: String,
    pub text: String,
    pub category: String,
    pub label: Option<String>,
    #[serde(with = "label_flag")]
    pub prediction: bool,
    pub verdict: Verdict,
}

impl Prediction {
    #[must_use]
    pub fn new(claim: &Claim, verdict: Verdict) -> Self {
        Self {
            id: claim.id.clone(),
            text: claim.text.clone(),
            category: claim.category.clone(),
            label: claim.label.clone(),
            prediction: verdict.matched,
            verdict,
        }
    }

    /// `None` when the claim has no ground truth.
    #[must_use]
    pub fn is_correct(&self) -> Option<bool> {
        self.label
            .as_deref()
            .map(|label| (label == TRUE_LABEL) == self.prediction)
    }
}

/// Stores a boolean as the corpus label strings `"1.0"` / `"0.0"`.
mod label_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{FALSE_LABEL, TRUE_LABEL};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { TRUE_LABEL } else { FALSE_LABEL })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            TRUE_LABEL => Ok(true),
            FALSE_LABEL => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "invalid prediction flag: {other}"
            ))),
        }
    }
}
