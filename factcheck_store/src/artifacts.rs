//! Names and payloads of the pipeline's cached stages.

use factcheck_core::{Claim, FactSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One cached pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Tokenized corpus with its source fingerprint.
    RawCorpus,
    /// Categories and structured claims.
    Processed,
    /// Claims with their resolved page references.
    WikiMatch,
    Predictions,
}

impl ArtifactKind {
    pub const ALL: [Self; 4] = [
        Self::RawCorpus,
        Self::Processed,
        Self::WikiMatch,
        Self::Predictions,
    ];

    /// File name of this artifact for `fact_set`.
    #[must_use]
    pub fn file_name(self, fact_set: FactSet) -> String {
        match self {
            Self::RawCorpus => format!("{fact_set}_raw.json"),
            Self::Processed => format!("processed_{fact_set}.json"),
            Self::WikiMatch => format!("wiki_match_{fact_set}.json"),
            Self::Predictions => format!("predictions_{fact_set}.json"),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RawCorpus => "raw corpus",
            Self::Processed => "processed claims",
            Self::WikiMatch => "wiki matches",
            Self::Predictions => "predictions",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of category extraction and claim structuring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessedClaims {
    pub categories: Vec<String>,
    pub claims: Vec<Claim>,
}
