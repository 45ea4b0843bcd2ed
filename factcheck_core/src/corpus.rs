use serde::{Deserialize, Serialize};

/// Which split of the claim corpus is being processed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FactSet {
    #[default]
    Training,
    Test,
}

impl FactSet {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Training => "training",
            Self::Test => "test",
        }
    }

    /// Only the training split carries ground-truth labels.
    #[must_use]
    pub const fn is_labelled(&self) -> bool {
        matches!(self, Self::Training)
    }
}

impl std::fmt::Display for FactSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FactSet {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "training" => Ok(Self::Training),
            "test" => Ok(Self::Test),
            _ => Err(anyhow::anyhow!("unknown fact set: {s}")),
        }
    }
}

/// One tokenized line of the claim corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorpusRecord {
    pub id: String,
    pub label: Option<String>,
    pub text: String,
    pub unigrams: Vec<String>,
    pub bigrams: Vec<String>,
    pub trigrams: Vec<String>,
}
