//! Curated category synonym lexicon.
//!
//! Each category maps to the surface forms that count as the same relation,
//! both as infobox field labels and as paragraph keywords. Lookups are
//! directional: `field in synonyms[category]`, never the reverse.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only category → synonyms mapping, injected into the verifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SynonymTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl SynonymTable {
    #[must_use]
    pub const fn new(entries: BTreeMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    /// Synonyms of `category`, `None` when the category has no entry.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.entries.get(category).map(Vec::as_slice)
    }

    /// Whether `surface` is a declared synonym of `category`.
    #[must_use]
    pub fn is_synonym(&self, category: &str, surface: &str) -> bool {
        self.get(category)
            .is_some_and(|synonyms| synonyms.iter().any(|s| s == surface))
    }

    /// Categories with no entry or an empty entry.
    #[must_use]
    pub fn gaps<'a>(&self, categories: &'a [String]) -> Vec<&'a str> {
        categories
            .iter()
            .filter(|category| self.get(category).is_none_or(<[String]>::is_empty))
            .map(String::as_str)
            .collect()
    }

    /// Overlay `overrides` on top of this table, replacing whole entries.
    #[must_use]
    pub fn merged(mut self, overrides: &BTreeMap<String, Vec<String>>) -> Self {
        for (category, synonyms) in overrides {
            self.entries.insert(category.clone(), synonyms.clone());
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The lexicon tuned for the Wikipedia fact-checking corpus.
#[must_use]
pub fn default_lexicon() -> SynonymTable {
    let entries: [(&str, &[&str]); 17] = [
        ("nascence place", &["nascence place", "birth", "born"]),
        ("death place", &["death place", "dead", "die", "last place"]),
        ("stars", &["star", "starring", "actor"]),
        ("team", &["team", "squad"]),
        ("squad", &["squad", "team"]),
        (
            "author",
            &["author", "writer", "novelist", "playwright", "creator"],
        ),
        (
            "foundation place",
            &[
                "founded",
                "foundation",
                "base",
                "headquarter",
                "innovation place",
            ],
        ),
        (
            "award",
            &["award", "prize", "honour", "decoration", "reward", "medal"],
        ),
        ("last place", &["last place", "death place", "dead", "die"]),
        (
            "innovation place",
            &[
                "innovation place",
                "innovation",
                "revolution",
                "transformation",
                "revolution",
                "headquarter",
                "founded",
                "foundation place",
            ],
        ),
        (
            "better half",
            &["better half", "partner", "wife", "husband", "spouse"],
        ),
        (
            "honour",
            &[
                "honour",
                "distinction",
                "tribute",
                "award",
                "prize",
                "decoration",
                "reward",
            ],
        ),
        (
            "subsidiary",
            &[
                "subsidiary",
                "successor",
                "parent",
                "predecessor",
                "developer",
                "acquire",
            ],
        ),
        ("generator", &["generator", "author"]),
        (
            "subordinate",
            &["subordinate", "fate", "acquire", "acquisition"],
        ),
        (
            "spouse",
            &["spouse", "partner", "wife", "husband", "better half"],
        ),
        (
            "birth place",
            &["birth place", "nascence place", "birth", "born"],
        ),
    ];

    SynonymTable::new(
        entries
            .into_iter()
            .map(|(category, synonyms)| {
                (
                    category.to_string(),
                    synonyms.iter().map(|s| (*s).to_string()).collect(),
                )
            })
            .collect(),
    )
}
