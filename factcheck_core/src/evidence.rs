//! Evidence references, tables and verdicts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::text::{normalize_field_label, normalize_field_value};

/// Best search hit for one info slot of a claim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PageRef {
    Matched(String),
    NoMatch,
}

impl PageRef {
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Matched(title) => Some(title),
            Self::NoMatch => None,
        }
    }

    #[must_use]
    pub const fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

impl From<Option<String>> for PageRef {
    fn from(title: Option<String>) -> Self {
        title.map_or(Self::NoMatch, Self::Matched)
    }
}

/// Structured (infobox) evidence of a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TableEvidence {
    /// Field label to value, in document order.
    Table(IndexMap<String, String>),
    /// The page exists but carries no infobox.
    NoTable,
    /// There is no page at all.
    NoMatch,
}

impl TableEvidence {
    /// Build a table from raw `(label, value)` cells.
    ///
    /// Labels are lower-cased with non-breaking spaces collapsed, values are
    /// NFKC-normalized with zero-width spaces removed. A repeated label keeps
    /// its first position and takes the last value.
    pub fn from_cells<I, K, V>(cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let table = cells
            .into_iter()
            .map(|(label, value)| {
                (
                    normalize_field_label(label.as_ref()),
                    normalize_field_value(value.as_ref()),
                )
            })
            .collect();
        Self::Table(table)
    }
}

/// Which evidence channel produced a positive verdict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceChannel {
    Table,
    Page,
}

/// Which info slot's page held the evidence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InfoSlot {
    Entity,
    RelatedEntity,
}

impl InfoSlot {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::RelatedEntity => "related_entity",
        }
    }
}

/// Verification outcome. Channel and slot are diagnostics only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Verdict {
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub channel: Option<EvidenceChannel>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub slot: Option<InfoSlot>,
}

impl Verdict {
    #[must_use]
    pub const fn unmatched() -> Self {
        Self {
            matched: false,
            channel: None,
            slot: None,
        }
    }

    #[must_use]
    pub const fn table(slot: InfoSlot) -> Self {
        Self {
            matched: true,
            channel: Some(EvidenceChannel::Table),
            slot: Some(slot),
        }
    }

    #[must_use]
    pub const fn page(slot: InfoSlot) -> Self {
        Self {
            matched: true,
            channel: Some(EvidenceChannel::Page),
            slot: Some(slot),
        }
    }
}
