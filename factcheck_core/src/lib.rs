#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod claim;
pub mod corpus;
pub mod evidence;
pub mod gateway;
pub mod synonyms;
pub mod text;
pub mod util;

pub use claim::{Claim, MatchedClaim, Prediction};
pub use corpus::{CorpusRecord, FactSet};
pub use evidence::{EvidenceChannel, InfoSlot, PageRef, TableEvidence, Verdict};
pub use gateway::{GatewayCall, GatewayError, KnowledgeGateway, StaticGateway};
pub use synonyms::{SynonymTable, default_lexicon};
pub use util::content_fingerprint;
