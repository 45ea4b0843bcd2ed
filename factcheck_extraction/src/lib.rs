#![warn(
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

pub mod categorize;
pub mod stopwords;
pub mod structurer;

pub use categorize::{CandidatePools, CategorizerConfig, CategoryExtractor};
pub use stopwords::default_stopwords;
pub use structurer::ClaimStructurer;
