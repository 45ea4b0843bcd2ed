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

//! Corpus ingestion: TSV reading, tokenization and n-gram windows.

pub mod ngrams;
pub mod reader;
pub mod tokenizer;

pub use ngrams::collect_ngrams;
pub use reader::{CorpusReader, RawCorpus, build_record};
pub use tokenizer::{Tokenizer, tokenize};
