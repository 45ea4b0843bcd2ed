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

pub mod config;
pub mod html;
pub mod retry;
pub mod wikipedia;

pub use config::GatewayConfig;
pub use html::{parse_infobox, parse_paragraphs};
pub use retry::retry_with_backoff;
pub use wikipedia::{WikipediaGateway, page_path};
