//! Knowledge source seam.
//!
//! The verifier only sees [`KnowledgeGateway`]; the HTTP implementation lives
//! in `factcheck_gateway` and [`StaticGateway`] serves scripted evidence.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use thiserror::Error;

use crate::evidence::{PageRef, TableEvidence};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("response from {url} too large: {size} bytes (max: {max})")]
    TooLarge { url: String, size: usize, max: usize },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Blocking-style evidence lookups against an encyclopedia.
#[async_trait]
pub trait KnowledgeGateway: Send + Sync {
    /// Best single page hit for `query`.
    async fn search(&self, query: &str) -> Result<PageRef, GatewayError>;

    /// Infobox of the page titled `title`.
    async fn fetch_table(&self, title: &str) -> Result<TableEvidence, GatewayError>;

    /// Paragraph texts of the page titled `title`, `None` when there is no page.
    async fn fetch_paragraphs(&self, title: &str) -> Result<Option<Vec<String>>, GatewayError>;
}

/// A recorded call against a [`StaticGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Search(String),
    Table(String),
    Paragraphs(String),
}

/// In-memory gateway returning scripted evidence and recording every call.
///
/// A title is "known" once it is a search hit or has a table or paragraphs
/// scripted; known titles without a table answer `NoTable`, unknown titles
/// answer `NoMatch`.
#[derive(Debug, Default)]
pub struct StaticGateway {
    hits: HashMap<String, String>,
    tables: HashMap<String, TableEvidence>,
    paragraphs: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<GatewayCall>>,
}

impl StaticGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hit(mut self, query: &str, title: &str) -> Self {
        self.hits.insert(query.to_string(), title.to_string());
        self
    }

    #[must_use]
    pub fn with_table<K: AsRef<str>, V: AsRef<str>>(
        mut self,
        title: &str,
        cells: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.tables
            .insert(title.to_string(), TableEvidence::from_cells(cells));
        self
    }

    #[must_use]
    pub fn with_paragraphs<S: AsRef<str>>(
        mut self,
        title: &str,
        paragraphs: impl IntoIterator<Item = S>,
    ) -> Self {
        self.paragraphs.insert(
            title.to_string(),
            paragraphs
                .into_iter()
                .map(|p| p.as_ref().to_string())
                .collect(),
        );
        self
    }

    /// Every call touching `key` (query or title) fails with a timeout.
    #[must_use]
    pub fn with_failure(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Titles whose tables were fetched, in call order.
    #[must_use]
    pub fn table_fetches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Table(title) => Some(title),
                _ => None,
            })
            .collect()
    }

    /// Titles whose paragraphs were fetched, in call order.
    #[must_use]
    pub fn paragraph_fetches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Paragraphs(title) => Some(title),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: GatewayCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn is_known(&self, title: &str) -> bool {
        self.tables.contains_key(title)
            || self.paragraphs.contains_key(title)
            || self.hits.values().any(|hit| hit == title)
    }

    fn check_failure(&self, key: &str) -> Result<(), GatewayError> {
        if self.failing.contains(key) {
            return Err(GatewayError::Timeout {
                url: format!("static://{key}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl KnowledgeGateway for StaticGateway {
    async fn search(&self, query: &str) -> Result<PageRef, GatewayError> {
        self.record(GatewayCall::Search(query.to_string()));
        self.check_failure(query)?;
        Ok(PageRef::from(self.hits.get(query).cloned()))
    }

    async fn fetch_table(&self, title: &str) -> Result<TableEvidence, GatewayError> {
        self.record(GatewayCall::Table(title.to_string()));
        self.check_failure(title)?;
        if let Some(table) = self.tables.get(title) {
            return Ok(table.clone());
        }
        if self.is_known(title) {
            Ok(TableEvidence::NoTable)
        } else {
            Ok(TableEvidence::NoMatch)
        }
    }

    async fn fetch_paragraphs(&self, title: &str) -> Result<Option<Vec<String>>, GatewayError> {
        self.record(GatewayCall::Paragraphs(title.to_string()));
        self.check_failure(title)?;
        if let Some(paragraphs) = self.paragraphs.get(title) {
            return Ok(Some(paragraphs.clone()));
        }
        Ok(self.is_known(title).then(Vec::new))
    }
}
