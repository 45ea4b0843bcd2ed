use anyhow::{Context, Result};
use async_trait::async_trait;
use factcheck_core::{GatewayError, KnowledgeGateway, PageRef, TableEvidence};
use moka::future::Cache;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::GatewayConfig;
use crate::html::{parse_infobox, parse_paragraphs};
use crate::retry::retry_with_backoff;

/// Knowledge gateway backed by the MediaWiki search API and article HTML.
///
/// Article bodies are memoized per URL, so the table check and the paragraph
/// check of the same page download it once. Missing pages (HTTP 404) are
/// memoized too.
pub struct WikipediaGateway {
    client: Client,
    config: GatewayConfig,
    base: Url,
    pages: Cache<String, Option<Arc<str>>>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

impl WikipediaGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid gateway base URL: {}", config.base_url))?;
        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("Only http and https base URLs are supported: {base}");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        let pages = Cache::builder()
            .max_capacity(config.page_cache_capacity)
            .build();

        Ok(Self {
            client,
            config,
            base,
            pages,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// MediaWiki search request returning at most one hit.
    pub fn search_url(&self, query: &str) -> Result<Url, GatewayError> {
        let mut url = self
            .base
            .join("w/api.php")
            .map_err(|e| GatewayError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("list", "search")
            .append_pair("srsearch", query)
            .append_pair("srlimit", "1")
            .append_pair("format", "json");
        Ok(url)
    }

    /// Article URL for a page title: `<base>/wiki/<Title_With_Underscores>`.
    pub fn page_url(&self, title: &str) -> Result<Url, GatewayError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .push("wiki")
            .push(&page_path(title));
        Ok(url)
    }

    /// Article HTML, `None` when the page does not exist.
    async fn page(&self, title: &str) -> Result<Option<Arc<str>>, GatewayError> {
        let url = self.page_url(title)?;
        let key = url.to_string();
        if let Some(page) = self.pages.get(&key).await {
            debug!("Page cache hit: {key}");
            return Ok(page);
        }

        let page = self.get(&url).await?.map(Arc::<str>::from);
        self.pages.insert(key, page.clone()).await;
        Ok(page)
    }

    async fn get(&self, url: &Url) -> Result<Option<String>, GatewayError> {
        retry_with_backoff(|| self.get_once(url), &self.config.retry_delays).await
    }

    async fn get_once(&self, url: &Url) -> Result<Option<String>, GatewayError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(GatewayError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(url, &e))?;
        if bytes.len() > self.config.max_size {
            return Err(GatewayError::TooLarge {
                url: url.to_string(),
                size: bytes.len(),
                max: self.config.max_size,
            });
        }

        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

#[async_trait]
impl KnowledgeGateway for WikipediaGateway {
    async fn search(&self, query: &str) -> Result<PageRef, GatewayError> {
        if query.trim().is_empty() {
            return Ok(PageRef::NoMatch);
        }
        let url = self.search_url(query)?;
        let Some(body) = self.get(&url).await? else {
            return Ok(PageRef::NoMatch);
        };
        let hit = parse_search_hit(&body, &url)?;
        debug!("Search '{query}' -> {hit:?}");
        Ok(hit)
    }

    async fn fetch_table(&self, title: &str) -> Result<TableEvidence, GatewayError> {
        Ok(self
            .page(title)
            .await?
            .map_or(TableEvidence::NoMatch, |html| parse_infobox(&html)))
    }

    async fn fetch_paragraphs(&self, title: &str) -> Result<Option<Vec<String>>, GatewayError> {
        Ok(self.page(title).await?.map(|html| parse_paragraphs(&html)))
    }
}

/// Path component of a page title: its words joined with underscores.
#[must_use]
pub fn page_path(title: &str) -> String {
    title.split(' ').collect::<Vec<_>>().join("_")
}

fn parse_search_hit(body: &str, url: &Url) -> Result<PageRef, GatewayError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| GatewayError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })?;
    Ok(PageRef::from(
        response
            .query
            .and_then(|q| q.search.into_iter().next())
            .map(|hit| hit.title),
    ))
}

fn transport_error(url: &Url, error: &reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout {
            url: url.to_string(),
        }
    } else {
        GatewayError::Request {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
