//! Semantic Scholar API client service
//!
//! Looks up citation counts by paper title.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::CitationConfig;

#[derive(Debug, thiserror::Error)]
pub enum CitationError {
    #[error("No paper found for title: {0}")]
    NotFound(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// A citation-count lookup backend.
#[async_trait]
pub trait CitationSource: Send + Sync {
    /// Citation count of the best title match.
    async fn citation_count(&self, title: &str) -> Result<u64, CitationError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<PaperEntry>,
}

#[derive(Debug, Deserialize)]
struct PaperEntry {
    #[serde(rename = "citationCount")]
    citation_count: Option<u64>,
}

/// Client for the Semantic Scholar Graph API
pub struct SemanticScholarClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl SemanticScholarClient {
    /// Create a new Semantic Scholar client
    pub fn new(config: &CitationConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl Default for SemanticScholarClient {
    fn default() -> Self {
        Self::new(&CitationConfig::default())
    }
}

#[async_trait]
impl CitationSource for SemanticScholarClient {
    /// Search for the paper by title and return its citation count
    ///
    /// # Arguments
    /// * `title` - The paper title to search for
    ///
    /// # Returns
    /// The citation count of the first search result, or 0 when the record
    /// carries no count
    async fn citation_count(&self, title: &str) -> Result<u64, CitationError> {
        let url = format!("{}/graph/v1/paper/search", self.base_url);

        tracing::debug!(title = %title, url = %url, "Fetching citation count from Semantic Scholar");

        let response = self
            .client
            .get(&url)
            .query(&[("query", title), ("limit", "1"), ("fields", "citationCount")])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CitationError::ParseError(format!(
                "Unexpected status {}: {}",
                status, body
            )));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| CitationError::ParseError(format!("Failed to deserialize search result: {}", e)))?;

        let entry = search
            .data
            .into_iter()
            .next()
            .ok_or_else(|| CitationError::NotFound(title.to_string()))?;
        let count = entry.citation_count.unwrap_or(0);

        tracing::debug!(title = %title, citations = count, "Successfully fetched citation count");

        Ok(count)
    }
}
