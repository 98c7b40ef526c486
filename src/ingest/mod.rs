//! Document ingestion.
//!
//! Fetches a paper by URL, interprets the body as PDF bytes and extracts
//! one text blob per page. Everything downstream works on [`Page`]s and
//! is agnostic to how they were produced.

use reqwest::Client;
use url::Url;

use crate::model::Page;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status} fetching document")]
    HttpStatus { status: u16 },

    #[error("Failed to extract PDF text: {0}")]
    PdfError(String),

    #[error("Document contains no extractable text")]
    EmptyDocument,
}

/// A document fetched and split into pages.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// One entry per PDF page, in page order
    pub pages: Vec<Page>,
    /// All page text joined with newlines
    pub full_text: String,
}

/// Fetches PDFs over HTTP and extracts their text layer page by page.
pub struct PdfFetcher {
    client: Client,
}

impl PdfFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Download the document at `url` and extract its pages.
    pub async fn fetch(&self, url: &Url) -> Result<ExtractedDocument, ExtractError> {
        tracing::debug!(url = %url, "Fetching document");

        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(ExtractError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!(url = %url, bytes = bytes.len(), "Downloaded document");

        Self::extract_pages(&bytes)
    }

    /// Extract per-page text from PDF bytes.
    ///
    /// Page numbers are 1-based. A document whose pages are all blank is
    /// an error; single blank pages (figure-only pages are common) are
    /// kept so page numbering stays aligned with the source.
    pub fn extract_pages(bytes: &[u8]) -> Result<ExtractedDocument, ExtractError> {
        let page_texts = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| ExtractError::PdfError(e.to_string()))?;

        let pages: Vec<Page> = page_texts
            .into_iter()
            .enumerate()
            .map(|(i, content)| Page {
                page_number: i as u32 + 1,
                content,
            })
            .collect();

        if pages.iter().all(|p| p.content.trim().is_empty()) {
            return Err(ExtractError::EmptyDocument);
        }

        let full_text = pages
            .iter()
            .map(|p| p.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        tracing::info!(
            pages = pages.len(),
            chars = full_text.chars().count(),
            "Extracted document text"
        );

        Ok(ExtractedDocument { pages, full_text })
    }
}

impl Default for PdfFetcher {
    fn default() -> Self {
        Self::new()
    }
}
