use serde::{Deserialize, Serialize};

/// A single page of text extracted from a source document.
///
/// Produced once per document by the ingest layer, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number in the source PDF
    pub page_number: u32,
    /// Extracted text, possibly empty for figure-only pages
    pub content: String,
}

/// A bounded span of sentences cut from one page. The unit of retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Page the text was cut from
    pub page: u32,
    /// Sentence-terminated chunk text
    pub content: String,
    /// Character budget the segmenter was packing towards. Advisory: a
    /// single sentence longer than the budget is kept whole.
    pub target_size: usize,
}

/// A chunk ranked against a query. Recomputed per query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// The matched chunk's content
    pub text: String,
    /// Cosine similarity to the query, in [-1, 1]
    pub score: f32,
}
