//! Similarity search over document chunks.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::embedding::{cosine_similarity, EmbeddingError, EmbeddingProvider};
use crate::model::{Chunk, RetrievalResult};

/// Ranks chunks against a query by embedding cosine similarity.
pub struct ChunkRetriever {
    embedder: Arc<dyn EmbeddingProvider>,
}

impl ChunkRetriever {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embedder }
    }

    /// Return the `top_k` chunks most similar to `query`, best first.
    ///
    /// Ties keep the original chunk order. An empty chunk list or a zero
    /// `top_k` short-circuits without touching the embedder.
    pub async fn retrieve(
        &self,
        query: &str,
        chunks: &[Chunk],
        top_k: usize,
    ) -> Result<Vec<RetrievalResult>, EmbeddingError> {
        if chunks.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;
        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let chunk_embeddings = self.embedder.embed_batch(&texts).await?;

        let mut results: Vec<RetrievalResult> = chunks
            .iter()
            .zip(chunk_embeddings.iter())
            .map(|(chunk, embedding)| RetrievalResult {
                text: chunk.content.clone(),
                score: cosine_similarity(&query_embedding, embedding),
            })
            .collect();
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(top_k);

        tracing::debug!(
            candidates = chunks.len(),
            returned = results.len(),
            "retrieved chunks for query"
        );
        Ok(results)
    }
}
