//! Text embedding abstraction.
//!
//! Chunks and queries are embedded into a shared vector space; retrieval
//! ranks by cosine similarity. Providers are deterministic for a fixed
//! model, so identical inputs always land on identical vectors.

pub mod fastembed;

use async_trait::async_trait;

pub use fastembed::FastEmbedProvider;

#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("Failed to initialize embedding model: {0}")]
    InitError(String),

    #[error("Embedding generation failed: {0}")]
    EmbedError(String),
}

/// A batch text-to-vector encoder.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts, one vector per input, in input order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.embed_batch(&[text]).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::EmbedError("provider returned no vector".to_string()))
    }

    /// Dimension of the produced vectors.
    fn dimension(&self) -> usize;

    /// Identifier of the underlying model.
    fn model_name(&self) -> &str;
}

/// Cosine similarity between two vectors of equal dimension.
///
/// Vectors are compared positionally; callers supply equal-dimension
/// vectors from the same provider. Returns 0.0 when either vector has
/// zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
