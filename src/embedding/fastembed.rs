//! Local sentence embeddings via fastembed.
//!
//! Runs the MiniLM sentence-transformer in-process; the model weights
//! are downloaded once into the cache directory, after that no network
//! access is needed.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tokio::sync::Mutex;

use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::model::EmbeddingConfig;

const MODEL_NAME: &str = "all-MiniLM-L6-v2";
const DIMENSION: usize = 384;

/// Embedding provider backed by a locally-run MiniLM model.
///
/// The fastembed session needs `&mut` for inference, so it sits behind
/// an async mutex; clones share the same session.
#[derive(Clone)]
pub struct FastEmbedProvider {
    model: Arc<Mutex<TextEmbedding>>,
}

impl FastEmbedProvider {
    /// Initialize the local model, downloading weights on first use.
    pub fn new(config: &EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let mut options = InitOptions::new(EmbeddingModel::AllMiniLML6V2);
        if let Some(dir) = &config.cache_dir {
            options = options.with_cache_dir(PathBuf::from(dir));
        }

        let model =
            TextEmbedding::try_new(options).map_err(|e| EmbeddingError::InitError(e.to_string()))?;

        tracing::info!(model = MODEL_NAME, dimension = DIMENSION, "Embedding model ready");

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let inputs: Vec<String> = texts.iter().map(|t| t.to_string()).collect();

        let mut model = self.model.lock().await;
        model
            .embed(inputs, None)
            .map_err(|e| EmbeddingError::EmbedError(e.to_string()))
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }

    fn model_name(&self) -> &str {
        MODEL_NAME
    }
}

// TextEmbedding has no Debug impl
impl std::fmt::Debug for FastEmbedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedProvider")
            .field("model_name", &MODEL_NAME)
            .field("dimension", &DIMENSION)
            .finish()
    }
}
