//! Retrieval-augmented question answering.

use std::sync::Arc;

use crate::embedding::EmbeddingError;
use crate::llm::{ChatGateway, ChatOptions, GatewayError};
use crate::model::{ChatAnswer, Chunk};
use crate::service::prompts::build_chat_prompt;
use crate::service::retrieval::ChunkRetriever;

#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("Retrieval failed: {0}")]
    Retrieval(#[from] EmbeddingError),

    #[error("Completion failed: {0}")]
    Completion(#[from] GatewayError),
}

/// Answers questions about a paper from its most relevant chunks.
pub struct PaperChat {
    gateway: Arc<dyn ChatGateway>,
    retriever: ChunkRetriever,
    top_k: usize,
}

impl PaperChat {
    pub fn new(gateway: Arc<dyn ChatGateway>, retriever: ChunkRetriever, top_k: usize) -> Self {
        Self {
            gateway,
            retriever,
            top_k,
        }
    }

    /// Answer `question` using the retrieved chunks as context.
    ///
    /// The returned answer carries the scored passages it was grounded on.
    pub async fn ask(&self, question: &str, chunks: &[Chunk]) -> Result<ChatAnswer, AnswerError> {
        let sources = self.retriever.retrieve(question, chunks, self.top_k).await?;
        let context = sources
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = build_chat_prompt(&context, question);
        let answer = self.gateway.chat(&prompt, ChatOptions::default()).await?;

        tracing::debug!(sources = sources.len(), "Answered question about the paper");

        Ok(ChatAnswer { answer, sources })
    }
}
