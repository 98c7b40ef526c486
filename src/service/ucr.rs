//! Claim extraction and support evaluation.

use std::sync::Arc;

use futures::StreamExt;
use regex::Regex;

use crate::llm::{ChatGateway, ChatOptions};
use crate::model::{AnalysisConfig, Chunk, ClaimSupportReport, ClaimVerdict, SupportPolicy};
use crate::service::prompts::build_claim_prompt;

/// Checks the claims a paper makes against its own leading content.
pub struct ClaimSupportEvaluator {
    gateway: Arc<dyn ChatGateway>,
    policy: SupportPolicy,
    min_claim_tokens: usize,
    context_chunks: usize,
    concurrency: usize,
}

impl ClaimSupportEvaluator {
    pub fn new(gateway: Arc<dyn ChatGateway>, config: &AnalysisConfig) -> Self {
        Self {
            gateway,
            policy: config.support_policy,
            min_claim_tokens: config.min_claim_tokens,
            context_chunks: config.context_chunks,
            concurrency: config.claim_concurrency,
        }
    }

    /// Split text on sentence terminators and keep the fragments long
    /// enough to be checkable claims.
    fn split_claims(&self, text: &str) -> Vec<String> {
        let terminators = Regex::new(r"[.!?]+").unwrap();
        terminators
            .split(text)
            .map(str::trim)
            .filter(|s| s.split_whitespace().count() > self.min_claim_tokens)
            .map(str::to_string)
            .collect()
    }

    /// Classify every claim in `text` against the document's leading chunks.
    ///
    /// Claims are classified concurrently up to the configured limit and the
    /// verdicts keep claim order. A failed classification counts the claim
    /// as unsupported rather than failing the whole evaluation.
    pub async fn evaluate(&self, text: &str, chunks: &[Chunk]) -> ClaimSupportReport {
        let claims = self.split_claims(text);
        if claims.is_empty() {
            tracing::debug!("No checkable claims found");
            return ClaimSupportReport::default();
        }

        let context = chunks
            .iter()
            .take(self.context_chunks)
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let context = &context;
        let verdicts: Vec<ClaimVerdict> = futures::stream::iter(claims)
            .map(|claim| async move {
                let supported = self.classify(&claim, context).await;
                ClaimVerdict { claim, supported }
            })
            .buffered(self.concurrency.max(1))
            .collect()
            .await;

        let total = verdicts.len();
        let supported = verdicts.iter().filter(|v| v.supported).count();
        let unsupported = total - supported;
        let ucr = unsupported as f64 / total as f64;

        tracing::info!(total, supported, unsupported, "Classified claims");

        ClaimSupportReport {
            total,
            supported,
            unsupported,
            ucr,
            verdicts,
        }
    }

    async fn classify(&self, claim: &str, context: &str) -> bool {
        let prompt = build_claim_prompt(claim, context);
        match self.gateway.chat(&prompt, ChatOptions::default()).await {
            Ok(reply) => self.policy.is_supported(&reply),
            Err(error) => {
                tracing::warn!(error = %error, "Claim classification failed, counting it unsupported");
                false
            }
        }
    }
}
