//! Citation impact rating.

use std::sync::Arc;

use crate::llm::{parse::parse_json_object, ChatGateway, ChatOptions};
use crate::model::CitationImpact;
use crate::service::citations::CitationSource;
use crate::service::prompts::build_novelty_prompt;

/// Citation counts at or above this saturate the normalized score.
const CITATION_SATURATION: f64 = 100.0;
/// Fallback when no novelty rating can be obtained.
const NEUTRAL_NOVELTY: f64 = 0.5;

/// Blends a citation count with an LLM novelty rating into a single score.
pub struct CitationImpactEstimator {
    gateway: Arc<dyn ChatGateway>,
    citations: Arc<dyn CitationSource>,
}

impl CitationImpactEstimator {
    pub fn new(gateway: Arc<dyn ChatGateway>, citations: Arc<dyn CitationSource>) -> Self {
        Self { gateway, citations }
    }

    /// Compute the impact rating for a paper.
    ///
    /// The rating is the mean of the normalized citation count and the
    /// novelty rating. Both inputs degrade independently: a failed lookup
    /// counts as zero citations and a failed rating falls back to neutral
    /// novelty, so this never fails.
    pub async fn compute(&self, title: &str, abstract_text: &str) -> CitationImpact {
        let (citations, novelty) = tokio::join!(
            self.fetch_citations(title),
            self.estimate_novelty(abstract_text)
        );

        let normalized = (citations as f64 / CITATION_SATURATION).min(1.0);
        let cir = 0.5 * normalized + 0.5 * novelty;

        CitationImpact {
            citations,
            novelty: round2(novelty),
            cir: round2(cir),
        }
    }

    async fn fetch_citations(&self, title: &str) -> u64 {
        match self.citations.citation_count(title).await {
            Ok(count) => count,
            Err(error) => {
                tracing::warn!(error = %error, "Citation lookup failed, counting zero citations");
                0
            }
        }
    }

    async fn estimate_novelty(&self, abstract_text: &str) -> f64 {
        let prompt = build_novelty_prompt(abstract_text);
        let raw = match self.gateway.chat(&prompt, ChatOptions::default()).await {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(error = %error, "Novelty rating failed, assuming neutral novelty");
                return NEUTRAL_NOVELTY;
            }
        };

        let rating = parse_json_object(&raw)
            .as_ref()
            .and_then(|value| value.get("novelty"))
            .and_then(|novelty| novelty.as_f64());
        match rating {
            Some(value) => value.clamp(0.0, 1.0),
            None => {
                tracing::warn!("Novelty response carried no numeric rating, assuming neutral novelty");
                NEUTRAL_NOVELTY
            }
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
