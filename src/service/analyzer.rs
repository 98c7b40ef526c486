//! Structured summary extraction.

use std::sync::Arc;

use crate::llm::{parse::first_json_object, ChatGateway, ChatOptions};
use crate::model::{AnalysisConfig, PaperSummary};
use crate::service::prompts::build_summary_prompt;

/// Extracts a structured [`PaperSummary`] from raw paper text.
pub struct PaperAnalyzer {
    gateway: Arc<dyn ChatGateway>,
    max_chars: usize,
}

impl PaperAnalyzer {
    pub fn new(gateway: Arc<dyn ChatGateway>, config: &AnalysisConfig) -> Self {
        Self {
            gateway,
            max_chars: config.max_summary_chars,
        }
    }

    /// Summarize the paper text, degrading to an empty summary when the
    /// completion fails or carries no parseable JSON object.
    pub async fn summarize(&self, full_text: &str) -> PaperSummary {
        let excerpt: String = full_text.chars().take(self.max_chars).collect();
        let prompt = build_summary_prompt(&excerpt);

        let raw = match self.gateway.chat(&prompt, ChatOptions::default()).await {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(error = %error, "Summary completion failed, returning empty summary");
                return PaperSummary::default();
            }
        };

        match first_json_object(&raw) {
            Some(span) => match serde_json::from_str::<PaperSummary>(span) {
                Ok(summary) => summary,
                Err(error) => {
                    tracing::warn!(error = %error, "Summary JSON did not match the expected shape");
                    PaperSummary::default()
                }
            },
            None => {
                tracing::warn!("Summary completion carried no JSON object");
                PaperSummary::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testutil::StubGateway;

    fn analyzer(gateway: StubGateway) -> PaperAnalyzer {
        PaperAnalyzer::new(Arc::new(gateway), &AnalysisConfig::default())
    }

    #[tokio::test]
    async fn parses_json_wrapped_in_commentary() {
        let reply = r#"Here is the extracted info:
{"title": "Attention Is All You Need", "authors": ["Vaswani"], "abstract": "We propose the Transformer.", "key_concepts": ["attention"], "methodology": "experiments", "main_findings": ["SOTA translation"]}
Hope that helps!"#;
        let analyzer = analyzer(StubGateway::with_replies(&[reply]));

        let summary = analyzer.summarize("full paper text").await;

        assert_eq!(summary.title, "Attention Is All You Need");
        assert_eq!(summary.authors, vec!["Vaswani"]);
        assert_eq!(summary.abstract_text, "We propose the Transformer.");
        assert_eq!(summary.main_findings, vec!["SOTA translation"]);
    }

    #[tokio::test]
    async fn missing_fields_default_to_empty() {
        let analyzer = analyzer(StubGateway::with_replies(&[r#"{"title": "Only a title"}"#]));

        let summary = analyzer.summarize("text").await;

        assert_eq!(summary.title, "Only a title");
        assert!(summary.authors.is_empty());
        assert!(summary.abstract_text.is_empty());
    }

    #[tokio::test]
    async fn reply_without_json_yields_empty_summary() {
        let analyzer = analyzer(StubGateway::with_replies(&["I cannot read this paper."]));

        let summary = analyzer.summarize("text").await;

        assert!(summary.is_empty());
    }

    #[tokio::test]
    async fn gateway_failure_yields_empty_summary() {
        let analyzer = analyzer(StubGateway::failing());

        let summary = analyzer.summarize("text").await;

        assert!(summary.is_empty());
    }

    #[tokio::test]
    async fn truncation_counts_characters_not_bytes() {
        let gateway = Arc::new(StubGateway::with_replies(&["{}"]));
        let analyzer = PaperAnalyzer::new(gateway.clone(), &AnalysisConfig::default());
        let text = "é".repeat(9000);

        analyzer.summarize(&text).await;

        let prompts = gateway.prompts();
        let sent = prompts[0].chars().filter(|c| *c == 'é').count();
        assert_eq!(sent, AnalysisConfig::default().max_summary_chars);
    }
}
