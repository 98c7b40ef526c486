//! End-to-end paper analysis.

use std::sync::Arc;

use chrono::Utc;
use url::Url;

use crate::embedding::EmbeddingProvider;
use crate::ingest::{ExtractError, ExtractedDocument, PdfFetcher};
use crate::llm::ChatGateway;
use crate::model::{AnalysisConfig, ChatAnswer, Chunk, Config, PaperReport};
use crate::service::analyzer::PaperAnalyzer;
use crate::service::chat::{AnswerError, PaperChat};
use crate::service::cir::CitationImpactEstimator;
use crate::service::citations::CitationSource;
use crate::service::retrieval::ChunkRetriever;
use crate::service::segmenter::segment_pages;
use crate::service::ucr::ClaimSupportEvaluator;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Failed to extract document: {0}")]
    Extract(#[from] ExtractError),

    #[error("Failed to answer question: {0}")]
    Answer(#[from] AnswerError),
}

/// A finished analysis plus the chunks it produced, kept for follow-up
/// questions against the same document.
#[derive(Debug, Clone)]
pub struct AnalyzedPaper {
    pub report: PaperReport,
    pub chunks: Vec<Chunk>,
}

/// Orchestrates extraction, summarization, impact rating and claim checking.
pub struct PaperIntelService {
    fetcher: PdfFetcher,
    analyzer: PaperAnalyzer,
    estimator: CitationImpactEstimator,
    evaluator: ClaimSupportEvaluator,
    chat: PaperChat,
    analysis: AnalysisConfig,
}

impl PaperIntelService {
    pub fn new(
        gateway: Arc<dyn ChatGateway>,
        embedder: Arc<dyn EmbeddingProvider>,
        citations: Arc<dyn CitationSource>,
        config: &Config,
    ) -> Self {
        let analysis = config.analysis.clone();
        Self {
            fetcher: PdfFetcher::new(),
            analyzer: PaperAnalyzer::new(gateway.clone(), &analysis),
            estimator: CitationImpactEstimator::new(gateway.clone(), citations),
            evaluator: ClaimSupportEvaluator::new(gateway.clone(), &analysis),
            chat: PaperChat::new(gateway, ChunkRetriever::new(embedder), analysis.top_k),
            analysis,
        }
    }

    /// Download the paper and run the full analysis.
    ///
    /// `claims` overrides the text checked for support; without it the
    /// summary's main findings are checked instead.
    pub async fn analyze(
        &self,
        url: &Url,
        claims: Option<&str>,
    ) -> Result<AnalyzedPaper, AnalysisError> {
        let document = self.fetcher.fetch(url).await?;
        Ok(self.analyze_document(url, &document, claims).await)
    }

    /// Analyze an already-extracted document.
    ///
    /// Every stage degrades on its own, so this always produces a report:
    /// a failed summary is empty, a failed impact rating is neutral and a
    /// failed claim classification counts as unsupported.
    pub async fn analyze_document(
        &self,
        url: &Url,
        document: &ExtractedDocument,
        claims: Option<&str>,
    ) -> AnalyzedPaper {
        tracing::info!(url = %url, pages = document.pages.len(), "Analyzing paper");

        let chunks = segment_pages(&document.pages, self.analysis.chunk_size);
        let summary = self.analyzer.summarize(&document.full_text).await;

        let claims_text = match claims {
            Some(text) => text.to_string(),
            None => summary.main_findings.join(". "),
        };

        let (impact, claim_support) = tokio::join!(
            self.estimator.compute(&summary.title, &summary.abstract_text),
            self.evaluator.evaluate(&claims_text, &chunks)
        );

        let report = PaperReport {
            url: url.clone(),
            analyzed_at: Utc::now(),
            summary,
            impact,
            claim_support,
            chunk_count: chunks.len(),
        };

        tracing::info!(
            url = %url,
            chunks = report.chunk_count,
            cir = report.impact.cir,
            ucr = report.claim_support.ucr,
            "Paper analysis complete"
        );

        AnalyzedPaper { report, chunks }
    }

    /// Answer a question against a previously analyzed document.
    pub async fn ask(
        &self,
        question: &str,
        chunks: &[Chunk],
    ) -> Result<ChatAnswer, AnalysisError> {
        Ok(self.chat.ask(question, chunks).await?)
    }
}
