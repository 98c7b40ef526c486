use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::document::RetrievalResult;

/// Structured summary extracted from the paper text.
///
/// Best-effort: parsing a model response is lenient, so any field may be
/// empty when the response was malformed or the call failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperSummary {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub key_concepts: Vec<String>,
    #[serde(default)]
    pub methodology: String,
    #[serde(default)]
    pub main_findings: Vec<String>,
}

impl PaperSummary {
    /// True when nothing could be extracted at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.authors.is_empty()
            && self.abstract_text.is_empty()
            && self.key_concepts.is_empty()
            && self.methodology.is_empty()
            && self.main_findings.is_empty()
    }
}

/// Citation impact metrics: an external citation count blended with a
/// model-estimated novelty score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationImpact {
    /// Raw citation count from the scholarly index, 0 when unavailable
    pub citations: u64,
    /// Estimated novelty in [0, 1], rounded to 2 decimals
    pub novelty: f64,
    /// Blended score in [0, 1], rounded to 2 decimals
    #[serde(rename = "CIR")]
    pub cir: f64,
}

/// Verdict for a single claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimVerdict {
    pub claim: String,
    pub supported: bool,
}

/// Aggregate claim-support evaluation.
///
/// Invariant: `supported + unsupported == total`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimSupportReport {
    pub total: usize,
    pub supported: usize,
    pub unsupported: usize,
    /// Fraction of claims judged unsupported, 0 when no claims were found
    #[serde(rename = "UCR")]
    pub ucr: f64,
    /// Per-claim verdicts, in claim order
    pub verdicts: Vec<ClaimVerdict>,
}

/// Complete analysis of one paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperReport {
    /// Source document URL
    pub url: Url,
    /// When the analysis finished
    pub analyzed_at: DateTime<Utc>,
    pub summary: PaperSummary,
    pub impact: CitationImpact,
    pub claim_support: ClaimSupportReport,
    /// Number of retrieval chunks produced from the document
    pub chunk_count: usize,
}

/// Answer to a question about the paper, with the passages used as context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
    pub sources: Vec<RetrievalResult>,
}
