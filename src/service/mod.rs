pub mod analyzer;
pub mod chat;
pub mod cir;
pub mod citations;
pub mod pipeline;
pub mod prompts;
pub mod retrieval;
pub mod segmenter;
pub mod ucr;

#[cfg(test)]
pub(crate) mod testutil;

pub use analyzer::PaperAnalyzer;
pub use chat::PaperChat;
pub use cir::CitationImpactEstimator;
pub use citations::SemanticScholarClient;
pub use pipeline::PaperIntelService;
pub use retrieval::ChunkRetriever;
pub use ucr::ClaimSupportEvaluator;
