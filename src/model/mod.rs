pub mod config;
pub mod document;
pub mod report;

pub use config::{AnalysisConfig, CitationConfig, Config, EmbeddingConfig, LlmConfig, SupportPolicy};
pub use document::{Chunk, Page, RetrievalResult};
pub use report::{
    ChatAnswer, CitationImpact, ClaimSupportReport, ClaimVerdict, PaperReport, PaperSummary,
};
