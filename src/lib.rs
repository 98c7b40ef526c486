//! Research paper intelligence: PDF extraction, LLM summarization,
//! citation impact rating, claim support checking and retrieval-augmented
//! chat over the paper's content.

pub mod embedding;
pub mod ingest;
pub mod llm;
pub mod model;
pub mod service;
