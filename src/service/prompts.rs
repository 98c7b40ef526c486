//! Prompts for the analysis pipeline.

/// Build the structured-summary extraction prompt.
///
/// The caller truncates `text` to its character budget first; the prompt
/// forwards it untouched.
pub fn build_summary_prompt(text: &str) -> String {
    format!(
        r#"Extract this research paper info as JSON:
{{ "title": "", "authors": [], "abstract": "",
  "key_concepts": [], "methodology": "", "main_findings": [] }}
--- TEXT ---
{text}"#
    )
}

/// Build the novelty rating prompt for an abstract.
pub fn build_novelty_prompt(abstract_text: &str) -> String {
    format!("Rate novelty 0-1 as JSON: {{'novelty': value}} Abstract: {abstract_text}")
}

/// Build the per-claim verdict prompt.
pub fn build_claim_prompt(claim: &str, context: &str) -> String {
    format!("Claim: {claim}\nContext: {context}\nIs it supported? (SUPPORTED/UNSUPPORTED)")
}

/// Build the retrieval-augmented chat prompt.
pub fn build_chat_prompt(context: &str, question: &str) -> String {
    format!(
        r#"You are a research assistant. Use the following context from the paper to answer the question.

Context:
{context}
Question: {question}
Answer: "#
    )
}
